pub mod coords;
pub mod scene;
pub mod time;
