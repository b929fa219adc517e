pub mod config;
pub mod context;
pub mod element;
pub mod types;
