pub mod quad;
