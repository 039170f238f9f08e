pub mod args;
pub mod errors;
pub mod render;
