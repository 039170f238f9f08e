pub mod errors;
pub mod pool;
mod worker;
