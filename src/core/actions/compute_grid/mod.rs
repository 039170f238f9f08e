pub mod compute_grid;
pub mod compute_stripe;
pub mod ports;
