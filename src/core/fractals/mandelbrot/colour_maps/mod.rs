pub mod errors;
pub mod fire_gradient;
pub mod hsb_gradient;
pub mod kinds;
