pub mod cancellation;
pub mod compute_grid;
pub mod generate_pixel_buffer;
pub mod schedule;
