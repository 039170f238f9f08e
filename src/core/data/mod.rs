pub mod colour;
pub mod complex;
pub mod complex_rect;
pub mod grid;
pub mod grid_size;
pub mod pixel_buffer;
pub mod point;
pub mod task;
