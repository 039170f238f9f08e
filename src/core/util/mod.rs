pub mod partition_stripes;
pub mod pixel_to_complex_coords;
