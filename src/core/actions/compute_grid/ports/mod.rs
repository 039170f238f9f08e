pub mod cell_kernel;
