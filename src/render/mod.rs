pub mod assembler;
pub mod blend;
pub mod compositor;
pub mod raster;
