pub mod fill;
pub mod models;
pub mod region;
