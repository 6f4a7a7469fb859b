pub mod decode;
pub mod loader;
pub mod resolver;
