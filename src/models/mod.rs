pub mod catalog;
pub mod image;
pub mod settings;

pub use catalog::*;
pub use image::*;
pub use settings::*;
