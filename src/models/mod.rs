pub mod common;
pub mod image;
pub mod options;
pub mod outcome;

pub use common::*;
pub use image::*;
pub use options::*;
pub use outcome::*;
