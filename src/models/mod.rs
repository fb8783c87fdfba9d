pub mod image_entry;
pub mod selection;
pub mod status;

pub use image_entry::*;
pub use selection::*;
pub use status::*;
