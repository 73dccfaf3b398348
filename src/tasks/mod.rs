//! Request/response features other than speech
//!
//! Each is a thin wrapper over [`crate::api::Dispatcher`]: validate the
//! input, dispatch the feature, pull the useful part out of the response.

pub mod image;
pub mod learn;
pub mod translate;
pub mod writer;

pub use image::{generate_image, GeneratedImage};
pub use learn::{learn, Lesson};
pub use translate::{translate, Translation};
pub use writer::{Message, Role, Writer};
