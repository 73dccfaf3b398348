//! Image generation and editing

use crate::api::features::DEFAULT_EDIT_DESCRIPTION;
use crate::api::{Dispatcher, Feature, InlineData};
use crate::audio::decode_base64;
use crate::{PeshkatError, Result};
use base64::{engine::general_purpose, Engine as _};
use log::info;

/// A generated image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    /// `data:` URL for embedding the image
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Generate an image from a description, or edit a reference PNG
///
/// A reference image with an empty description gets a generic
/// enhancement prompt. Both empty is an error.
pub fn generate_image(
    dispatcher: &Dispatcher,
    description: &str,
    reference_png: Option<&[u8]>,
) -> Result<GeneratedImage> {
    let description = description.trim();
    if description.is_empty() && reference_png.is_none() {
        return Err(PeshkatError::Other("Nothing to draw".to_string()));
    }

    let response = match reference_png {
        Some(png) => {
            info!("Editing {} byte reference image", png.len());
            let text = if description.is_empty() {
                DEFAULT_EDIT_DESCRIPTION
            } else {
                description
            };
            let attachment = InlineData {
                mime_type: "image/png".to_string(),
                data: general_purpose::STANDARD.encode(png),
            };
            dispatcher.dispatch(Feature::ImageEdit, &[("text", text)], vec![attachment])?
        }
        None => dispatcher.dispatch(Feature::Image, &[("text", description)], Vec::new())?,
    };

    let inline = response
        .first_inline_data()
        .ok_or_else(|| PeshkatError::Request("response contained no image".to_string()))?;

    Ok(GeneratedImage {
        mime_type: inline.mime_type.clone(),
        bytes: decode_base64(&inline.data)?,
    })
}
