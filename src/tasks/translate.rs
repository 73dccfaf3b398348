//! Translation between any two supported languages

use crate::api::{Dispatcher, Feature};
use crate::language::language_name;
use crate::{PeshkatError, Result};
use log::info;

/// Source/target pair and the texts on either side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub source: String,
    pub target: String,
    pub input: String,
    pub output: String,
}

impl Translation {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            input: String::new(),
            output: String::new(),
        }
    }

    /// Swap languages; the last output becomes the next input
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
        self.input = std::mem::take(&mut self.output);
    }
}

impl Default for Translation {
    fn default() -> Self {
        Self::new("en", "ku-sorani")
    }
}

/// Translate text from one language code to another
pub fn translate(
    dispatcher: &Dispatcher,
    text: &str,
    source: &str,
    target: &str,
) -> Result<String> {
    if text.trim().is_empty() {
        return Err(PeshkatError::Other("Nothing to translate".to_string()));
    }

    let source_name = language_name(source);
    let target_name = language_name(target);
    info!("Translating {} -> {}", source_name, target_name);

    let response = dispatcher.dispatch(
        Feature::Translate,
        &[("source", source_name), ("target", target_name), ("text", text)],
        Vec::new(),
    )?;

    Ok(response.text().unwrap_or_default())
}

/// Translate the pair's input into its output
pub fn run(dispatcher: &Dispatcher, translation: &mut Translation) -> Result<()> {
    translation.output = translate(
        dispatcher,
        &translation.input,
        &translation.source,
        &translation.target,
    )?;
    Ok(())
}
