//! English learning search with linked sources

use crate::api::{Dispatcher, Feature, Resource};
use crate::{PeshkatError, Result};

/// Tutor answer plus the web pages it was grounded on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub answer: String,
    pub resources: Vec<Resource>,
}

/// Ask the tutor about an English topic or phrase
pub fn learn(dispatcher: &Dispatcher, query: &str) -> Result<Lesson> {
    if query.trim().is_empty() {
        return Err(PeshkatError::Other("Nothing to search for".to_string()));
    }

    let response = dispatcher.dispatch(Feature::Learn, &[("text", query)], Vec::new())?;

    Ok(Lesson {
        answer: response.text().unwrap_or_default(),
        resources: response.grounding_resources(),
    })
}
