//! Integration tests for the request/response features
//!
//! Each test scripts the API response and checks both the request that
//! went out and what the feature made of the answer.

use peshkat::api::{Dispatcher, Feature, GenerateRequest, GenerateResponse, GenerativeClient};
use peshkat::state::{reduce, Action, AppState, Tab};
use peshkat::tasks::writer::{EMPTY_REPLY, GREETING};
use peshkat::tasks::{self, Role, Translation, Writer};
use peshkat::{PeshkatError, Result};
use std::sync::{Arc, Mutex};

struct Recorder {
    response: String,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl GenerativeClient for Recorder {
    fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(serde_json::from_str(&self.response)?)
    }
}

fn setup(response: &str) -> (Dispatcher, Arc<Mutex<Vec<GenerateRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let client = Recorder {
        response: response.to_string(),
        requests: Arc::clone(&requests),
    };
    (Dispatcher::new(Box::new(client)), requests)
}

fn text_response(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
    .to_string()
}

#[test]
fn test_translate_round_trip() {
    let (dispatcher, requests) = setup(&text_response("سڵاو"));
    let mut translation = Translation::default();
    translation.input = "hello".to_string();

    tasks::translate::run(&dispatcher, &mut translation).unwrap();
    assert_eq!(translation.output, "سڵاو");

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].model, "gemini-3-flash-preview");
    assert_eq!(
        requests[0].prompt_text(),
        "Translate this text from English to Kurdish (Sorani): \"hello\"."
    );
}

#[test]
fn test_translate_blank_input_sends_nothing() {
    let (dispatcher, requests) = setup(&text_response("x"));
    assert!(tasks::translate(&dispatcher, " ", "en", "ar").is_err());
    assert!(requests.lock().unwrap().is_empty());
}

#[test]
fn test_writer_conversation() {
    let (dispatcher, requests) = setup(&text_response("هۆنراوەیەک"));
    let mut writer = Writer::new();

    let reply = writer.send(&dispatcher, "شیعرێک بنووسە").unwrap().clone();
    assert_eq!(reply.role, Role::Bot);
    assert_eq!(reply.text, "هۆنراوەیەک");

    let messages = writer.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].text, GREETING);
    assert_eq!(messages[1].role, Role::User);

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].prompt_text(), "شیعرێک بنووسە");
    assert!(requests[0].system_instruction.is_some());
}

#[test]
fn test_writer_empty_answer() {
    let (dispatcher, _) = setup(r#"{"candidates":[]}"#);
    let mut writer = Writer::new();
    assert_eq!(writer.send(&dispatcher, "hi").unwrap().text, EMPTY_REPLY);
}

#[test]
fn test_learn_collects_sources() {
    let response = serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": "It means " }, { "text": "to be lucky." }] },
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://example.org/idioms", "title": "Idioms" } },
                    { "retrievedContext": {} },
                    { "web": { "uri": "https://example.org/luck", "title": "Luck" } }
                ]
            }
        }]
    })
    .to_string();
    let (dispatcher, requests) = setup(&response);

    let lesson = tasks::learn(&dispatcher, "break a leg").unwrap();
    assert_eq!(lesson.answer, "It means to be lucky.");
    assert_eq!(lesson.resources.len(), 2);
    assert_eq!(lesson.resources[1].uri, "https://example.org/luck");

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].tools.len(), 1);
}

#[test]
fn test_image_generation_and_edit() {
    let response = serde_json::json!({
        "candidates": [{ "content": { "parts": [
            { "text": "Here you go" },
            { "inlineData": { "mimeType": "image/png", "data": "iVBORw==" } }
        ] } }]
    })
    .to_string();
    let (dispatcher, requests) = setup(&response);

    let image = tasks::generate_image(&dispatcher, "a mountain at dawn", None).unwrap();
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.bytes, vec![0x89, 0x50, 0x4E, 0x47]);

    let reference = [0x89u8, 0x50, 0x4E, 0x47];
    tasks::generate_image(&dispatcher, "", Some(&reference)).unwrap();

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].model, Feature::Image.profile().model);
    assert_eq!(requests[0].contents[0].parts.len(), 1);

    let edit_parts = &requests[1].contents[0].parts;
    assert_eq!(edit_parts.len(), 2);
    assert_eq!(edit_parts[0].inline_data.as_ref().unwrap().data, "iVBORw==");
    assert!(requests[1].prompt_text().contains("Make it artistic and high quality"));
}

#[test]
fn test_image_without_picture_is_error() {
    let (dispatcher, _) = setup(&text_response("no image today"));
    let err = tasks::generate_image(&dispatcher, "a cat", None).unwrap_err();
    assert!(matches!(err, PeshkatError::Request(_)));
}

#[test]
fn test_state_drives_labels() {
    let state = reduce(&AppState::default(), Action::SetUiLanguage("ar".to_string()));
    let state = reduce(&state, Action::SelectTab(Tab::Writer));
    assert!(state.is_rtl());
    assert_eq!(state.tab(), Tab::Writer);
    assert_ne!(Tab::Writer.label(state.labels()), "Write");
}
