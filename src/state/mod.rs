//! Application state management
//!
//! The selected tab, theme and UI language live in one immutable
//! [`AppState`]. Changes go through [`reduce`], which returns a new state,
//! and features receive the state they need as a parameter.

pub mod config;
pub mod labels;
pub mod theme;

use crate::language::{find_language, is_rtl_language, ENGLISH};
use labels::{labels_for, Labels};
use log::{debug, warn};
use std::fmt;
use theme::Theme;

/// Top-level feature tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Translator,
    ImageGen,
    Tts,
    Writer,
    Learn,
    About,
}

impl Tab {
    /// Navigation order
    pub const ALL: [Tab; 6] = [
        Tab::Translator,
        Tab::Learn,
        Tab::ImageGen,
        Tab::Tts,
        Tab::Writer,
        Tab::About,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Translator => "translator",
            Tab::ImageGen => "image_gen",
            Tab::Tts => "tts",
            Tab::Writer => "writer",
            Tab::Learn => "learn",
            Tab::About => "about",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Localized navigation label
    pub fn label(self, labels: &Labels) -> &'static str {
        match self {
            Tab::Translator => labels.translate,
            Tab::ImageGen => labels.image,
            Tab::Tts => labels.audio,
            Tab::Writer => labels.write,
            Tab::Learn => labels.learn,
            Tab::About => labels.about,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// State changes the user can make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    SelectTheme(&'static Theme),
    SetUiLanguage(String),
}

/// Shared UI state handed to every feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    tab: Tab,
    theme: Theme,
    ui_language: String,
}

impl AppState {
    pub fn new(tab: Tab, theme: Theme, ui_language: &str) -> Self {
        Self {
            tab,
            theme,
            ui_language: ui_language.to_string(),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn ui_language(&self) -> &str {
        &self.ui_language
    }

    /// Labels for the current UI language
    pub fn labels(&self) -> &'static Labels {
        labels_for(&self.ui_language)
    }

    /// Should the UI be laid out right-to-left?
    pub fn is_rtl(&self) -> bool {
        is_rtl_language(&self.ui_language)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Tab::default(), Theme::default(), ENGLISH)
    }
}

/// Apply an action, producing the next state
///
/// Unknown UI languages are rejected and leave the state unchanged.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    debug!("Reducing {:?}", action);
    match action {
        Action::SelectTab(tab) => AppState {
            tab,
            ..state.clone()
        },
        Action::SelectTheme(theme) => AppState {
            theme: *theme,
            ..state.clone()
        },
        Action::SetUiLanguage(code) => {
            if find_language(&code).is_none() {
                warn!("Ignoring unknown UI language {:?}", code);
                return state.clone();
            }
            AppState {
                ui_language: code,
                ..state.clone()
            }
        }
    }
}
