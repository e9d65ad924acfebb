// Core types for Inclusivo
use serde::{Deserialize, Serialize};

/// A rewrite proposed by a provider, before the controller numbers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub original: String,
    pub inclusive: String,
}

impl Suggestion {
    pub fn new(original: impl Into<String>, inclusive: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            inclusive: inclusive.into(),
        }
    }
}

/// One (original -> inclusive) substitution, unique within an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub id: String,
    pub original: String,
    pub inclusive: String,
}

impl Change {
    pub fn phrase(&self, side: Side) -> &str {
        match side {
            Side::Original => &self.original,
            Side::Inclusive => &self.inclusive,
        }
    }
}

/// Which half of the comparison a phrase or pane belongs to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Original,
    Inclusive,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Initial,
    Loading,
    Comparing,
    Error,
}

impl ViewState {
    pub fn label(self) -> &'static str {
        match self {
            ViewState::Initial => "INICIO",
            ViewState::Loading => "ANALIZANDO",
            ViewState::Comparing => "COMPARANDO",
            ViewState::Error => "ERROR",
        }
    }
}

/// Everything produced by one upload-through-download interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSession {
    pub file_name: String,
    pub original_text: String,
    pub modified_text: String,
    pub changes: Vec<Change>,
}

// App state flags using bitflags
bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AppFlags: u8 {
        const EXIT      = 0b0001;
        const REDRAW    = 0b0010;
    }
}
