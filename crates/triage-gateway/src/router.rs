use crate::eta::EtaRange;
use crate::pages;
use crate::sanitizer::FieldSanitizer;
use std::sync::Arc;
use tracing::{info, warn};
use triage_memory::ResponseIndex;

/// Tunables for the conversation steps.
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Name used when promising a callback or a visit.
    pub doctor_name: String,
    /// Range the arrival estimate is drawn from.
    pub eta: EtaRange,
    /// Maximum accepted length of any form field, in characters.
    pub max_input_length: usize,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            doctor_name: "Dr. Adrin".to_string(),
            eta: EtaRange::default(),
            max_input_length: 2000,
        }
    }
}

/// The user's answer to the first question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Reporting an emergency.
    Emergency,
    /// Leaving a message.
    Message,
    /// Anything else.
    Unknown,
}

impl Choice {
    /// Case-insensitive match on the trimmed answer.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "emergency" => Choice::Emergency,
            "message" => Choice::Message,
            _ => Choice::Unknown,
        }
    }
}

/// What a conversation step produced.
#[derive(Debug, PartialEq)]
pub enum Reply {
    /// An HTML page for the next step.
    Page(String),
    /// The submitted field was refused.
    Rejected(String),
}

/// Drives each form step. Steps are independent; nothing is kept between
/// requests.
pub struct ConversationRouter {
    index: Arc<ResponseIndex>,
    settings: BotSettings,
    sanitizer: FieldSanitizer,
}

impl ConversationRouter {
    /// Creates a router answering from `index` with the given step settings.
    pub fn new(index: Arc<ResponseIndex>, settings: BotSettings) -> Self {
        let sanitizer = FieldSanitizer::new(settings.max_input_length);
        Self {
            index,
            settings,
            sanitizer,
        }
    }

    /// The index answering emergency descriptions.
    pub fn index(&self) -> &ResponseIndex {
        &self.index
    }

    /// Step settings.
    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    /// Route the emergency/message answer.
    pub fn choose(&self, text: &str) -> Reply {
        let Some(text) = self.clean(text, "text") else {
            return Reply::Rejected(pages::rejected());
        };
        match Choice::parse(&text) {
            Choice::Emergency => Reply::Page(pages::emergency_form()),
            Choice::Message => Reply::Page(pages::message_form()),
            Choice::Unknown => Reply::Page(pages::NOT_UNDERSTOOD.to_string()),
        }
    }

    /// Look up first-aid instructions for a free-text description.
    pub async fn emergency(&self, description: &str) -> Reply {
        let Some(description) = self.clean(description, "emergency_type") else {
            return Reply::Rejected(pages::rejected());
        };
        let query = description.to_lowercase();
        let response = self.index.lookup(&query).await;
        info!(query_len = query.len(), "Emergency instructions sent");
        Reply::Page(pages::instructions(&response))
    }

    /// Acknowledge a left message.
    pub fn message(&self, text: &str) -> Reply {
        let Some(text) = self.clean(text, "text") else {
            return Reply::Rejected(pages::rejected());
        };
        info!(message_len = text.len(), "Message received");
        Reply::Page(pages::message_received(&self.settings.doctor_name, &text))
    }

    /// Quote an arrival estimate once the location is known.
    pub fn location(&self, text: &str) -> Reply {
        if self.clean(text, "text").is_none() {
            return Reply::Rejected(pages::rejected());
        }
        let eta = self.settings.eta.sample();
        info!(eta_minutes = eta, "Arrival estimate sent");
        Reply::Page(pages::arrival(&self.settings.doctor_name, eta))
    }

    fn clean(&self, input: &str, field: &str) -> Option<String> {
        let cleaned = self.sanitizer.sanitize(input).into_text();
        if cleaned.is_none() {
            warn!(field, "Rejected form field: failed sanitization");
        }
        cleaned
    }
}
