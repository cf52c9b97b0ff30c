//! Form-driven web layer for the triage bot.
//!
//! Serves the welcome page and the emergency/message, description, and
//! location steps over an already-built [`triage_memory::ResponseIndex`].

/// Arrival-time estimates for the location step.
pub mod eta;
/// Request logging.
pub mod middleware;
/// HTML fragments for each step.
pub mod pages;
/// Per-step conversation logic.
pub mod router;
/// Form field cleaning and length limits.
pub mod sanitizer;
/// Routes and the axum application.
pub mod server;

pub use eta::EtaRange;
pub use router::{BotSettings, Choice, ConversationRouter, Reply};
pub use server::GatewayServer;
