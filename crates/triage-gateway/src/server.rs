use crate::middleware::log_requests;
use crate::pages;
use crate::router::{BotSettings, ConversationRouter, Reply};
use axum::{
    extract::State,
    http::StatusCode,
    middleware as axum_mw,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use triage_memory::ResponseIndex;

/// Shared application state.
pub struct AppState {
    /// Step logic shared by every handler.
    pub router: ConversationRouter,
}

/// Form body carrying a single `text` field.
#[derive(Debug, Default, Deserialize)]
pub struct TextForm {
    /// Submitted text; missing means empty.
    #[serde(default)]
    pub text: String,
}

/// Form body of the emergency description step.
#[derive(Debug, Default, Deserialize)]
pub struct EmergencyForm {
    /// Free-text description of the emergency; missing means empty.
    #[serde(default)]
    pub emergency_type: String,
}

/// The triage web layer.
pub struct GatewayServer;

impl GatewayServer {
    /// Build the router with default step settings.
    pub fn build(index: Arc<ResponseIndex>) -> Router {
        Self::build_with_settings(index, BotSettings::default())
    }

    /// Build the router over an already-built index.
    pub fn build_with_settings(index: Arc<ResponseIndex>, settings: BotSettings) -> Router {
        let state = Arc::new(AppState {
            router: ConversationRouter::new(index, settings),
        });

        Router::new()
            .route("/", get(welcome_handler))
            .route("/handle_input", post(handle_input_handler))
            .route("/emergency_response", post(emergency_handler))
            .route("/message", post(message_handler))
            .route("/location", post(location_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(axum_mw::from_fn(log_requests))
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Page(body) => Html(body).into_response(),
            Reply::Rejected(body) => (StatusCode::BAD_REQUEST, Html(body)).into_response(),
        }
    }
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "triage",
        "entries": state.router.index().len(),
    }))
}

async fn welcome_handler() -> Html<String> {
    Html(pages::welcome())
}

async fn handle_input_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TextForm>,
) -> Reply {
    state.router.choose(&form.text)
}

async fn emergency_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<EmergencyForm>,
) -> Reply {
    state.router.emergency(&form.emergency_type).await
}

async fn message_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TextForm>,
) -> Reply {
    state.router.message(&form.text)
}

async fn location_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TextForm>,
) -> Reply {
    state.router.location(&form.text)
}
