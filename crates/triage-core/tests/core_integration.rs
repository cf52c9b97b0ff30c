#![allow(clippy::unwrap_used, clippy::expect_used)]

use triage_core::*;

// ---------------------------------------------------------------------------
// 1. TriggerResponse deserializes from the config table shape
// ---------------------------------------------------------------------------

#[test]
fn trigger_response_from_json() {
    let json = r#"{"trigger": "burn", "response": "cool the burn under running water."}"#;
    let entry: TriggerResponse = serde_json::from_str(json).unwrap();
    assert_eq!(entry, TriggerResponse::new("burn", "cool the burn under running water."));
}

// ---------------------------------------------------------------------------
// 2. Error Display formatting
// ---------------------------------------------------------------------------

#[test]
fn error_display_formatting() {
    let cases: Vec<(TriageError, &str)> = vec![
        (
            TriageError::Config("bad dimension".into()),
            "Config error: bad dimension",
        ),
        (
            TriageError::Embedding("model offline".into()),
            "Embedding error: model offline",
        ),
        (TriageError::Http("timeout".into()), "HTTP error: timeout"),
        (
            TriageError::Gateway("bind failed".into()),
            "Gateway error: bind failed",
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.to_string(), expected);
    }
}

#[test]
fn error_from_io_and_json() {
    let io: TriageError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(io.to_string().starts_with("IO error:"));

    let json_err = serde_json::from_str::<TriggerResponse>("{").unwrap_err();
    let err: TriageError = json_err.into();
    assert!(err.to_string().starts_with("JSON error:"));
}

// ---------------------------------------------------------------------------
// 3. Validation over the built-in table and custom tables
// ---------------------------------------------------------------------------

#[test]
fn default_table_has_unique_triggers() {
    let table = default_responses();
    assert_eq!(table.len(), 3);
    validate_responses(&table).unwrap();
}

#[test]
fn duplicate_reported_after_first_occurrence() {
    let table = vec![
        TriggerResponse::new("choking", "x"),
        TriggerResponse::new("burn", "y"),
        TriggerResponse::new("choking", "z"),
    ];
    let err = validate_responses(&table).unwrap_err();
    assert!(err.to_string().contains("choking"));
}

#[test]
fn fallback_constant() {
    assert_eq!(DEFAULT_FALLBACK_RESPONSE, "Call 911 immediately.");
}
