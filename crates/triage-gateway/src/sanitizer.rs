/// Cleans free-text form fields before they reach the index or a page.
#[derive(Debug, Clone)]
pub struct FieldSanitizer {
    max_chars: usize,
}

impl Default for FieldSanitizer {
    fn default() -> Self {
        Self { max_chars: 2000 }
    }
}

impl FieldSanitizer {
    /// Creates a sanitizer accepting at most `max_chars` characters per field.
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Strip control characters (newlines and tabs survive) and enforce the
    /// length limit.
    ///
    /// An empty field is accepted as-is; a field that was non-empty but
    /// consisted only of control characters is rejected.
    pub fn sanitize(&self, input: &str) -> Field {
        if input.chars().count() > self.max_chars {
            return Field::Rejected(format!(
                "Input exceeds {} characters",
                self.max_chars
            ));
        }

        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
            .collect();

        if cleaned.is_empty() && !input.is_empty() {
            return Field::Rejected("Input contains only control characters".to_string());
        }

        Field::Accepted(cleaned)
    }
}

/// Outcome of sanitizing one form field.
#[derive(Debug, PartialEq)]
pub enum Field {
    /// The cleaned text.
    Accepted(String),
    /// The field was refused, with the reason.
    Rejected(String),
}

impl Field {
    /// Returns the cleaned text, or `None` if rejected.
    pub fn into_text(self) -> Option<String> {
        match self {
            Field::Accepted(s) => Some(s),
            Field::Rejected(_) => None,
        }
    }
}
