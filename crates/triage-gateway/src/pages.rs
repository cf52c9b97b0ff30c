//! HTML fragments served by the conversation steps.
//!
//! Anything that originates from a user or from configuration goes through
//! [`escape_html`] before being embedded.

/// Prompt shown whenever the first answer is neither choice.
pub const NOT_UNDERSTOOD: &str = "I don't understand that. Are you having an emergency or would you like to leave a message? (emergency/message)";

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Landing page asking whether this is an emergency or a message.
pub fn welcome() -> String {
    r#"<html><head>
<style>
    body { font-family: Arial, sans-serif; margin: 40px; background-color: #f4f4f9; }
    h1 { color: #333; }
    form { margin-top: 20px; }
    input[type="text"], textarea { padding: 10px; width: 300px; margin-bottom: 10px; border-radius: 5px; border: 1px solid #ccc; }
    input[type="submit"] { padding: 10px 20px; background-color: #5cb85c; color: white; border: none; border-radius: 5px; cursor: pointer; }
    input[type="submit"]:hover { background-color: #4cae4c; }
</style>
</head><body>
<h1>Hello, are you having an emergency or would you like to leave a message? (emergency/message)</h1>
<form action="/handle_input" method="post">
    <input type="text" name="text" placeholder="Enter 'emergency' or 'message'"/>
    <input type="submit" value="Submit"/>
</form>
</body></html>
"#
    .to_string()
}

/// Form asking for a description of the emergency.
pub fn emergency_form() -> String {
    r#"<html><body>
What is the emergency?
<form action="/emergency_response" method="post">
    <input type="text" name="emergency_type" placeholder="Enter the type of emergency"/>
    <input type="submit" value="Submit"/>
</form>
</body></html>
"#
    .to_string()
}

/// Form collecting a free-text message.
pub fn message_form() -> String {
    r#"<html><body>
Please leave your message.
<form action="/message" method="post">
    <textarea name="text"></textarea>
    <input type="submit" value="Submit"/>
</form>
</body></html>
"#
    .to_string()
}

/// First-aid instructions followed by the location form.
pub fn instructions(response: &str) -> String {
    let response = response.trim_end().trim_end_matches('.');
    format!(
        "Emergency instructions: {}. Meanwhile, can you tell me which area are you located right now?<br>\
         <form action='/location' method='post'>\
         <input type='text' name='text' placeholder='Enter your location'/>\
         <input type='submit' value='Submit'/></form>",
        escape_html(response)
    )
}

/// Acknowledgement for a left message.
pub fn message_received(doctor: &str, message: &str) -> String {
    format!(
        "Thanks for the message, we will forward it to {}: {}",
        escape_html(doctor),
        escape_html(message)
    )
}

/// Arrival estimate after the location step.
pub fn arrival(doctor: &str, eta_minutes: u32) -> String {
    format!(
        "{} will be at your location in approximately {eta_minutes} minutes. \
         Please follow the emergency instructions provided. \
         If the situation worsens, call 911 immediately.",
        escape_html(doctor)
    )
}

/// Shown when a submitted field fails sanitization.
pub fn rejected() -> String {
    "Message rejected: invalid content".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_instructions_no_double_period() {
        let page = instructions("apply pressure to the wound with a clean cloth.");
        assert!(page.starts_with(
            "Emergency instructions: apply pressure to the wound with a clean cloth. Meanwhile"
        ));
        assert!(page.contains("action='/location'"));
    }

    #[test]
    fn test_message_received_escapes() {
        let page = message_received("Dr. Adrin", "<b>hi</b>");
        assert_eq!(
            page,
            "Thanks for the message, we will forward it to Dr. Adrin: &lt;b&gt;hi&lt;/b&gt;"
        );
    }

    #[test]
    fn test_arrival_text() {
        assert_eq!(
            arrival("Dr. Adrin", 12),
            "Dr. Adrin will be at your location in approximately 12 minutes. Please follow the emergency instructions provided. If the situation worsens, call 911 immediately."
        );
    }

    #[test]
    fn test_forms_post_to_next_step() {
        assert!(welcome().contains(r#"action="/handle_input""#));
        assert!(emergency_form().contains(r#"name="emergency_type""#));
        assert!(message_form().contains(r#"action="/message""#));
    }
}
