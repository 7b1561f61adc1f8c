//! Maps raw generation errors to text suitable for the terminal.

const GENERIC: &str = "There was an error generating your application. Please try again.";

/// Substring → friendly text, checked in order.
const FRIENDLY_MESSAGES: &[(&str, &str)] = &[
    ("503", "AI model is loading. Please wait a moment and try again."),
    ("rate limit", "Too many requests. Please wait a moment before trying again."),
    ("404", "API endpoint not found. Please check your deployment."),
];

pub fn friendly_error_message(error: &str) -> &'static str {
    FRIENDLY_MESSAGES
        .iter()
        .find(|(needle, _)| error.contains(needle))
        .map(|(_, message)| *message)
        .unwrap_or(GENERIC)
}
