//! Enhanced request extractors with improved error handling and validation.
//!
//! These are drop-in replacements for their axum counterparts. Every rejection
//! is converted into the server's [`Error`](crate::handler::Error) envelope, so
//! a malformed body or path never leaks a framework-specific response shape.

pub mod enhanced_json;
pub mod enhanced_path;
pub mod enhanced_query;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;
pub use self::validated_json::ValidateJson;

/// Keeps the first `lines` lines of a rejection message, capped at `chars` characters.
fn sanitize_error_message(message: &str, lines: usize, chars: usize) -> String {
    message
        .lines()
        .take(lines)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize_error_message;

    #[test]
    fn sanitize_truncates_lines_and_length() {
        let message = "first line\nsecond line\nthird line";
        assert_eq!(sanitize_error_message(message, 2, 100), "first line second line");
        assert_eq!(sanitize_error_message(message, 3, 5), "first");
    }
}
