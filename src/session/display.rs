//! The single message region showing the latest recognition outcome.

use crate::recognition::RecognitionOutcome;

/// Prefix of a successful recognition message.
pub const SUCCESS_PREFIX: &str = "AI Recognition: ";

/// Message shown for every failed recognition, whatever the cause.
pub const FAILURE_MESSAGE: &str = "Recognition failed. Please try again.";

/// Text sink for recognition results.
///
/// Blank until the first outcome arrives; cleared by the clear command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultDisplay {
    text: String,
}

impl ResultDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the message with the one for `outcome`.
    pub fn show(&mut self, outcome: &RecognitionOutcome) {
        self.text = match outcome {
            RecognitionOutcome::Success(description) => format!("{SUCCESS_PREFIX}{description}"),
            RecognitionOutcome::Failure(_) => FAILURE_MESSAGE.to_string(),
        };
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_success_and_hides_failure_cause() {
        let mut display = ResultDisplay::new();
        assert!(display.is_empty());

        display.show(&RecognitionOutcome::Success("a cat".to_string()));
        assert_eq!(display.text(), "AI Recognition: a cat");

        display.show(&RecognitionOutcome::Failure("HTTP 500: boom".to_string()));
        assert_eq!(display.text(), "Recognition failed. Please try again.");

        display.clear();
        assert_eq!(display.text(), "");
    }
}
