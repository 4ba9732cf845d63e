// ABOUTME: Shared utility functions for Taxify
// ABOUTME: Income ID generation and calendar helpers

use chrono::{Local, NaiveDate};

/// Generate a unique income ID (12-character URL-safe nanoid)
pub fn generate_income_id() -> String {
    nanoid::nanoid!(12)
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_income_id() {
        let id1 = generate_income_id();
        let id2 = generate_income_id();

        assert_eq!(id1.len(), 12);
        assert_eq!(id2.len(), 12);
        assert_ne!(id1, id2);

        // Should be URL-safe characters only
        assert!(id1
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    }
}
