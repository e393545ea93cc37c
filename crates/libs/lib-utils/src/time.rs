//! # Time Utilities

use chrono::Utc;

/// Current Unix time in whole seconds (used for signed upload timestamps).
pub fn unix_timestamp() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_timestamp_is_recent() {
        // 2025-01-01T00:00:00Z
        assert!(unix_timestamp() > 1_735_689_600);
    }
}
