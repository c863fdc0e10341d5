//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key bindings)
//! - The countdown interval timer
//! - Teardown of everything a mounted game registered
//! - Storage (LocalStorage on web)
//! - Page URL parameters

pub mod clock;
pub mod input;
pub mod lifecycle;
pub mod storage;

pub use clock::{CountdownBinding, IntervalHost};
pub use input::{key_from_event_key, should_prevent_default};
pub use lifecycle::Lifecycle;

/// Value of `name` in a URL query string such as `?game=math&difficulty=hard`
pub fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("?game=math&difficulty=hard", "difficulty"), Some("hard"));
        assert_eq!(query_param("game=math", "game"), Some("math"));
        assert_eq!(query_param("?game=", "game"), None);
        assert_eq!(query_param("?flag&game=x", "game"), Some("x"));
        assert_eq!(query_param("", "game"), None);
    }
}
