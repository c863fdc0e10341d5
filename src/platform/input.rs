//! Physical key bindings

use crate::sim::Key;

/// Map a DOM `KeyboardEvent.key` value to a game key
pub fn key_from_event_key(key: &str) -> Option<Key> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Key::Left),
        "ArrowRight" | "d" | "D" => Some(Key::Right),
        "ArrowUp" | "w" | "W" => Some(Key::Up),
        "ArrowDown" | "s" | "S" => Some(Key::Down),
        " " | "Spacebar" => Some(Key::Fire),
        "Escape" | "p" | "P" => Some(Key::Pause),
        _ => None,
    }
}

/// Keys whose browser default (scrolling) must be suppressed
pub fn should_prevent_default(key: Key) -> bool {
    matches!(key, Key::Up | Key::Down | Key::Fire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(key_from_event_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(key_from_event_key("A"), Some(Key::Left));
        assert_eq!(key_from_event_key("d"), Some(Key::Right));
        assert_eq!(key_from_event_key("w"), Some(Key::Up));
        assert_eq!(key_from_event_key("ArrowDown"), Some(Key::Down));
        assert_eq!(key_from_event_key(" "), Some(Key::Fire));
        assert_eq!(key_from_event_key("Escape"), Some(Key::Pause));
        assert_eq!(key_from_event_key("Enter"), None);
    }

    #[test]
    fn test_space_does_not_scroll() {
        assert!(should_prevent_default(Key::Fire));
        assert!(!should_prevent_default(Key::Left));
    }
}
