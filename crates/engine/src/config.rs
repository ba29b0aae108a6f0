//! Session configuration read from the environment

use std::env;

/// Default bound on queued, unprocessed commands.
pub const DEFAULT_COMMAND_BUFFER: usize = 64;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seed for a reproducible piece sequence; `None` draws from OS entropy.
    pub seed: Option<u32>,
    /// Append session events as JSON lines to this file.
    pub event_log_path: Option<String>,
    pub command_buffer: usize,
    /// Start a game as soon as the session is spawned.
    pub autostart: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            event_log_path: None,
            command_buffer: DEFAULT_COMMAND_BUFFER,
            autostart: true,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = lookup("TETRIS_SEED").and_then(|s| s.trim().parse().ok());

        let event_log_path = lookup("TETRIS_EVENT_LOG")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let command_buffer = lookup("TETRIS_COMMAND_BUFFER")
            .and_then(|s| s.trim().parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(DEFAULT_COMMAND_BUFFER);

        let autostart = lookup("TETRIS_AUTOSTART")
            .map(|v| {
                let v = v.trim().to_lowercase();
                v == "1" || v == "true"
            })
            .unwrap_or(true);

        Self {
            seed,
            event_log_path,
            command_buffer,
            autostart,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SessionConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_reads_all_keys() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("TETRIS_SEED", "12345"),
            ("TETRIS_EVENT_LOG", " /tmp/events.jsonl "),
            ("TETRIS_COMMAND_BUFFER", "8"),
            ("TETRIS_AUTOSTART", "false"),
        ]));
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.event_log_path.as_deref(), Some("/tmp/events.jsonl"));
        assert_eq!(config.command_buffer, 8);
        assert!(!config.autostart);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("TETRIS_SEED", "-3"),
            ("TETRIS_EVENT_LOG", "   "),
            ("TETRIS_COMMAND_BUFFER", "0"),
            ("TETRIS_AUTOSTART", "TRUE"),
        ]));
        assert_eq!(config.seed, None);
        assert_eq!(config.event_log_path, None);
        assert_eq!(config.command_buffer, DEFAULT_COMMAND_BUFFER);
        assert!(config.autostart);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = SessionConfig::from_env();
    }
}
