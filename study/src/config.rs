//! Configuration for game sessions.
//!
//! Controls the header text written into finalized PGN. Every value has a
//! compile-time default and can be overridden at runtime via a dedicated
//! environment variable.

/// Default `Event` header.
const DEFAULT_EVENT: &str = "Casual game";

/// Default `Site` header.
const DEFAULT_SITE: &str = "Chess study";

/// Default `White`/`Black` header for a human-driven side.
const DEFAULT_HUMAN_LABEL: &str = "Player";

/// Default `White`/`Black` header for an externally driven side.
const DEFAULT_EXTERNAL_LABEL: &str = "Computer";

/// PGN header text used when a session finalizes its game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub event: String,
    pub site: String,
    pub human_label: String,
    pub external_label: String,
}

impl SessionConfig {
    /// Build the configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            event: get_event(),
            site: get_site(),
            human_label: get_human_label(),
            external_label: get_external_label(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event: DEFAULT_EVENT.to_string(),
            site: DEFAULT_SITE.to_string(),
            human_label: DEFAULT_HUMAN_LABEL.to_string(),
            external_label: DEFAULT_EXTERNAL_LABEL.to_string(),
        }
    }
}

/// Get the `Event` header value.
///
/// Priority:
/// 1. `CHESSTUDY_EVENT` env variable if set
/// 2. `Casual game` as fallback
pub fn get_event() -> String {
    env_or("CHESSTUDY_EVENT", DEFAULT_EVENT)
}

/// Get the `Site` header value.
///
/// Priority:
/// 1. `CHESSTUDY_SITE` env variable if set
/// 2. `Chess study` as fallback
pub fn get_site() -> String {
    env_or("CHESSTUDY_SITE", DEFAULT_SITE)
}

/// Get the player name written for a human-driven side.
///
/// Priority:
/// 1. `CHESSTUDY_HUMAN_LABEL` env variable if set
/// 2. `Player` as fallback
pub fn get_human_label() -> String {
    env_or("CHESSTUDY_HUMAN_LABEL", DEFAULT_HUMAN_LABEL)
}

/// Get the player name written for an externally driven side.
///
/// Priority:
/// 1. `CHESSTUDY_EXTERNAL_LABEL` env variable if set
/// 2. `Computer` as fallback
pub fn get_external_label() -> String {
    env_or("CHESSTUDY_EXTERNAL_LABEL", DEFAULT_EXTERNAL_LABEL)
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
