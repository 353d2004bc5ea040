//! Session configuration, fixed once a session is constructed.

use crate::error::ConfigError;
use crate::types::{DEFAULT_HEIGHT, DEFAULT_TRAVEL_MS, DEFAULT_WIDTH, DEFAULT_WIN_VALUE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: u16,
    pub height: u16,
    /// A tile of exactly this value wins the session
    pub win_value: u32,
    /// Slide animation duration; the core only copies it into move batches
    pub travel_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            win_value: DEFAULT_WIN_VALUE,
            travel_ms: DEFAULT_TRAVEL_MS,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    ///
    /// - `TILE_MERGE_WIDTH` / `TILE_MERGE_HEIGHT`: grid size (default 4x4)
    /// - `TILE_MERGE_WIN`: win value (default 2048)
    /// - `TILE_MERGE_TRAVEL_MS`: animation duration (default 200)
    ///
    /// Missing or unparseable values fall back to the defaults. The result is
    /// not validated here; [`GameSession::new`](crate::GameSession::new) does that.
    pub fn from_env() -> Self {
        use std::env;

        fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
            env::var(name)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        }

        let defaults = Self::default();
        Self {
            width: parse_var("TILE_MERGE_WIDTH", defaults.width),
            height: parse_var("TILE_MERGE_HEIGHT", defaults.height),
            win_value: parse_var("TILE_MERGE_WIN", defaults.win_value),
            travel_ms: parse_var("TILE_MERGE_TRAVEL_MS", defaults.travel_ms),
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_win_value(mut self, win_value: u32) -> Self {
        self.win_value = win_value;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.win_value < 4 || !self.win_value.is_power_of_two() {
            return Err(ConfigError::InvalidWinValue(self.win_value));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.width, 4);
        assert_eq!(config.height, 4);
        assert_eq!(config.win_value, 2048);
        assert_eq!(config.cell_count(), 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_grid() {
        let err = SessionConfig::default().with_size(0, 4).validate();
        assert_eq!(
            err,
            Err(ConfigError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(SessionConfig::default().with_size(3, 0).validate().is_err());
    }

    #[test]
    fn rejects_bad_win_values() {
        for bad in [0, 2, 3, 100, 2047] {
            assert_eq!(
                SessionConfig::default().with_win_value(bad).validate(),
                Err(ConfigError::InvalidWinValue(bad))
            );
        }
        assert!(SessionConfig::default().with_win_value(8).validate().is_ok());
    }

    #[test]
    fn from_env_falls_back_to_defaults() {
        std::env::set_var("TILE_MERGE_WIDTH", "not-a-number");
        std::env::set_var("TILE_MERGE_HEIGHT", " 6 ");
        let config = SessionConfig::from_env();
        std::env::remove_var("TILE_MERGE_WIDTH");
        std::env::remove_var("TILE_MERGE_HEIGHT");

        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, 6);
        assert_eq!(config.win_value, DEFAULT_WIN_VALUE);
    }
}
