use serde::{Deserialize, Serialize};

use crate::ConfigError;

use super::Millis;

pub const FALL_INTERVAL_MS: Millis = 200;
pub const FAST_FALL_INTERVAL_MS: Millis = 50;
pub const HARD_DROP_CHARGE_MS: Millis = 500;
pub const GRACE_MS: Millis = 500;
pub const SCORE_PER_LINE: usize = 100;

/// Timing and scoring parameters of a session.
///
/// Defaults are the standard game constants. Any field may be omitted when
/// deserializing; missing fields take their default.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config = GameConfig::default();
/// assert_eq!(config.fall_interval_ms, 200);
/// assert_eq!(config.fast_fall_interval_ms, 50);
/// assert_eq!(config.score_per_line, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Gravity interval while the soft-drop key is released.
    pub fall_interval_ms: Millis,
    /// Gravity interval while the soft-drop key is held.
    pub fast_fall_interval_ms: Millis,
    /// How long soft-drop must be held before a hard drop fires.
    pub hard_drop_charge_ms: Millis,
    /// How long a landed piece may still be moved before it locks.
    pub grace_ms: Millis,
    /// Points per cleared line.
    pub score_per_line: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fall_interval_ms: FALL_INTERVAL_MS,
            fast_fall_interval_ms: FAST_FALL_INTERVAL_MS,
            hard_drop_charge_ms: HARD_DROP_CHARGE_MS,
            grace_ms: GRACE_MS,
            score_per_line: SCORE_PER_LINE,
        }
    }
}

impl GameConfig {
    /// Checks that both gravity intervals are non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "fall_interval_ms",
            });
        }
        if self.fast_fall_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "fast_fall_interval_ms",
            });
        }
        Ok(())
    }

    /// Gravity interval for the current soft-drop key state.
    #[must_use]
    pub fn gravity_interval(&self, soft_drop_held: bool) -> Millis {
        if soft_drop_held {
            self.fast_fall_interval_ms
        } else {
            self.fall_interval_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_interval() {
        let config = GameConfig::default();
        assert_eq!(config.gravity_interval(false), 200);
        assert_eq!(config.gravity_interval(true), 50);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "grace_ms": 750 }"#).unwrap();
        assert_eq!(
            config,
            GameConfig {
                grace_ms: 750,
                ..GameConfig::default()
            }
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<GameConfig>(r#"{ "level": 3 }"#).is_err());
    }

    #[test]
    fn test_validate_zero_interval() {
        let config = GameConfig {
            fast_fall_interval_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroInterval {
                name: "fast_fall_interval_ms"
            })
        );
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "`fast_fall_interval_ms` must be greater than zero"
        );
    }
}
