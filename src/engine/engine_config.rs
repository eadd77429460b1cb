//! Engine configuration.
//!
//! Options are set by name (`castling`, `promotion`) so that callers reading
//! them from text sources such as the environment or a command line share one
//! validation path.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chess_errors::ConfigError;
use crate::game_state::chess_rules::CastlingRules;
use crate::game_state::chess_types::PieceKind;

pub const CASTLING_ENV_VAR: &str = "CHESS_ARBITER_CASTLING";
pub const PROMOTION_ENV_VAR: &str = "CHESS_ARBITER_PROMOTION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub castling: CastlingRules,
    /// Piece a pawn becomes when the caller does not choose one.
    pub default_promotion: PieceKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            castling: CastlingRules::Standard,
            default_promotion: PieceKind::Queen,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `CHESS_ARBITER_CASTLING` and
    /// `CHESS_ARBITER_PROMOTION`. Bad values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        for (var, option) in [(CASTLING_ENV_VAR, "castling"), (PROMOTION_ENV_VAR, "promotion")] {
            let Some(value) = lookup(var) else {
                continue;
            };
            if let Err(err) = config.set_option(option, &value) {
                warn!("[CONFIG] Ignoring {}: {}", var, err);
            }
        }
        config
    }

    /// Replaces a `default_promotion` no pawn can become with the queen.
    pub fn sanitized(self) -> Self {
        if self.default_promotion.is_promotion_target() {
            return self;
        }
        warn!(
            "[CONFIG] Default promotion {:?} is not a promotion piece, using Queen",
            self.default_promotion
        );
        Self {
            default_promotion: PieceKind::Queen,
            ..self
        }
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_owned(),
            value: value.to_owned(),
        };

        match name.trim().to_ascii_lowercase().as_str() {
            "castling" => {
                self.castling = parse_castling_rules(value).ok_or_else(invalid)?;
            }
            "promotion" => {
                let mut chars = value.trim().chars();
                let kind = match (chars.next(), chars.next()) {
                    (Some(letter), None) => PieceKind::from_letter(letter),
                    _ => None,
                };
                self.default_promotion = kind
                    .filter(|kind| kind.is_promotion_target())
                    .ok_or_else(invalid)?;
            }
            _ => return Err(ConfigError::UnknownOption(name.to_owned())),
        }

        Ok(())
    }
}

fn parse_castling_rules(value: &str) -> Option<CastlingRules> {
    match value.trim().to_ascii_lowercase().as_str() {
        "standard" => Some(CastlingRules::Standard),
        "king-only" | "king_only" | "kingonly" => Some(CastlingRules::KingOnly),
        _ => None,
    }
}
