//! Card settings. Defaults reproduce the page exactly; a JSON document can
//! override any subset of fields when the `serde_json` feature is enabled.

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::error::{CardError, Result};

pub const BUTTON_ID: &str = "showMessageButton";
pub const REGION_ID: &str = "specialMessage";
pub const HEART_CLASS: &str = "heart";
/// U+2764 HEAVY BLACK HEART.
pub const HEART_GLYPH: char = '\u{2764}';

/// Matches the region's CSS opacity transition.
pub const FADE_MS: u32 = 400;
pub const SPAWN_PERIOD_MS: u32 = 300;
pub const HEART_LIFETIME_MS: u32 = 5000;
pub const LEFT_VW: (f64, f64) = (0.0, 100.0);
pub const FALL_SECS: (f64, f64) = (3.0, 5.0);

// A heart must never be removed before its fall animation can finish.
const _: () = assert!(HEART_LIFETIME_MS as f64 >= FALL_SECS.1 * 1000.0);

/// Default messages shown by the card, in display order.
pub const MESSAGES: &[&str] = &[
    "Com você, a vida não tem 'bugs'!",
    "Obrigado por 'debugar' nossos problemas com tanto amor!",
    "Seu amor é o 'kernel' que mantém nosso sistema funcionando!",
    "Você transforma qualquer 'erro 404' da vida em 'página encontrada' com sucesso!",
    "Mãe: nossa 'desenvolvedora full-stack' de felicidade!",
];

/// Timing and randomization for falling hearts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct HeartSettings {
    pub spawn_period_ms: u32,
    pub lifetime_ms: u32,
    /// Horizontal offset range in viewport-width percent, half-open.
    pub left_vw: (f64, f64),
    /// Fall animation duration range in seconds, half-open.
    pub fall_secs: (f64, f64),
    pub glyph: char,
    pub class: String,
}

impl Default for HeartSettings {
    fn default() -> Self {
        Self {
            spawn_period_ms: SPAWN_PERIOD_MS,
            lifetime_ms: HEART_LIFETIME_MS,
            left_vw: LEFT_VW,
            fall_secs: FALL_SECS,
            glyph: HEART_GLYPH,
            class: HEART_CLASS.to_string(),
        }
    }
}

impl HeartSettings {
    pub fn validate(&self) -> Result<()> {
        if self.spawn_period_ms == 0 {
            return Err(CardError::Config("spawn_period_ms must be positive".into()));
        }
        check_range("left_vw", self.left_vw)?;
        check_range("fall_secs", self.fall_secs)?;
        if self.fall_secs.0 < 0.0 {
            return Err(CardError::Config("fall_secs must not be negative".into()));
        }
        if f64::from(self.lifetime_ms) < self.fall_secs.1 * 1000.0 {
            return Err(CardError::Config(format!(
                "lifetime_ms ({}) is shorter than the longest fall ({}s)",
                self.lifetime_ms, self.fall_secs.1
            )));
        }
        if self.class.trim().is_empty() {
            return Err(CardError::Config("heart class must not be empty".into()));
        }
        Ok(())
    }
}

fn check_range(name: &str, (lo, hi): (f64, f64)) -> Result<()> {
    if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
        return Err(CardError::Config(format!("{name} range [{lo}, {hi}) is empty")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct CardConfig {
    pub button_id: String,
    pub region_id: String,
    pub messages: Vec<String>,
    pub fade_ms: u32,
    pub hearts: HeartSettings,
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub log_level: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            button_id: BUTTON_ID.to_string(),
            region_id: REGION_ID.to_string(),
            messages: MESSAGES.iter().map(|m| m.to_string()).collect(),
            fade_ms: FADE_MS,
            hearts: HeartSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl CardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.messages.is_empty() {
            return Err(CardError::EmptyMessages);
        }
        if self.button_id.is_empty() || self.region_id.is_empty() {
            return Err(CardError::Config("element ids must not be empty".into()));
        }
        self.level()?;
        self.hearts.validate()
    }

    pub fn level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| CardError::Config(format!("unknown log level '{}'", self.log_level)))
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| CardError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
