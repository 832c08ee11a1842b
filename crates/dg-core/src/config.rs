//! Generation request configuration
//!
//! Deserialised configs go through the same checks as
//! [`GenConfig::from_dimensions`]: negative or oversized sides are rejected
//! and small ones are clamped. Fields can still be set directly, so
//! generation clamps again through [`GenConfig::clamped_size`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::rng::GenRng;
use crate::{MAX_DIMENSION, MIN_HEIGHT, MIN_WIDTH};

/// Size and seed of one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct GenConfig {
    pub width: usize,
    pub height: usize,
    /// Fixed seed, or `None` to draw one from entropy
    pub seed: Option<u64>,
}

/// On-disk shape, before validation
#[derive(Debug, Deserialize)]
struct RawConfig {
    width: i64,
    height: i64,
    #[serde(default)]
    seed: Option<u64>,
}

impl TryFrom<RawConfig> for GenConfig {
    type Error = GenError;

    fn try_from(raw: RawConfig) -> Result<Self, GenError> {
        let config = Self::from_dimensions(raw.width, raw.height)?;
        Ok(Self {
            seed: raw.seed,
            ..config
        })
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            seed: None,
        }
    }
}

impl GenConfig {
    /// Create a config, raising undersized sides to the minimums
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.clamp(MIN_WIDTH, MAX_DIMENSION),
            height: height.clamp(MIN_HEIGHT, MAX_DIMENSION),
            seed: None,
        }
    }

    /// Build a config from untrusted signed sizes
    ///
    /// Negative and oversized sides are errors; small ones are clamped.
    pub fn from_dimensions(width: i64, height: i64) -> Result<Self, GenError> {
        let width = check_side("width", width)?;
        let height = check_side("height", height)?;
        Ok(Self::new(width, height))
    }

    /// Set a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a JSON config such as `{"width": 30, "height": 20, "seed": 7}`
    pub fn from_json_str(json: &str) -> Result<Self, GenError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Load a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GenError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Width and height raised to the minimums and capped at the maximum
    pub fn clamped_size(&self) -> (usize, usize) {
        (
            self.width.clamp(MIN_WIDTH, MAX_DIMENSION),
            self.height.clamp(MIN_HEIGHT, MAX_DIMENSION),
        )
    }

    /// RNG for this request, seeded when a seed is set
    pub fn rng(&self) -> GenRng {
        match self.seed {
            Some(seed) => GenRng::new(seed),
            None => GenRng::from_entropy(),
        }
    }
}

fn check_side(axis: &'static str, value: i64) -> Result<usize, GenError> {
    if value < 0 {
        return Err(GenError::NegativeDimension { axis, value });
    }
    if value as u64 > MAX_DIMENSION as u64 {
        return Err(GenError::TooLarge {
            axis,
            value,
            max: MAX_DIMENSION,
        });
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_to_minimum() {
        let config = GenConfig::new(1, 2);
        assert_eq!(config.width, MIN_WIDTH);
        assert_eq!(config.height, MIN_HEIGHT);

        let config = GenConfig::new(12, 9);
        assert_eq!((config.width, config.height), (12, 9));
    }

    #[test]
    fn test_from_dimensions_rejects_negative() {
        let err = GenConfig::from_dimensions(-1, 10).unwrap_err();
        assert!(matches!(
            err,
            GenError::NegativeDimension {
                axis: "width",
                value: -1
            }
        ));

        let err = GenConfig::from_dimensions(10, -4).unwrap_err();
        assert!(matches!(err, GenError::NegativeDimension { axis: "height", .. }));
    }

    #[test]
    fn test_from_dimensions_rejects_huge() {
        let err = GenConfig::from_dimensions(10, MAX_DIMENSION as i64 + 1).unwrap_err();
        assert!(matches!(err, GenError::TooLarge { axis: "height", .. }));
    }

    #[test]
    fn test_from_dimensions_zero_is_clamped() {
        let config = GenConfig::from_dimensions(0, 0).unwrap();
        assert_eq!((config.width, config.height), (MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn test_from_json() {
        let config = GenConfig::from_json_str(r#"{"width": 30, "height": 20, "seed": 7}"#).unwrap();
        assert_eq!(config, GenConfig::new(30, 20).with_seed(7));

        let config = GenConfig::from_json_str(r#"{"width": 2, "height": 3}"#).unwrap();
        assert_eq!(config.seed, None);
        assert_eq!((config.width, config.height), (MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            GenConfig::from_json_str("not json"),
            Err(GenError::Config(_))
        ));
        assert!(matches!(
            GenConfig::from_json_str(r#"{"width": -3, "height": 20}"#),
            Err(GenError::NegativeDimension { .. })
        ));
    }

    #[test]
    fn test_deserialize_clamps_small_sides() {
        let config: GenConfig =
            serde_json::from_str(r#"{"width": 2, "height": 3, "seed": 1}"#).unwrap();
        assert_eq!(config, GenConfig::new(MIN_WIDTH, MIN_HEIGHT).with_seed(1));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result = serde_json::from_str::<GenConfig>(r#"{"width": -2, "height": 10}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("width must not be negative"), "{message}");
    }

    #[test]
    fn test_serde_round_trip() {
        let config = GenConfig::new(30, 20).with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<GenConfig>(&json).unwrap(), config);

        let unseeded = GenConfig::new(30, 20);
        let json = serde_json::to_string(&unseeded).unwrap();
        assert_eq!(serde_json::from_str::<GenConfig>(&json).unwrap(), unseeded);
    }

    #[test]
    fn test_clamped_size_of_literal() {
        let config = GenConfig {
            width: 0,
            height: 2,
            seed: None,
        };
        assert_eq!(config.clamped_size(), (MIN_WIDTH, MIN_HEIGHT));
        assert_eq!(GenConfig::new(12, 9).clamped_size(), (12, 9));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GenConfig::load("/nonexistent/dungeon.json").unwrap_err();
        assert!(matches!(err, GenError::Io(_)));
    }

    #[test]
    fn test_seeded_rng() {
        let config = GenConfig::new(10, 10).with_seed(99);
        assert_eq!(config.rng().seed(), 99);
    }
}
