//! Filter parameters and the persisted settings container.
//!
//! The string forms (`both`, `low_pass`, `ortho`, ...) are the names accepted on the
//! command line and stored in the settings file.

use crate::error::FilterError;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Frequency axis an ideal filter acts on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Both the horizontal and the vertical frequency are limited.
    #[default]
    Both,
    /// Only the horizontal (column) frequency is limited.
    Horizontal,
    /// Only the vertical (row) frequency is limited.
    Vertical,
}

/// Whether frequencies below or above the cutoff are kept.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassMode {
    #[default]
    LowPass,
    HighPass,
}

/// Scaling applied after every inverse transform.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Divide by the transform length `n`.
    #[default]
    Backward,
    /// Divide by `sqrt(n)`.
    Ortho,
}

impl Normalization {
    /// Factor every element of an inverse transform of length `n` is multiplied with.
    pub fn inverse_scale(self, n: usize) -> f64 {
        match self {
            Normalization::Backward => 1.0 / n as f64,
            Normalization::Ortho => 1.0 / (n as f64).sqrt(),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Both => write!(f, "both"),
            Direction::Horizontal => write!(f, "horizontal"),
            Direction::Vertical => write!(f, "vertical"),
        }
    }
}

impl FromStr for Direction {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(Direction::Both),
            "horizontal" => Ok(Direction::Horizontal),
            "vertical" => Ok(Direction::Vertical),
            other => Err(FilterError::invalid(format!(
                "direction must be 'both', 'horizontal' or 'vertical', got '{other}'"
            ))),
        }
    }
}

impl Display for PassMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PassMode::LowPass => write!(f, "low_pass"),
            PassMode::HighPass => write!(f, "high_pass"),
        }
    }
}

impl FromStr for PassMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low_pass" => Ok(PassMode::LowPass),
            "high_pass" => Ok(PassMode::HighPass),
            other => Err(FilterError::invalid(format!(
                "filter_type must be 'low_pass' or 'high_pass', got '{other}'"
            ))),
        }
    }
}

impl Display for Normalization {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Normalization::Backward => write!(f, "backward"),
            Normalization::Ortho => write!(f, "ortho"),
        }
    }
}

impl FromStr for Normalization {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backward" | "none" => Ok(Normalization::Backward),
            "ortho" => Ok(Normalization::Ortho),
            other => Err(FilterError::invalid(format!(
                "norm must be 'backward' or 'ortho', got '{other}'"
            ))),
        }
    }
}

/// Settings of a filter run, persisted between invocations of the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Registry name of the filter to run.
    pub filter: String,
    /// Cutoff frequency in radians.
    pub cutoff: f64,
    pub direction: Direction,
    pub filter_type: PassMode,
    /// Side length of the averaging kernel (odd).
    pub kernel_size: usize,
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            filter: "Ideal DFT Filter".to_string(),
            cutoff: FRAC_PI_2,
            direction: Direction::Both,
            filter_type: PassMode::LowPass,
            kernel_size: 3,
        }
    }
}

impl FilterSettings {
    /// Applies a single `key=value` override as given on the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        match key {
            "filter" => self.filter = value.to_string(),
            "wc" | "cutoff" => {
                self.cutoff = value
                    .parse()
                    .map_err(|_| FilterError::invalid(format!("cutoff '{value}' is not a number")))?
            }
            "direction" => self.direction = value.parse()?,
            "filter_type" | "type" => self.filter_type = value.parse()?,
            "size" | "kernel_size" => {
                self.kernel_size = value.parse().map_err(|_| {
                    FilterError::invalid(format!("kernel size '{value}' is not an integer"))
                })?
            }
            other => return Err(FilterError::invalid(format!("unknown setting '{other}'"))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parses_known_names_only() {
        assert_eq!("both".parse::<Direction>().unwrap(), Direction::Both);
        assert_eq!(
            "horizontal".parse::<Direction>().unwrap(),
            Direction::Horizontal
        );
        assert_eq!("vertical".parse::<Direction>().unwrap(), Direction::Vertical);
        let err = "diagonal".parse::<Direction>().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_pass_mode_display_roundtrips_through_from_str() {
        for mode in [PassMode::LowPass, PassMode::HighPass] {
            assert_eq!(mode.to_string().parse::<PassMode>().unwrap(), mode);
        }
        assert!("band_pass".parse::<PassMode>().is_err());
    }

    #[test]
    fn test_normalization_accepts_none_alias() {
        assert_eq!(
            "none".parse::<Normalization>().unwrap(),
            Normalization::Backward
        );
        assert_eq!("ortho".parse::<Normalization>().unwrap(), Normalization::Ortho);
        assert_eq!(Normalization::Ortho.inverse_scale(16), 0.25);
        assert_eq!(Normalization::Backward.inverse_scale(16), 1.0 / 16.0);
    }

    #[test]
    fn test_settings_overrides() {
        let mut settings = FilterSettings::default();
        assert_eq!(settings.cutoff, FRAC_PI_2);

        settings.set("wc", "1.25").unwrap();
        settings.set("direction", "vertical").unwrap();
        settings.set("type", "high_pass").unwrap();
        settings.set("size", "7").unwrap();
        assert_eq!(settings.cutoff, 1.25);
        assert_eq!(settings.direction, Direction::Vertical);
        assert_eq!(settings.filter_type, PassMode::HighPass);
        assert_eq!(settings.kernel_size, 7);

        assert!(settings.set("wc", "fast").is_err());
        assert!(settings.set("colour", "red").is_err());
    }
}
