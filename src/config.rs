//! Tunables for the gesture engine.
//!
//! [`EngineConfig`] implements [`serde::Deserialize`] so applications can keep
//! it in their own TOML settings. Missing fields fall back to the defaults.
//!
//! # Example
//!
//! ```
//! # use slint_diagram_gestures::EngineConfig;
//! let config = EngineConfig::from_toml_str("grid_size = 8\nsnap_to_grid = true").unwrap();
//! assert_eq!(config.grid_size, 8);
//! assert_eq!(config.handle_size, 20);
//! ```

use serde::Deserialize;

use crate::error::{Error, Result};

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grid spacing, used for keyboard steps and optional drag snapping.
    pub grid_size: i32,

    /// Snap pointer drag deltas toward zero to multiples of `grid_size`.
    pub snap_to_grid: bool,

    /// Side length of the square resize handle at a node's bottom-right corner.
    pub handle_size: i32,

    /// Smallest width a resize gesture may produce.
    pub min_width: i32,

    /// Smallest height a resize gesture may produce.
    pub min_height: i32,

    /// Inset from a node's top-right corner where a keyboard-posted context
    /// menu appears.
    pub popup_offset: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            snap_to_grid: false,
            handle_size: 20,
            min_width: 60,
            min_height: 40,
            popup_offset: 20,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed TOML and [`Error::Config`] when a
    /// value is out of range.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every size is positive.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("grid_size", self.grid_size),
            ("handle_size", self.handle_size),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
        ];
        for (field, value) in checks {
            if value < 1 {
                return Err(Error::Config { field, min: 1, value });
            }
        }
        if self.popup_offset < 0 {
            return Err(Error::Config {
                field: "popup_offset",
                min: 0,
                value: self.popup_offset,
            });
        }
        Ok(())
    }

    /// Snap a drag delta toward zero onto the grid when snapping is enabled.
    ///
    /// A non-positive `grid_size` leaves the delta unsnapped.
    pub fn snap(&self, delta: i32) -> i32 {
        if self.snap_to_grid && self.grid_size > 0 {
            (delta / self.grid_size) * self.grid_size
        } else {
            delta
        }
    }
}
