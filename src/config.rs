use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::LabError;

/// Canvas and timing settings, read from JSON. Missing keys keep their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub ticks_per_second: u32,
    /// Volts either side of the voltmeter reading kept by a pulse.
    pub equipotential_tolerance: f64,
    /// Motion-mode velocity divisor; slows particles down to watchable speed.
    pub motion_damping: f64,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000.0,
            canvas_height: 800.0,
            ticks_per_second: 60,
            equipotential_tolerance: 1.0,
            motion_damping: 1e15,
        }
    }
}

impl LabConfig {
    /// Pixels per meter.
    pub fn meter(&self) -> f64 {
        self.canvas_width / 10.0
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Describes the first setting the lab cannot run with.
    pub fn problem(&self) -> Option<&'static str> {
        if !(self.canvas_width > 0.0 && self.canvas_width.is_finite()) {
            Some("canvas_width must be a positive number")
        } else if !(self.canvas_height > 0.0 && self.canvas_height.is_finite()) {
            Some("canvas_height must be a positive number")
        } else if self.ticks_per_second == 0 {
            Some("ticks_per_second must be at least 1")
        } else {
            None
        }
    }

    /// Reads `path`; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, LabError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_json(&text).map_err(|source| LabError::Config {
                    path: path.to_path_buf(),
                    source,
                })?;
                match config.problem() {
                    Some(reason) => Err(LabError::InvalidConfig {
                        path: path.to_path_buf(),
                        reason,
                    }),
                    None => Ok(config),
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(LabError::ConfigIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
