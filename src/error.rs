use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::controls::Axis;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("{axis} coefficient `{text}` is not an integer")]
    InvalidCoefficient {
        axis: Axis,
        text: String,
        #[source]
        source: ParseIntError,
    },
    #[error("could not read config file {}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {}: {reason}", .path.display())]
    InvalidConfig { path: PathBuf, reason: &'static str },
    #[error("malformed config file {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
