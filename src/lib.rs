pub mod config;
pub mod controls;
pub mod error;
pub mod event;
pub mod field;
pub mod lab;
pub mod mode;
pub mod particle;
pub mod path;
pub mod probe;
pub mod scene;
pub mod vector;

pub use config::LabConfig;
pub use controls::{Axis, Button, CoefficientBox};
pub use error::LabError;
pub use event::{InputEvent, Key};
pub use field::{FieldGrid, FieldIndicator};
pub use lab::{Draggable, Lab};
pub use mode::{Mode, PathStage};
pub use particle::{Charges, Particle, ParticleId, Species};
pub use path::{Path, PathAssignment};
pub use probe::{Sensor, Voltmeter};
pub use scene::{DrawCmd, Glyph, Tint};
pub use vector::Polar;
