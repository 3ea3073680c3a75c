/// Interaction mode. Exactly one is active; `Normal` is the default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Path,
    Motion,
    Function,
}

impl Mode {
    /// The mode after pressing `target`'s key: pressing the key of the
    /// active mode drops back to `Normal`.
    pub fn toggled(self, target: Mode) -> Mode {
        if self == target {
            Mode::Normal
        } else {
            target
        }
    }
    pub fn title(self) -> Option<&'static str> {
        match self {
            Mode::Normal => None,
            Mode::Path => Some("Path Mode"),
            Mode::Motion => Some("Motion Mode"),
            Mode::Function => Some("Function Mode"),
        }
    }
}

/// Progress of path recording and playback.
///
/// Idle: `!drawing && !finished`. Recording: `drawing`. Playback:
/// `!drawing && finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStage {
    pub drawing: bool,
    pub finished: bool,
}

impl Default for PathStage {
    fn default() -> Self {
        Self {
            drawing: false,
            finished: true,
        }
    }
}

impl PathStage {
    pub fn playing(&self) -> bool {
        !self.drawing && self.finished
    }
}
