use std::fmt;

use crate::error::LabError;
use crate::event::Key;

/// `true` when `point` lies inside `[left, top, right, bottom]`, edges included.
pub fn in_rect(rect: [f64; 4], point: [f64; 2]) -> bool {
    let [left, top, right, bottom] = rect;
    let [x, y] = point;
    left <= x && x <= right && top <= y && y <= bottom
}

/// Axis-aligned box given by centre and full size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub center: [f64; 2],
    pub size: [f64; 2],
}

impl Button {
    pub fn new(center: [f64; 2], size: [f64; 2]) -> Self {
        Self { center, size }
    }
    pub fn rect(&self) -> [f64; 4] {
        let [x, y] = self.center;
        let [w, h] = self.size;
        [x - w / 2.0, y - h / 2.0, x + w / 2.0, y + h / 2.0]
    }
    pub fn contains(&self, point: [f64; 2]) -> bool {
        in_rect(self.rect(), point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Digit entry box for one function-field coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientBox {
    pub axis: Axis,
    pub button: Button,
    pub text: String,
    pub focused: bool,
}

impl CoefficientBox {
    pub fn new(axis: Axis, button: Button) -> Self {
        Self {
            axis,
            button,
            text: String::from("1"),
            focused: false,
        }
    }

    /// Applies a key press. Returns `false` for keys the box ignores.
    pub fn type_key(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) if c.is_ascii_digit() => {
                if self.text == "0" {
                    self.text.clear();
                }
                self.text.push(c);
            }
            Key::Backspace => {
                self.text.pop();
            }
            _ => return false,
        }
        if self.text.is_empty() {
            self.text.push('0');
        }
        true
    }

    pub fn value(&self) -> Result<i64, LabError> {
        self.text
            .parse()
            .map_err(|source| LabError::InvalidCoefficient {
                axis: self.axis,
                text: self.text.clone(),
                source,
            })
    }
}
