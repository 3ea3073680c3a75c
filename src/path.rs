use std::collections::VecDeque;

use crate::particle::ParticleId;

/// A recorded trajectory, replayed front to back.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Path {
    points: VecDeque<[f64; 2]>,
}

impl Path {
    pub const DOT_R: f64 = 10.0;

    pub fn new() -> Self {
        Self::default()
    }
    pub fn record(&mut self, point: [f64; 2]) {
        self.points.push_back(point);
    }
    pub fn next(&mut self) -> Option<[f64; 2]> {
        self.points.pop_front()
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn points(&self) -> impl Iterator<Item = &[f64; 2]> {
        self.points.iter()
    }
}

impl FromIterator<[f64; 2]> for Path {
    fn from_iter<T: IntoIterator<Item = [f64; 2]>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// A path and the particle that replays it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathAssignment {
    pub particle: ParticleId,
    pub path: Path,
}
