use std::f64::consts::PI;

use itertools::iproduct;

use crate::field::{field_of, net_field};
use crate::particle::Particle;
use crate::vector::{distance, Polar};

/// Potential at `point` due to `source`: field magnitude times distance,
/// signed by the source charge.
pub fn potential_of(point: [f64; 2], source: &Particle, meter: f64) -> f64 {
    let e = field_of(point, source, meter);
    let d = distance(point, source.pos) / meter;
    (e.magnitude * d).abs() * source.charge().signum()
}

pub fn net_potential<'a>(
    point: [f64; 2],
    sources: impl IntoIterator<Item = &'a Particle>,
    meter: f64,
) -> f64 {
    sources
        .into_iter()
        .map(|s| potential_of(point, s, meter))
        .sum()
}

/// A draggable field probe.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub pos: [f64; 2],
    pub held: bool,
    pub reading: Polar,
}

impl Sensor {
    pub const R: f64 = 10.0;

    pub fn new<'a>(
        pos: [f64; 2],
        sources: impl IntoIterator<Item = &'a Particle>,
        meter: f64,
    ) -> Self {
        Self {
            pos,
            held: false,
            reading: net_field(pos, sources, meter),
        }
    }
    pub fn sample<'a>(&mut self, sources: impl IntoIterator<Item = &'a Particle>, meter: f64) {
        self.reading = net_field(self.pos, sources, meter);
    }
    pub fn move_to<'a>(
        &mut self,
        pos: [f64; 2],
        sources: impl IntoIterator<Item = &'a Particle>,
        meter: f64,
    ) {
        self.pos = pos;
        self.sample(sources, meter);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Voltmeter {
    /// Measuring tip.
    pub probe: [f64; 2],
    /// Centre of the meter body hanging below the tip.
    pub body: [f64; 2],
    pub held: bool,
    pub volts: f64,
}

impl Voltmeter {
    pub const RX: f64 = 35.0;
    pub const RY: f64 = 60.0;
    pub const MARGIN: f64 = 10.0;
    pub const TIP_R: f64 = 7.0;
    /// Equipotential samples per revolution.
    pub const SPOKES: usize = 12;

    /// Parks the meter at the right edge of a `width × height` canvas.
    pub fn new(width: f64, height: f64) -> Self {
        let body = [width - Self::RX - Self::MARGIN, height / 2.0];
        Self {
            probe: [body[0], body[1] - 1.25 * Self::RY],
            body,
            held: false,
            volts: 0.0,
        }
    }
    pub fn sample<'a>(&mut self, sources: impl IntoIterator<Item = &'a Particle>, meter: f64) {
        self.volts = net_potential(self.probe, sources, meter);
    }
    pub fn move_to<'a>(
        &mut self,
        pos: [f64; 2],
        sources: impl IntoIterator<Item = &'a Particle>,
        meter: f64,
    ) {
        self.probe = pos;
        self.body = [pos[0], pos[1] + 1.25 * Self::RY];
        self.sample(sources, meter);
    }
    /// Screen rectangle of the readout, `[left, top, right, bottom]`.
    pub fn screen(&self) -> [f64; 4] {
        let [x, y] = self.body;
        [
            x - Self::RX + Self::MARGIN,
            y - Self::RY + 3.0 * Self::MARGIN,
            x + Self::RX - Self::MARGIN,
            y,
        ]
    }

    /// Scans circles of radius `1..=width` around every source in 30° steps
    /// and keeps the points whose potential is within `tolerance` of the
    /// current reading.
    pub fn pulse<'a>(
        &self,
        sources: impl Iterator<Item = &'a Particle> + Clone,
        width: f64,
        meter: f64,
        tolerance: f64,
    ) -> Vec<[f64; 2]> {
        let target = self.volts;
        let max_r = width.max(0.0) as u32;
        let mut points = Vec::new();
        for source in sources.clone() {
            let [cx, cy] = source.pos;
            for (r, spoke) in iproduct!(1..=max_r, 0..Self::SPOKES) {
                let ang = spoke as f64 * 2.0 * PI / Self::SPOKES as f64;
                let point = [cx + r as f64 * ang.cos(), cy + r as f64 * ang.sin()];
                let v = net_potential(point, sources.clone(), meter);
                if (v - target).abs() <= tolerance {
                    points.push(point);
                }
            }
        }
        points
    }
}
