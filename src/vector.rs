use std::f64::consts::PI;

/// Distances below this (in meters) are treated as this value.
pub const MIN_SEPARATION: f64 = 0.01;

pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let [ax, ay] = a;
    let [bx, by] = b;
    ((ax - bx) * (ax - bx) + (ay - by) * (ay - by)).sqrt()
}

/// `k * product / r^2`, with a zero separation floored to [`MIN_SEPARATION`].
pub fn inverse_square(k: f64, product: f64, r: f64) -> f64 {
    let r = if r == 0.0 { MIN_SEPARATION } else { r };
    k * product / (r * r)
}

/// Angle of a displacement mapped into `[0, 2π)`.
///
/// Quadrants are fixed up one by one rather than through `rem_euclid`, so a
/// displacement straight along negative `dy` comes out as `π/2`. Field and
/// force code feed this with differently signed `dy`.
pub fn quadrant_angle(dx: f64, dy: f64) -> f64 {
    let mut ang = dy.atan2(dx).abs();
    if dx < 0.0 && dy > 0.0 {
        ang = PI / 2.0 + dx.atan2(dy).abs();
    } else if dx < 0.0 && dy < 0.0 {
        ang = dx.atan2(dy).abs() + PI / 2.0;
    } else if dx > 0.0 && dy < 0.0 {
        ang = 2.0 * PI - ang;
    }
    ang
}

/// Angle rule for function fields. `x`/`y` are the cell offsets from the
/// grid centre, `fx`/`fy` the evaluated field components.
pub fn function_angle(x: f64, y: f64, fx: f64, fy: f64) -> f64 {
    let mut ang = fy.atan2(fx).abs();
    if x > 0.0 && y < 0.0 {
        ang += PI;
    } else if x < 0.0 && y > 0.0 {
        ang = PI - ang;
    } else if x > 0.0 && y > 0.0 {
        ang = -ang;
    }
    if x == 0.0 {
        ang = if y < 0.0 { PI } else { 0.0 };
    }
    if y == 0.0 {
        ang = if x < 0.0 { PI / 2.0 } else { 3.0 * PI / 2.0 };
    }
    ang
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Polar {
    pub magnitude: f64,
    pub angle: f64,
}

impl Polar {
    pub fn new(magnitude: f64, angle: f64) -> Self {
        Self { magnitude, angle }
    }
    pub fn to_rect(self) -> [f64; 2] {
        [
            self.magnitude * self.angle.cos(),
            self.magnitude * self.angle.sin(),
        ]
    }
    pub fn from_rect([x, y]: [f64; 2]) -> Self {
        Self {
            magnitude: x.hypot(y),
            angle: y.atan2(x),
        }
    }
    /// Adds the vectors in rectangular form and converts the total back.
    pub fn sum(vectors: impl IntoIterator<Item = Polar>) -> Self {
        let total = vectors.into_iter().fold([0.0, 0.0], |[sx, sy], v| {
            let [x, y] = v.to_rect();
            [sx + x, sy + y]
        });
        Self::from_rect(total)
    }
    pub fn degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}
