use itertools::Itertools;

use crate::particle::{Particle, COULOMB_K};
use crate::vector::{distance, function_angle, inverse_square, quadrant_angle, Polar};

pub const GRID: usize = 8;

/// Field of `source` at `point`. Unlike [`Particle::coulomb`], the vertical
/// displacement runs from the probe to the source.
pub fn field_of(point: [f64; 2], source: &Particle, meter: f64) -> Polar {
    let r = distance(point, source.pos) / meter;
    let e = inverse_square(COULOMB_K, source.charge(), r);
    let dx = (point[0] - source.pos[0]) / meter;
    let dy = (source.pos[1] - point[1]) / meter;
    Polar::new(e, quadrant_angle(dx, dy))
}

pub fn net_field<'a>(
    point: [f64; 2],
    sources: impl IntoIterator<Item = &'a Particle>,
    meter: f64,
) -> Polar {
    Polar::sum(sources.into_iter().map(|s| field_of(point, s, meter)))
}

/// Rotates `point` about `center` by `angle`, counter-clockwise on a
/// y-down screen.
pub fn rotate(point: [f64; 2], center: [f64; 2], angle: f64) -> [f64; 2] {
    let [cx, cy] = center;
    let [x, y] = point;
    [
        cx + angle.cos() * (x - cx) + angle.sin() * (y - cy),
        cy - angle.sin() * (x - cx) + angle.cos() * (y - cy),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldIndicator {
    pub row: usize,
    pub col: usize,
    pub pos: [f64; 2],
    pub angle: f64,
    pub vector: Polar,
}

impl FieldIndicator {
    const HALF_W: f64 = 12.5;
    const HALF_H: f64 = 5.0;
    const HEAD: f64 = 10.0;

    pub fn new(row: usize, col: usize, pos: [f64; 2]) -> Self {
        Self {
            row,
            col,
            pos,
            angle: 0.0,
            vector: Polar::default(),
        }
    }

    fn aim(&mut self, vector: Polar) {
        self.vector = vector;
        self.angle = vector.angle;
    }

    pub fn point_at<'a>(&mut self, sources: impl IntoIterator<Item = &'a Particle>, meter: f64) {
        self.aim(net_field(self.pos, sources, meter));
    }

    /// Points along `(x_coeff * x, y_coeff * y)` where `x`/`y` are this
    /// cell's grid-index offsets from the centre (the row gives `y`).
    pub fn follow_function(&mut self, x_coeff: f64, y_coeff: f64) {
        let y = self.row as f64 - (GRID / 2) as f64;
        let x = self.col as f64 - (GRID / 2) as f64;
        let [fx, fy] = [x_coeff * x, y_coeff * y];
        self.aim(Polar::new(fx.hypot(fy), function_angle(x, y, fx, fy)));
    }

    /// Arrow outline pointing along `angle`.
    pub fn outline(&self) -> Vec<[f64; 2]> {
        let [x, y] = self.pos;
        let (w, h) = (Self::HALF_W, Self::HALF_H);
        [
            [x - w, y - h],
            [x + w, y - h],
            [x + w, y - 2.0 * h],
            [x + w + Self::HEAD, y],
            [x + w, y + 2.0 * h],
            [x + w, y + h],
            [x - w, y + h],
        ]
        .into_iter()
        .map(|p| rotate(p, self.pos, self.angle))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldGrid {
    cells: Vec<FieldIndicator>,
}

impl FieldGrid {
    /// Cell `(row, col)` sits at `((row+1)·w/12.5, (col+1)·h/10)`.
    pub fn new(width: f64, height: f64) -> Self {
        let cells = (0..GRID)
            .cartesian_product(0..GRID)
            .map(|(row, col)| {
                let pos = [
                    (row + 1) as f64 * width / 12.5,
                    (col + 1) as f64 * height / 10.0,
                ];
                FieldIndicator::new(row, col, pos)
            })
            .collect();
        Self { cells }
    }
    pub fn cells(&self) -> &[FieldIndicator] {
        &self.cells
    }
    pub fn cell(&self, row: usize, col: usize) -> Option<&FieldIndicator> {
        (row < GRID && col < GRID).then(|| &self.cells[row * GRID + col])
    }
    pub fn nearest(&self, point: [f64; 2]) -> Option<&FieldIndicator> {
        self.cells
            .iter()
            .min_by(|a, b| distance(a.pos, point).total_cmp(&distance(b.pos, point)))
    }
    pub fn point_at<'a>(
        &mut self,
        sources: impl Iterator<Item = &'a Particle> + Clone,
        meter: f64,
    ) {
        for cell in &mut self.cells {
            cell.point_at(sources.clone(), meter);
        }
    }
    pub fn follow_function(&mut self, x_coeff: f64, y_coeff: f64) {
        for cell in &mut self.cells {
            cell.follow_function(x_coeff, y_coeff);
        }
    }
}
