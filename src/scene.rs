//! What to draw for a given [`Lab`]. Building the list never touches the
//! simulation; the frontend decides how each command lands on screen.

use crate::field::FieldIndicator;
use crate::lab::Lab;
use crate::mode::Mode;
use crate::particle::{Particle, ParticleId, Species};
use crate::path::Path;
use crate::probe::{Sensor, Voltmeter};
use crate::vector::Polar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Black,
    White,
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Brown,
    DarkRed,
}

/// A drawing primitive in canvas coordinates. Rectangles are
/// `[left, top, right, bottom]`; text is centred on `pos`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle {
        center: [f64; 2],
        radius: f64,
        fill: Tint,
    },
    Ring {
        center: [f64; 2],
        radius: f64,
        stroke: Tint,
    },
    Polygon {
        points: Vec<[f64; 2]>,
        fill: Tint,
    },
    Rect {
        rect: [f64; 4],
        fill: Tint,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        stroke: Tint,
    },
    Text {
        pos: [f64; 2],
        text: String,
        color: Tint,
    },
}

/// Anything that knows how it looks.
pub trait Glyph {
    fn glyph(&self, out: &mut Vec<DrawCmd>);
}

impl Glyph for Particle {
    fn glyph(&self, out: &mut Vec<DrawCmd>) {
        let r = Particle::R;
        let [x, y] = self.pos;
        match self.species {
            Species::Proton => {
                out.push(DrawCmd::Circle {
                    center: self.pos,
                    radius: r,
                    fill: Tint::Red,
                });
                let w = r / 3.0;
                let h = (r - r / 20.0) / 1.8;
                let x = x + 0.5;
                let points = vec![
                    [x - w / 2.0, y - h],
                    [x + w / 2.0, y - h],
                    [x + w / 2.0, y - w / 2.0],
                    [x + h, y - w / 2.0],
                    [x + h, y + w / 2.0],
                    [x + w / 2.0, y + w / 2.0],
                    [x + w / 2.0, y + h],
                    [x - w / 2.0, y + h],
                    [x - w / 2.0, y + w / 2.0],
                    [x - h, y + w / 2.0],
                    [x - h, y - w / 2.0],
                    [x - w / 2.0, y - w / 2.0],
                ];
                out.push(DrawCmd::Polygon {
                    points,
                    fill: Tint::White,
                });
            }
            Species::Electron => {
                out.push(DrawCmd::Circle {
                    center: self.pos,
                    radius: r,
                    fill: Tint::Blue,
                });
                let w = 1.25 * r;
                let h = r / 6.0;
                out.push(DrawCmd::Rect {
                    rect: [x - w / 2.0, y - h, x + w / 2.0, y + h],
                    fill: Tint::White,
                });
            }
        }
    }
}

impl Glyph for FieldIndicator {
    fn glyph(&self, out: &mut Vec<DrawCmd>) {
        out.push(DrawCmd::Polygon {
            points: self.outline(),
            fill: Tint::White,
        });
    }
}

impl Glyph for Sensor {
    fn glyph(&self, out: &mut Vec<DrawCmd>) {
        let [x, y] = self.pos;
        out.push(DrawCmd::Circle {
            center: self.pos,
            radius: Sensor::R,
            fill: Tint::Yellow,
        });
        out.push(DrawCmd::Text {
            pos: [x, y - Sensor::R],
            text: format!("{:.1} deg", self.reading.degrees()),
            color: Tint::Green,
        });
        out.push(DrawCmd::Text {
            pos: [x, y + Sensor::R],
            text: format!("{:.1} V/m", self.reading.magnitude),
            color: Tint::Green,
        });
    }
}

impl Glyph for Voltmeter {
    fn glyph(&self, out: &mut Vec<DrawCmd>) {
        let [x, y] = self.body;
        let (rx, ry) = (Voltmeter::RX, Voltmeter::RY);
        out.push(DrawCmd::Rect {
            rect: [x - rx, y - ry, x + rx, y + ry],
            fill: Tint::Blue,
        });
        out.push(DrawCmd::Rect {
            rect: self.screen(),
            fill: Tint::White,
        });
        out.push(DrawCmd::Text {
            pos: [x, y - 1.5 * Voltmeter::MARGIN],
            text: format!("{:.1} V", self.volts),
            color: Tint::Black,
        });
        out.push(DrawCmd::Line {
            from: [x, y - ry],
            to: [x, y - 1.25 * ry + Voltmeter::TIP_R],
            stroke: Tint::White,
        });
        out.push(DrawCmd::Ring {
            center: self.probe,
            radius: Voltmeter::TIP_R,
            stroke: Tint::Red,
        });
    }
}

impl Glyph for Path {
    fn glyph(&self, out: &mut Vec<DrawCmd>) {
        if self.len() <= 1 {
            return;
        }
        out.extend(self.points().map(|p| DrawCmd::Circle {
            center: *p,
            radius: Path::DOT_R,
            fill: Tint::Green,
        }));
    }
}

fn label(out: &mut Vec<DrawCmd>, pos: [f64; 2], text: &str, color: Tint) {
    out.push(DrawCmd::Text {
        pos,
        text: text.to_string(),
        color,
    });
}

/// The full frame, back to front.
pub fn draw(lab: &Lab) -> Vec<DrawCmd> {
    let (w, h) = (lab.config.canvas_width, lab.config.canvas_height);
    let mut out = vec![DrawCmd::Rect {
        rect: [0.0, 0.0, w, h],
        fill: Tint::Black,
    }];

    Particle::new(ParticleId(u64::MAX), Species::Proton, lab.bases.proton).glyph(&mut out);
    Particle::new(ParticleId(u64::MAX), Species::Electron, lab.bases.electron).glyph(&mut out);
    Sensor {
        pos: lab.bases.sensor,
        held: false,
        reading: Polar::default(),
    }
    .glyph(&mut out);

    for p in lab.charges.iter() {
        p.glyph(&mut out);
    }
    if lab.field_exists || lab.mode == Mode::Function {
        for cell in lab.grid.cells() {
            cell.glyph(&mut out);
        }
    }
    for s in &lab.sensors {
        s.glyph(&mut out);
    }

    lab.voltmeter.glyph(&mut out);

    let [left, top, right, bottom] = lab.trash;
    out.push(DrawCmd::Rect {
        rect: lab.trash,
        fill: Tint::Green,
    });
    let mid = [(left + right) / 2.0, (top + bottom) / 2.0];
    label(&mut out, [mid[0], mid[1] - 8.0], "Nuclear", Tint::DarkRed);
    label(&mut out, [mid[0], mid[1] + 8.0], "Waste Disposal", Tint::DarkRed);

    out.push(DrawCmd::Rect {
        rect: lab.restart.rect(),
        fill: Tint::Brown,
    });
    label(&mut out, lab.restart.center, "Restart", Tint::Black);

    for coefficient in [&lab.x_coeff, &lab.y_coeff] {
        let b = coefficient.button;
        out.push(DrawCmd::Rect {
            rect: b.rect(),
            fill: Tint::White,
        });
        label(&mut out, b.center, &coefficient.text, Tint::Black);
        let name = coefficient.axis.to_string();
        label(&mut out, [8.75 * w / 10.0, b.center[1]], &name, Tint::Red);
    }

    if lab.equipotential.len() > 1 {
        for p in &lab.equipotential {
            label(&mut out, *p, "e", Tint::Orange);
        }
    }
    for assignment in &lab.paths {
        assignment.path.glyph(&mut out);
    }

    if let Some(title) = lab.mode.title() {
        label(&mut out, [w / 2.0, h / 20.0], title, Tint::Green);
    }
    out
}
