use log::{debug, info, warn};

use crate::config::LabConfig;
use crate::controls::{in_rect, Axis, Button, CoefficientBox};
use crate::error::LabError;
use crate::event::{InputEvent, Key};
use crate::field::FieldGrid;
use crate::mode::{Mode, PathStage};
use crate::particle::{Charges, Particle, ParticleId, Species};
use crate::path::{Path, PathAssignment};
use crate::probe::{Sensor, Voltmeter};

/// Something the pointer can pick up and drop.
pub trait Draggable {
    fn anchor(&self) -> [f64; 2];
    /// Half extents of the hit box around [`Draggable::anchor`].
    fn reach(&self) -> [f64; 2];
    fn held(&self) -> bool;
    fn set_held(&mut self, held: bool);

    fn contains(&self, point: [f64; 2]) -> bool {
        let [ax, ay] = self.anchor();
        let [rx, ry] = self.reach();
        (point[0] - ax).abs() <= rx && (point[1] - ay).abs() <= ry
    }
}

impl Draggable for Particle {
    fn anchor(&self) -> [f64; 2] {
        self.pos
    }
    fn reach(&self) -> [f64; 2] {
        [Particle::R, Particle::R]
    }
    fn held(&self) -> bool {
        self.held
    }
    fn set_held(&mut self, held: bool) {
        self.held = held;
    }
}

impl Draggable for Sensor {
    fn anchor(&self) -> [f64; 2] {
        self.pos
    }
    fn reach(&self) -> [f64; 2] {
        [Sensor::R, Sensor::R]
    }
    fn held(&self) -> bool {
        self.held
    }
    fn set_held(&mut self, held: bool) {
        self.held = held;
    }
}

impl Draggable for Voltmeter {
    fn anchor(&self) -> [f64; 2] {
        self.probe
    }
    fn reach(&self) -> [f64; 2] {
        [Voltmeter::RX, Voltmeter::RY]
    }
    fn held(&self) -> bool {
        self.held
    }
    fn set_held(&mut self, held: bool) {
        self.held = held;
    }
}

/// Picks `item` up if the click is on it, or drops it wherever it is if it
/// is already held. Returns whether the click was used.
fn toggle_hold(item: &mut impl Draggable, point: [f64; 2]) -> bool {
    if !item.held() && item.contains(point) {
        item.set_held(true);
        true
    } else if item.held() {
        item.set_held(false);
        true
    } else {
        false
    }
}

/// Fixed template icons along the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bases {
    pub proton: [f64; 2],
    pub electron: [f64; 2],
    pub sensor: [f64; 2],
}

impl Bases {
    fn new(width: f64, height: f64) -> Self {
        let y = 19.0 * height / 20.0;
        Self {
            proton: [4.0 * width / 12.5, y],
            electron: [6.0 * width / 12.5, y],
            sensor: [8.0 * width / 12.5, y],
        }
    }
}

fn near(point: [f64; 2], anchor: [f64; 2], r: f64) -> bool {
    (point[0] - anchor[0]).abs() <= r && (point[1] - anchor[1]).abs() <= r
}

/// The whole simulation state.
#[derive(Debug, Clone)]
pub struct Lab {
    pub config: LabConfig,
    pub mode: Mode,
    pub path_stage: PathStage,
    pub charges: Charges,
    pub sensors: Vec<Sensor>,
    pub voltmeter: Voltmeter,
    pub grid: FieldGrid,
    pub paths: Vec<PathAssignment>,
    pub equipotential: Vec<[f64; 2]>,
    /// Whether the grid is worth drawing.
    pub field_exists: bool,
    pub bases: Bases,
    /// `[left, top, right, bottom]`
    pub trash: [f64; 4],
    pub restart: Button,
    pub x_coeff: CoefficientBox,
    pub y_coeff: CoefficientBox,
    /// Last coefficient error logged, so it is only reported once.
    coefficient_error: Option<String>,
    next_id: u64,
}

impl Lab {
    pub fn new(config: LabConfig) -> Self {
        let (w, h) = (config.canvas_width, config.canvas_height);
        let coefficient_size = [w / 10.0, h / 20.0];
        Self {
            config,
            mode: Mode::Normal,
            path_stage: PathStage::default(),
            charges: Charges::new(),
            sensors: Vec::new(),
            voltmeter: Voltmeter::new(w, h),
            grid: FieldGrid::new(w, h),
            paths: Vec::new(),
            equipotential: Vec::new(),
            field_exists: false,
            bases: Bases::new(w, h),
            trash: [w / 15.0, 18.5 * h / 20.0, w / 5.0, 19.5 * h / 20.0],
            restart: Button::new([9.0 * w / 10.0, 17.0 * h / 20.0], [w / 10.0, h / 20.0]),
            x_coeff: CoefficientBox::new(
                Axis::X,
                Button::new([8.0 * w / 10.0, 9.0 * h / 20.0], coefficient_size),
            ),
            y_coeff: CoefficientBox::new(
                Axis::Y,
                Button::new([8.0 * w / 10.0, 11.0 * h / 20.0], coefficient_size),
            ),
            coefficient_error: None,
            next_id: 0,
        }
    }

    pub fn meter(&self) -> f64 {
        self.config.meter()
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerPressed(pos) => self.pointer_pressed(pos),
            InputEvent::PointerMoved(pos) => self.pointer_moved(pos),
            InputEvent::KeyPressed(key) => self.key_pressed(key),
        }
    }

    /// Places an unheld particle. Returns its id.
    pub fn add_particle(&mut self, species: Species, pos: [f64; 2]) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.charges.push(Particle::new(id, species, pos));
        id
    }

    pub fn add_sensor(&mut self, pos: [f64; 2]) {
        let sensor = Sensor::new(pos, self.charges.iter(), self.meter());
        self.sensors.push(sensor);
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.charges.iter().find(|p| p.id == id)
    }

    pub fn reset(&mut self) {
        info!("restarting lab");
        *self = Lab::new(self.config);
    }

    fn pointer_pressed(&mut self, pos: [f64; 2]) {
        if self.restart.contains(pos) {
            self.reset();
            return;
        }
        // Focusing a box does not use up the click.
        if self.x_coeff.button.contains(pos) {
            self.x_coeff.focused = true;
            self.y_coeff.focused = false;
        } else if self.y_coeff.button.contains(pos) {
            self.y_coeff.focused = true;
            self.x_coeff.focused = false;
        }

        if self.mode == Mode::Path {
            self.path_pressed(pos);
            return;
        }

        // Topmost (most recently added) wins.
        let grabbed = self
            .charges
            .protons
            .iter_mut()
            .rev()
            .any(|p| toggle_hold(p, pos))
            || self
                .charges
                .electrons
                .iter_mut()
                .rev()
                .any(|p| toggle_hold(p, pos))
            || self.sensors.iter_mut().rev().any(|s| toggle_hold(s, pos));
        if grabbed {
            return;
        }

        toggle_hold(&mut self.voltmeter, pos);
        self.spawn_from_base(pos);
    }

    fn spawn_from_base(&mut self, pos: [f64; 2]) {
        let bases = self.bases;
        let species = if near(pos, bases.proton, Particle::R) {
            Some((Species::Proton, bases.proton))
        } else if near(pos, bases.electron, Particle::R) {
            Some((Species::Electron, bases.electron))
        } else {
            None
        };

        if let Some((species, at)) = species {
            let id = self.add_particle(species, at);
            if let Some(p) = self.charges.find_mut(id) {
                p.held = true;
            }
            debug!("spawned {} {:?}", species.name(), id);
        } else if near(pos, bases.sensor, Sensor::R) {
            self.add_sensor(bases.sensor);
            if let Some(s) = self.sensors.last_mut() {
                s.held = true;
            }
            debug!("spawned sensor");
        }
    }

    fn path_pressed(&mut self, pos: [f64; 2]) {
        if self.path_stage.drawing {
            self.path_stage.drawing = false;
            return;
        }
        let hit = self
            .charges
            .electrons
            .iter()
            .rev()
            .chain(self.charges.protons.iter().rev())
            .find(|p| p.contains(pos))
            .map(|p| p.id);
        if let Some(particle) = hit {
            debug!("recording path for {particle:?}");
            self.paths.push(PathAssignment {
                particle,
                path: Path::new(),
            });
            self.path_stage.drawing = true;
            self.path_stage.finished = false;
        }
    }

    fn pointer_moved(&mut self, pos: [f64; 2]) {
        if self.mode == Mode::Path {
            if self.path_stage.drawing {
                if let Some(last) = self.paths.last_mut() {
                    last.path.record(pos);
                }
            }
            return;
        }

        let meter = self.meter();
        for p in self.charges.iter_mut().filter(|p| p.held) {
            p.move_to(pos);
        }
        for s in self.sensors.iter_mut().filter(|s| s.held) {
            s.move_to(pos, self.charges.iter(), meter);
        }
        if self.voltmeter.held {
            self.voltmeter.move_to(pos, self.charges.iter(), meter);
        }
    }

    fn key_pressed(&mut self, key: Key) {
        let focused = if self.x_coeff.focused {
            Some(&mut self.x_coeff)
        } else if self.y_coeff.focused {
            Some(&mut self.y_coeff)
        } else {
            None
        };
        if let Some(coefficient) = focused {
            coefficient.type_key(key);
        }

        let before = self.mode;
        match key {
            Key::Char('p') => {
                self.mode = self.mode.toggled(Mode::Path);
                if self.mode == Mode::Path {
                    self.path_stage.finished = false;
                }
            }
            Key::Char('m') => self.mode = self.mode.toggled(Mode::Motion),
            Key::Char('f') => {
                self.mode = self.mode.toggled(Mode::Function);
                self.field_exists = true;
            }
            _ => {
                self.path_stage.finished = true;
                if self.mode == Mode::Normal {
                    self.pulse();
                }
            }
        }
        if self.mode != before {
            info!("mode {before:?} -> {:?}", self.mode);
        }
    }

    /// Recomputes the equipotential trace through the voltmeter tip.
    pub fn pulse(&mut self) {
        self.equipotential = self.voltmeter.pulse(
            self.charges.iter(),
            self.config.canvas_width,
            self.meter(),
            self.config.equipotential_tolerance,
        );
        info!(
            "equipotential at {:.1} V: {} points",
            self.voltmeter.volts,
            self.equipotential.len()
        );
    }

    /// One timer step.
    pub fn tick(&mut self) {
        let meter = self.meter();

        if self.mode == Mode::Path && self.path_stage.playing() {
            for assignment in &mut self.paths {
                if let Some(p) = self.charges.find_mut(assignment.particle) {
                    p.follow(&mut assignment.path);
                }
            }
        }

        if self.charges.is_empty() {
            self.field_exists = false;
        } else {
            self.field_exists = true;
            self.grid.point_at(self.charges.iter(), meter);
        }

        for s in &mut self.sensors {
            s.sample(self.charges.iter(), meter);
        }

        self.delete_trashed();

        self.voltmeter.sample(self.charges.iter(), meter);

        if self.mode == Mode::Motion {
            self.charges.step_motion(meter, self.config.motion_damping);
        }

        if self.mode == Mode::Function {
            match (self.x_coeff.value(), self.y_coeff.value()) {
                (Ok(x), Ok(y)) => {
                    self.coefficient_error = None;
                    self.grid.follow_function(x as f64, y as f64);
                }
                (Err(e), _) | (_, Err(e)) => {
                    self.report_coefficient_error(&e);
                }
            }
        }
    }

    /// Warns about a bad coefficient once, not on every tick it stays bad.
    /// Returns whether a warning was logged.
    fn report_coefficient_error(&mut self, e: &LabError) -> bool {
        let message = e.to_string();
        if self.coefficient_error.as_deref() == Some(message.as_str()) {
            return false;
        }
        warn!("function field unchanged: {message}");
        self.coefficient_error = Some(message);
        true
    }

    /// Removes every particle and sensor dropped inside the trash zone.
    /// Held ones survive.
    pub fn delete_trashed(&mut self) {
        let trash = self.trash;
        let counts = (self.charges.len(), self.sensors.len());
        self.charges.retain(|p| p.held || !in_rect(trash, p.pos));
        self.sensors.retain(|s| s.held || !in_rect(trash, s.pos));
        let removed = counts.0 - self.charges.len() + counts.1 - self.sensors.len();
        if removed > 0 {
            debug!("trashed {removed} objects");
        }
    }
}
