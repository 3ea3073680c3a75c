use crate::path::Path;
use crate::vector::{distance, inverse_square, quadrant_angle, Polar};

/// Coulomb's constant, N·m²/C².
pub const COULOMB_K: f64 = 8.9876e9;
/// Magnitude of the charge every particle carries, in coulombs.
pub const CHARGE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Proton,
    Electron,
}

impl Species {
    pub fn charge(self) -> f64 {
        match self {
            Species::Proton => CHARGE,
            Species::Electron => -CHARGE,
        }
    }
    /// kg
    pub fn mass(self) -> f64 {
        match self {
            Species::Proton => 1.673e-27,
            Species::Electron => 9.109e-31,
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            Species::Proton => "proton",
            Species::Electron => "electron",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub species: Species,
    pub pos: [f64; 2],
    pub velocity: f64,
    pub force: Polar,
    pub held: bool,
}

impl Particle {
    pub const R: f64 = 20.0;

    pub fn new(id: ParticleId, species: Species, pos: [f64; 2]) -> Self {
        Self {
            id,
            species,
            pos,
            velocity: 0.0,
            force: Polar::default(),
            held: false,
        }
    }
    pub fn charge(&self) -> f64 {
        self.species.charge()
    }
    pub fn mass(&self) -> f64 {
        self.species.mass()
    }
    pub fn move_to(&mut self, pos: [f64; 2]) {
        self.pos = pos;
    }
    pub fn opposite(&self, other: &Particle) -> bool {
        self.charge().signum() == -other.charge().signum()
    }
    /// Force exerted on `self` by `other`. The displacement points from
    /// `other` to `self` in screen coordinates.
    pub fn coulomb(&self, other: &Particle, meter: f64) -> Polar {
        let r = distance(self.pos, other.pos) / meter;
        let force = inverse_square(COULOMB_K, self.charge() * other.charge(), r);
        let dx = (self.pos[0] - other.pos[0]) / meter;
        let dy = (self.pos[1] - other.pos[1]) / meter;
        Polar::new(force, quadrant_angle(dx, dy))
    }
    /// Steps to the next recorded point. Returns `false` once the path is
    /// drained, leaving the particle where it is.
    pub fn follow(&mut self, path: &mut Path) -> bool {
        match path.next() {
            Some(point) => {
                self.move_to(point);
                true
            }
            None => false,
        }
    }
}

/// Protons and electrons, each list in insertion order. Indices run over
/// the protons first and then the electrons.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Charges {
    pub protons: Vec<Particle>,
    pub electrons: Vec<Particle>,
}

impl Charges {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.protons.len() + self.electrons.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn push(&mut self, particle: Particle) {
        match particle.species {
            Species::Proton => self.protons.push(particle),
            Species::Electron => self.electrons.push(particle),
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = &Particle> + Clone {
        self.protons.iter().chain(self.electrons.iter())
    }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.protons.iter_mut().chain(self.electrons.iter_mut())
    }
    pub fn get(&self, index: usize) -> Option<&Particle> {
        let split = self.protons.len();
        if index < split {
            self.protons.get(index)
        } else {
            self.electrons.get(index - split)
        }
    }
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        let split = self.protons.len();
        if index < split {
            self.protons.get_mut(index)
        } else {
            self.electrons.get_mut(index - split)
        }
    }
    pub fn find_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.iter_mut().find(|p| p.id == id)
    }
    pub fn retain(&mut self, mut keep: impl FnMut(&Particle) -> bool) {
        self.protons.retain(&mut keep);
        self.electrons.retain(&mut keep);
    }

    /// Net force on the particle at `index` from every other particle.
    pub fn net_force(&self, index: usize, meter: f64) -> Polar {
        let Some(me) = self.get(index) else {
            return Polar::default();
        };
        Polar::sum(
            self.iter()
                .enumerate()
                .filter(|(j, _)| *j != index)
                .map(|(_, other)| me.coulomb(other, meter)),
        )
    }

    /// One motion step for the particle at `index`.
    ///
    /// Velocity is a scalar along the net force direction and is divided by
    /// `damping` every step. The move is undone when it takes the particle
    /// further from, or closer than two radii to, any opposite charge.
    /// Returns whether the particle actually moved.
    pub fn advance(&mut self, index: usize, meter: f64, damping: f64) -> bool {
        let Some(me) = self.get(index) else {
            return false;
        };
        let force = self.net_force(index, meter);
        let acceleration = force.magnitude / me.mass();
        let velocity = (me.velocity + acceleration) / damping;

        let old = me.pos;
        let new = [
            old[0] + velocity * force.angle.cos() / meter,
            old[1] + velocity * force.angle.sin() / meter,
        ];
        let rejected = self
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != index && me.opposite(other))
            .any(|(_, other)| {
                let before = distance(old, other.pos);
                let after = distance(new, other.pos);
                after > before || after < 2.0 * Particle::R
            });

        let Some(me) = self.get_mut(index) else {
            return false;
        };
        me.force = force;
        me.velocity = velocity;
        if !rejected {
            me.move_to(new);
        }
        !rejected
    }

    /// Advances every particle in index order; later particles see the
    /// updated positions of earlier ones. Needs at least two particles.
    pub fn step_motion(&mut self, meter: f64, damping: f64) {
        if self.len() < 2 {
            return;
        }
        for index in 0..self.len() {
            self.advance(index, meter, damping);
        }
    }
}
