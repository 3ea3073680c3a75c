use charge_lab::field::net_field;
use charge_lab::probe::net_potential;
use charge_lab::vector::distance;
use charge_lab::{InputEvent, Key, Lab, LabConfig, Mode, Particle, ParticleId, Species};

/// Lab with the default 1000x800 canvas
pub fn lab() -> Lab {
    Lab::new(LabConfig::default())
}

/// Lab with the given particles already placed (not held)
pub fn lab_with(particles: &[(Species, [f64; 2])]) -> (Lab, Vec<ParticleId>) {
    let mut lab = lab();
    let ids = particles
        .iter()
        .map(|(species, pos)| lab.add_particle(*species, *pos))
        .collect();
    (lab, ids)
}

pub fn press(lab: &mut Lab, at: [f64; 2]) {
    lab.handle(InputEvent::PointerPressed(at));
}

pub fn move_to(lab: &mut Lab, at: [f64; 2]) {
    lab.handle(InputEvent::PointerMoved(at));
}

pub fn key(lab: &mut Lab, c: char) {
    lab.handle(InputEvent::KeyPressed(Key::Char(c)));
}

pub fn pos_of(lab: &Lab, id: ParticleId) -> [f64; 2] {
    lab.particle(id).map(|p| p.pos).expect("particle exists")
}

pub fn trash_center(lab: &Lab) -> [f64; 2] {
    let [l, t, r, b] = lab.trash;
    [(l + r) / 2.0, (t + b) / 2.0]
}

// ==================================================================================
// Geometry and field summation
// ==================================================================================

#[test]
fn distance_symmetric_and_zero_on_self() {
    let pts = [[0.0, 0.0], [3.0, 4.0], [-120.5, 33.25], [999.0, -1.0]];
    for a in pts {
        assert_eq!(distance(a, a), 0.0);
        for b in pts {
            assert_eq!(distance(a, b), distance(b, a));
        }
    }
}

#[test]
fn net_field_ignores_source_order() {
    let sources: Vec<Particle> = [
        (Species::Proton, [120.0, 340.0]),
        (Species::Electron, [610.0, 95.0]),
        (Species::Proton, [400.0, 410.0]),
        (Species::Electron, [255.0, 700.0]),
        (Species::Proton, [830.0, 520.0]),
    ]
    .iter()
    .enumerate()
    .map(|(i, (s, p))| Particle::new(ParticleId(i as u64), *s, *p))
    .collect();

    let point = [333.0, 222.0];
    let forward = net_field(point, &sources, 100.0);
    let backward = net_field(point, sources.iter().rev(), 100.0);
    let rotated = net_field(point, sources[2..].iter().chain(&sources[..2]), 100.0);

    for other in [backward, rotated] {
        let rel = (forward.magnitude - other.magnitude).abs() / forward.magnitude;
        assert!(rel < 1e-9, "magnitude changed with order: {forward:?} vs {other:?}");
        assert!((forward.angle.sin() - other.angle.sin()).abs() < 1e-9);
        assert!((forward.angle.cos() - other.angle.cos()).abs() < 1e-9);
    }
}

#[test]
fn indicator_at_midpoint_points_along_the_axis() {
    // grid cell (0, 0) lands exactly on (150, 100) with this canvas
    let mut lab = Lab::new(LabConfig {
        canvas_width: 1875.0,
        canvas_height: 1000.0,
        ..Default::default()
    });
    lab.add_particle(Species::Proton, [100.0, 100.0]);
    lab.add_particle(Species::Electron, [200.0, 100.0]);
    lab.tick();

    let cell = lab.grid.nearest([150.0, 100.0]).expect("grid is not empty");
    assert_eq!(cell.pos, [150.0, 100.0]);
    assert!(lab.field_exists);
    assert!(cell.vector.magnitude.is_finite());
    assert!(cell.vector.magnitude > 0.0);
    assert!(cell.angle.sin().abs() < 1e-9, "angle {} is off axis", cell.angle);
    assert_eq!(cell.angle, cell.vector.angle);
}

// ==================================================================================
// Motion mode
// ==================================================================================

#[test]
fn like_charges_separate_in_motion_mode() {
    let (mut lab, ids) = lab_with(&[
        (Species::Proton, [300.0, 300.0]),
        (Species::Proton, [400.0, 300.0]),
    ]);
    key(&mut lab, 'm');
    assert_eq!(lab.mode, Mode::Motion);

    let before = distance(pos_of(&lab, ids[0]), pos_of(&lab, ids[1]));
    lab.tick();
    let after = distance(pos_of(&lab, ids[0]), pos_of(&lab, ids[1]));
    assert!(after > before, "{after} should exceed {before}");
}

#[test]
fn unlike_charges_close_in_until_the_guard_stops_them() {
    let (mut lab, ids) = lab_with(&[
        (Species::Proton, [300.0, 300.0]),
        (Species::Electron, [500.0, 300.0]),
    ]);
    key(&mut lab, 'm');

    let before = distance(pos_of(&lab, ids[0]), pos_of(&lab, ids[1]));
    lab.tick();
    let proton = pos_of(&lab, ids[0]);
    let electron = pos_of(&lab, ids[1]);
    let after = distance(proton, electron);

    assert!(proton[0] > 300.0, "proton should move towards the electron");
    assert!(after < before);
    assert!(after >= 2.0 * Particle::R);
    // the electron's step overshoots so far that the guard rejects it
    assert_eq!(electron, [500.0, 300.0]);
}

#[test]
fn same_sign_overlap_is_not_guarded() {
    // Documents current behaviour: the guard only looks at opposite charges.
    let (mut lab, ids) = lab_with(&[
        (Species::Proton, [300.0, 300.0]),
        (Species::Proton, [310.0, 300.0]),
    ]);
    key(&mut lab, 'm');
    lab.tick();
    assert_ne!(pos_of(&lab, ids[0]), [300.0, 300.0]);
}

#[test]
fn lone_particle_stays_put_in_motion_mode() {
    let (mut lab, ids) = lab_with(&[(Species::Electron, [300.0, 300.0])]);
    key(&mut lab, 'm');
    lab.tick();
    assert_eq!(pos_of(&lab, ids[0]), [300.0, 300.0]);
}

// ==================================================================================
// Voltmeter and equipotential pulse
// ==================================================================================

#[test]
fn pulse_points_match_the_voltmeter_reading() {
    let (mut lab, _) = lab_with(&[(Species::Proton, [500.0, 400.0])]);
    let tip = lab.voltmeter.probe;
    press(&mut lab, tip);
    assert!(lab.voltmeter.held);
    move_to(&mut lab, [700.0, 400.0]);
    press(&mut lab, [600.0, 150.0]);
    assert!(!lab.voltmeter.held);
    lab.tick();

    let reading = lab.voltmeter.volts;
    assert!(reading > 0.0);
    key(&mut lab, 'e');

    assert!(!lab.equipotential.is_empty());
    for p in &lab.equipotential {
        let v = net_potential(*p, lab.charges.iter(), lab.meter());
        assert!((v - reading).abs() <= 1.0 + 1e-9, "{p:?} reads {v}, meter {reading}");
    }
}

#[test]
fn digit_typed_into_a_coefficient_box_still_pulses() {
    let (mut lab, _) = lab_with(&[(Species::Proton, [500.0, 400.0])]);
    let y_box = lab.y_coeff.button.center;
    press(&mut lab, y_box);
    assert!(lab.y_coeff.focused);
    lab.tick();

    key(&mut lab, '3');
    assert_eq!(lab.y_coeff.text, "13");
    assert!(!lab.equipotential.is_empty());
}

#[test]
fn pulse_without_particles_is_empty() {
    let mut lab = lab();
    lab.tick();
    key(&mut lab, 'e');
    assert!(lab.equipotential.is_empty());
}

#[test]
fn pulse_only_runs_in_normal_mode() {
    let (mut lab, _) = lab_with(&[(Species::Proton, [500.0, 400.0])]);
    key(&mut lab, 'm');
    lab.tick();
    key(&mut lab, 'e');
    assert!(lab.equipotential.is_empty());
}

// ==================================================================================
// Path mode
// ==================================================================================

#[test]
fn path_playback_consumes_one_point_per_tick() {
    let (mut lab, ids) = lab_with(&[
        (Species::Proton, [100.0, 100.0]),
        (Species::Electron, [300.0, 300.0]),
    ]);
    let (walker, idle) = (ids[0], ids[1]);

    key(&mut lab, 'p');
    assert_eq!(lab.mode, Mode::Path);
    assert!(!lab.path_stage.finished);

    // record three points for the proton
    press(&mut lab, [100.0, 100.0]);
    assert!(lab.path_stage.drawing);
    let route = [[200.0, 100.0], [210.0, 120.0], [220.0, 140.0]];
    for p in route {
        move_to(&mut lab, p);
    }
    press(&mut lab, [0.0, 0.0]);
    assert!(!lab.path_stage.drawing);

    // an empty path for the electron
    press(&mut lab, [300.0, 300.0]);
    press(&mut lab, [0.0, 0.0]);
    assert_eq!(lab.paths.len(), 2);

    // nothing replays until a non-mode key is pressed
    lab.tick();
    assert_eq!(pos_of(&lab, walker), [100.0, 100.0]);

    key(&mut lab, 'g');
    assert_eq!(lab.mode, Mode::Path);
    for expected in route {
        lab.tick();
        assert_eq!(pos_of(&lab, walker), expected);
        assert_eq!(pos_of(&lab, idle), [300.0, 300.0]);
    }
    lab.tick();
    lab.tick();
    assert_eq!(pos_of(&lab, walker), [220.0, 140.0]);
    assert_eq!(pos_of(&lab, idle), [300.0, 300.0]);
}

#[test]
fn digit_typed_into_a_coefficient_box_still_starts_playback() {
    let (mut lab, ids) = lab_with(&[(Species::Proton, [100.0, 100.0])]);
    let x_box = lab.x_coeff.button.center;
    press(&mut lab, x_box);
    assert!(lab.x_coeff.focused);

    key(&mut lab, 'p');
    press(&mut lab, [100.0, 100.0]);
    move_to(&mut lab, [150.0, 120.0]);
    press(&mut lab, [0.0, 0.0]);

    key(&mut lab, '5');
    assert_eq!(lab.x_coeff.text, "15");
    assert!(lab.path_stage.finished);
    lab.tick();
    assert_eq!(pos_of(&lab, ids[0]), [150.0, 120.0]);
}

#[test]
fn path_mode_does_not_drag() {
    let (mut lab, ids) = lab_with(&[(Species::Proton, [100.0, 100.0])]);
    key(&mut lab, 'p');
    press(&mut lab, [100.0, 100.0]);
    move_to(&mut lab, [400.0, 400.0]);
    assert_eq!(pos_of(&lab, ids[0]), [100.0, 100.0]);
    assert!(lab.particle(ids[0]).is_some_and(|p| !p.held));
}

#[test]
fn newest_electron_wins_path_hit_test() {
    let (mut lab, ids) = lab_with(&[
        (Species::Proton, [100.0, 100.0]),
        (Species::Electron, [105.0, 100.0]),
    ]);
    key(&mut lab, 'p');
    press(&mut lab, [102.0, 100.0]);
    assert_eq!(lab.paths[0].particle, ids[1]);
}

// ==================================================================================
// Modes
// ==================================================================================

#[test]
fn activating_a_mode_clears_the_others() {
    let mut lab = lab();
    for (c, mode) in [
        ('p', Mode::Path),
        ('m', Mode::Motion),
        ('f', Mode::Function),
        ('p', Mode::Path),
        ('f', Mode::Function),
        ('m', Mode::Motion),
    ] {
        key(&mut lab, c);
        assert_eq!(lab.mode, mode);
    }
    key(&mut lab, 'm');
    assert_eq!(lab.mode, Mode::Normal);
}

#[test]
fn function_mode_follows_coefficients() {
    let mut lab = lab();
    key(&mut lab, 'f');
    lab.tick();
    let cell = lab.grid.cell(4, 6).expect("cell exists");
    assert_eq!(cell.vector.magnitude, 2.0);
    assert_eq!(cell.angle, 3.0 * std::f64::consts::PI / 2.0);

    // x coefficient 5
    let x_box = lab.x_coeff.button.center;
    press(&mut lab, x_box);
    assert!(lab.x_coeff.focused);
    lab.handle(InputEvent::KeyPressed(Key::Backspace));
    key(&mut lab, '5');
    assert_eq!(lab.x_coeff.text, "5");
    assert_eq!(lab.mode, Mode::Function);
    lab.tick();
    let cell = lab.grid.cell(4, 6).expect("cell exists");
    assert_eq!(cell.vector.magnitude, 10.0);
}

#[test]
fn unparsable_coefficient_leaves_grid_alone() {
    let mut lab = lab();
    key(&mut lab, 'f');
    lab.tick();
    let before: Vec<f64> = lab.grid.cells().iter().map(|c| c.angle).collect();

    let y_box = lab.y_coeff.button.center;
    press(&mut lab, y_box);
    for _ in 0..25 {
        key(&mut lab, '9');
    }
    lab.tick();
    assert!(lab.y_coeff.value().is_err());
    let after: Vec<f64> = lab.grid.cells().iter().map(|c| c.angle).collect();
    assert_eq!(before, after);
}

// ==================================================================================
// Spawning and deletion
// ==================================================================================

#[test]
fn clicking_a_base_spawns_a_held_clone() {
    let mut lab = lab();
    let base = lab.bases.electron;
    press(&mut lab, base);
    assert_eq!(lab.charges.electrons.len(), 1);
    assert!(lab.charges.electrons[0].held);

    move_to(&mut lab, [400.0, 300.0]);
    press(&mut lab, [400.0, 300.0]);
    assert_eq!(lab.charges.electrons[0].pos, [400.0, 300.0]);
    assert!(!lab.charges.electrons[0].held);

    let sensor_base = lab.bases.sensor;
    press(&mut lab, sensor_base);
    assert_eq!(lab.sensors.len(), 1);
    move_to(&mut lab, [500.0, 300.0]);
    assert!(lab.sensors[0].reading.magnitude > 0.0);
}

#[test]
fn dropped_particles_in_trash_are_deleted() {
    let mut lab = lab();
    let bin = trash_center(&lab);
    lab.add_particle(Species::Proton, bin);
    lab.add_particle(Species::Electron, [bin[0] + 30.0, bin[1]]);
    lab.add_particle(Species::Proton, [600.0, 300.0]);
    lab.add_sensor(bin);
    lab.tick();
    assert_eq!(lab.charges.len(), 1);
    assert!(lab.sensors.is_empty());
}

#[test]
fn held_particle_survives_the_trash_until_released() {
    let mut lab = lab();
    let bin = trash_center(&lab);
    let id = lab.add_particle(Species::Proton, bin);
    press(&mut lab, bin);
    assert!(lab.particle(id).is_some_and(|p| p.held));
    lab.tick();
    assert!(lab.particle(id).is_some());

    press(&mut lab, bin);
    lab.tick();
    assert!(lab.particle(id).is_none());
}
