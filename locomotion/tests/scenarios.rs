use locomotion::{
    GroundLayers, GroundWorld, LandingSource, LegController, LocomotionSettings, Quat,
    TorsoPose, Vec3,
};

const TORSO_HEIGHT: f32 = 0.125;

/// Front-right, back-left, front-left, back-right under a torso at the origin, +Z forward.
fn feet() -> Vec<Vec3> {
    vec![
        Vec3::new(-0.25, 0.0, 0.25),
        Vec3::new(0.25, 0.0, -0.25),
        Vec3::new(0.25, 0.0, 0.25),
        Vec3::new(-0.25, 0.0, -0.25),
    ]
}

fn pose(x: f32, rotation: Quat) -> TorsoPose {
    TorsoPose::unparented(Vec3::new(x, TORSO_HEIGHT, 0.0), rotation)
}

#[test]
fn stationary_torso_never_steps() {
    let ground = GroundWorld::flat(0.0, GroundLayers::all());
    let mut ctrl =
        LegController::new(LocomotionSettings::default(), &pose(0.0, Quat::identity()), &feet())
            .unwrap();

    let mut rotation = Quat::identity();
    for _ in 0..100 {
        let report = ctrl.tick(&pose(0.0, rotation), &ground);
        assert!(report.candidate.is_none());
        assert!(report.started.is_none());
        rotation = report.rotation.unwrap_or(rotation);
    }

    assert!(!ctrl.is_stepping());
    assert_eq!(ctrl.velocity(), Vec3::zeros());
    for (target, expected) in ctrl.targets().zip(feet()) {
        assert!((target - expected).norm() < 1.0e-5);
    }
    // Level feet keep a level torso.
    assert!((rotation * Vec3::y() - Vec3::y()).norm() < 1.0e-5);
}

#[test]
fn zero_velocity_desired_positions_are_the_rest_offsets() {
    let start = pose(0.0, Quat::identity());
    let ctrl = LegController::new(LocomotionSettings::default(), &start, &feet()).unwrap();

    let turned = TorsoPose::unparented(
        Vec3::new(1.0, TORSO_HEIGHT, 2.0),
        Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2),
    );
    for (leg, desired) in ctrl.legs().iter().zip(ctrl.default_positions(&turned)) {
        assert!((desired - turned.transform_point(&leg.default_offset)).norm() < 1.0e-6);
    }
}

#[test]
fn walking_steps_one_leg_at_a_time_and_lands_exactly() {
    let ground = GroundWorld::flat(0.0, GroundLayers::all());
    let settings = LocomotionSettings::default();
    let sub_steps = settings.sub_steps() as usize;
    let mut ctrl = LegController::new(settings, &pose(0.0, Quat::identity()), &feet()).unwrap();

    let mut rotation = Quat::identity();
    let mut in_flight = None;
    let mut steps = 0;

    for tick in 1..=300usize {
        let before: Vec<Vec3> = ctrl.legs().iter().map(|leg| leg.last_position).collect();
        let report = ctrl.tick(&pose(tick as f32 * 0.01, rotation), &ground);
        rotation = report.rotation.unwrap_or(rotation);

        let airborne = ctrl.legs().iter().filter(|leg| leg.stepping).count();
        assert!(airborne <= 1, "tick {tick}: {airborne} legs in the air");

        // Planted legs publish exactly where they stand.
        for (i, leg) in ctrl.legs().iter().enumerate() {
            if !leg.stepping && report.landed != Some(i) {
                assert_eq!(leg.target, leg.last_position);
                assert_eq!(leg.last_position, before[i]);
            }
        }

        if let Some(leg) = report.landed {
            let (started_leg, started_tick, landing) = in_flight.take().expect("landing without a step");
            assert_eq!(leg, started_leg);
            // floor(S) sub-steps on ticks start..start+S-1, snap on the next.
            assert_eq!(tick - started_tick, sub_steps);
            assert_eq!(ctrl.legs()[leg].target, landing);
            assert_eq!(ctrl.legs()[leg].last_position, landing);
            steps += 1;
        }

        if let Some(started) = report.started {
            assert!(in_flight.is_none(), "tick {tick}: step started while another was running");
            let candidate = report.candidate.expect("step without a candidate");
            assert_eq!(started.leg, candidate.leg);
            assert!(candidate.drift > settings.step_size);
            assert_eq!(started.source, LandingSource::Forward);
            // Ball sweep onto the floor touches at y = 0.
            assert!(started.landing.y.abs() < 1.0e-4);
            in_flight = Some((started.leg, tick, started.landing));
        }
    }

    assert!(steps >= 4, "only {steps} steps in 3m of walking");
}

#[test]
fn empty_layer_mask_lands_on_the_raw_target() {
    let ground = GroundWorld::flat(0.0, GroundLayers::all());
    let settings = LocomotionSettings::default()
        .with_body_orientation(false)
        .with_ground_layers(GroundLayers::empty());
    let mut ctrl = LegController::new(settings, &pose(0.0, Quat::identity()), &feet()).unwrap();

    let mut started = None;
    for tick in 1..=60 {
        if let Some(s) = ctrl.tick(&pose(tick as f32 * 0.01, Quat::identity()), &ground).started {
            started = Some(s);
            break;
        }
    }

    let started = started.expect("no step in 60 ticks");
    assert_eq!(started.source, LandingSource::Predicted);
    assert_eq!(started.landing, started.target);
}

#[test]
fn torso_tilts_toward_the_foot_plane() {
    let ground = GroundWorld::flat(0.0, GroundLayers::all());
    // Left feet (+X) raised: the plane is tilted about Z.
    let mut feet = feet();
    feet[1].y = 0.1;
    feet[2].y = 0.1;
    let normal = (feet[0] - feet[1]).cross(&(feet[2] - feet[3])).normalize();

    // Steps disabled so the foot plane stays put.
    let settings = LocomotionSettings::default().with_step_size(10.0);
    let mut ctrl = LegController::new(settings, &pose(0.0, Quat::identity()), &feet).unwrap();

    // Each tick blends 1 / (S + 1) of the way, so after k ticks the remaining tilt
    // satisfies tan(angle_k) <= (S / (S + 1))^k * tan(angle_0).
    let s = settings.smoothness;
    let initial_tan = Vec3::y().angle(&normal).tan();

    let mut rotation = Quat::identity();
    let mut previous_error = f32::MAX;
    for k in 1..=200 {
        let report = ctrl.tick(&pose(0.0, rotation), &ground);
        rotation = report.rotation.expect("orientation should be solvable");
        let up = rotation * Vec3::y();
        let error = (up - normal).norm();
        assert!(error <= previous_error + 1.0e-6);
        previous_error = error;

        if k as f32 <= s + 1.0 {
            let bound = (s / (s + 1.0)).powi(k) * initial_tan;
            let remaining = up.angle(&normal).tan();
            assert!(remaining <= bound + 1.0e-5, "tick {k}: tan {remaining} above {bound}");
        }
    }

    assert!(previous_error < 1.0e-3);
    // Heading follows the parent's forward.
    assert!((rotation * Vec3::z() - Vec3::z()).norm() < 1.0e-4);
}

#[test]
fn steps_onto_a_raised_platform() {
    use locomotion::{ColliderShapeDef, GroundStaticDef};

    let ground = GroundWorld::build(vec![
        GroundStaticDef {
            id: 0,
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
            shape: ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
            layers: GroundLayers::all(),
        },
        GroundStaticDef {
            id: 1,
            translation: Vec3::new(5.0, 0.0, 0.0),
            rotation: Quat::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: Vec3::new(4.0, 0.05, 4.0),
            },
            layers: GroundLayers::all(),
        },
    ]);

    let settings = LocomotionSettings::default().with_body_orientation(false);
    let mut ctrl = LegController::new(settings, &pose(0.0, Quat::identity()), &feet()).unwrap();

    let mut landings = Vec::new();
    for tick in 1..=300 {
        if let Some(started) = ctrl.tick(&pose(tick as f32 * 0.01, Quat::identity()), &ground).started {
            landings.push(started.landing);
        }
    }

    // Feet past the platform edge land on its top face.
    let on_platform: Vec<_> = landings.iter().filter(|p| p.x > 1.2).collect();
    assert!(!on_platform.is_empty());
    for p in on_platform {
        assert!((p.y - 0.05).abs() < 1.0e-3, "landing {p:?} is not on the platform top");
    }
}
