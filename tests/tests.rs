use approx::{assert_abs_diff_eq, assert_relative_eq};

use gravsim::{
    factory, AdamsTables, Body, DerivativeSample, History, Integrator, Method, NVec3,
    NewtonianGravity, SimError, Universe,
};

/// Build a simple 2-body universe separated along the x-axis
fn two_body_universe(dist: f64, m1: f64, m2: f64) -> Universe {
    let b1 = Body::new(
        NVec3::new(-dist / 2.0, 0.0, 0.0),
        NVec3::zeros(),
        m1,
        1.0,
    );
    let b2 = Body::new(NVec3::new(dist / 2.0, 0.0, 0.0), NVec3::zeros(), m2, 1.0);
    Universe::new(vec![b1, b2])
}

/// Single body at the origin with the given velocity
fn single_body(velocity: NVec3) -> Universe {
    Universe::new(vec![Body::new(NVec3::zeros(), velocity, 1.0, 1.0)])
}

/// Gravity with a round constant, easier on the eyes than SI
fn test_gravity() -> NewtonianGravity {
    NewtonianGravity {
        g: 0.1,
        min_separation: 0.1,
    }
}

/// Two equal masses on a circular orbit around their barycenter:
/// g = 1, separation 2, speed 0.5 each, period 4*pi
fn circular_orbit_universe() -> (Universe, NewtonianGravity, f64) {
    let b1 = Body::new(
        NVec3::new(-1.0, 0.0, 0.0),
        NVec3::new(0.0, -0.5, 0.0),
        1.0,
        1.0,
    );
    let b2 = Body::new(
        NVec3::new(1.0, 0.0, 0.0),
        NVec3::new(0.0, 0.5, 0.0),
        1.0,
        1.0,
    );
    let gravity = NewtonianGravity {
        g: 1.0,
        min_separation: 0.1,
    };
    let period = 4.0 * std::f64::consts::PI;
    (Universe::new(vec![b1, b2]), gravity, period)
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let mut universe = two_body_universe(1.0, 2.0, 3.0);
    let gravity = test_gravity();

    gravity.acceleration_of_all(&mut universe).unwrap();

    let net = universe.bodies[0].acceleration * universe.bodies[0].mass
        + universe.bodies[1].acceleration * universe.bodies[1].mass;

    assert!(net.norm() < 1e-12, "net momentum change not zero: {net:?}");
}

#[test]
fn gravity_points_toward_other_body() {
    let mut universe = two_body_universe(2.0, 1.0, 1.0);
    let gravity = test_gravity();

    gravity.acceleration_of_all(&mut universe).unwrap();

    let dx = universe.bodies[1].position - universe.bodies[0].position;
    assert!(
        universe.bodies[0].acceleration.dot(&dx) > 0.0,
        "acceleration is not toward the second body"
    );
}

#[test]
fn gravity_inverse_square_law() {
    let gravity = test_gravity();
    let mut universe_r = two_body_universe(1.0, 1.0, 1.0);
    let mut universe_2r = two_body_universe(2.0, 1.0, 1.0);

    gravity.acceleration_of_all(&mut universe_r).unwrap();
    gravity.acceleration_of_all(&mut universe_2r).unwrap();

    let ratio = universe_r.bodies[0].acceleration.norm()
        / universe_2r.bodies[0].acceleration.norm();
    assert_relative_eq!(ratio, 4.0, epsilon = 1e-9);
}

#[test]
fn gravity_evaluates_at_shifted_position() {
    // Pair at +-1 on x; evaluating body 0 from the origin halves the distance
    let universe = two_body_universe(2.0, 1.0, 1.0);
    let gravity = test_gravity();

    let at_origin = gravity
        .acceleration_of(&universe, 0, &NVec3::zeros())
        .unwrap();

    // -g * m * (0 - 1, 0, 0) / 1^3
    assert_relative_eq!(at_origin, NVec3::new(0.1, 0.0, 0.0), epsilon = 1e-15);
}

#[test]
fn gravity_reports_close_encounter() {
    let universe = two_body_universe(0.05, 1.0, 1.0);
    let gravity = test_gravity();

    let position = universe.bodies[0].position;
    let result = gravity.acceleration_of(&universe, 0, &position);
    match result {
        Err(SimError::Collision {
            first,
            second,
            distance,
            ..
        }) => {
            assert_eq!((first, second), (0, 1));
            assert_relative_eq!(distance, 0.05, epsilon = 1e-12);
        }
        other => panic!("expected a collision error, got {other:?}"),
    }
}

// ==================================================================================
// Step contract tests (all methods)
// ==================================================================================

#[test]
fn empty_universe_computes_nothing() {
    for method in Method::ALL {
        let mut universe = Universe::default();
        let mut integrator = Integrator::new(method);
        for _ in 0..3 {
            integrator.step(&mut universe, 1.0).unwrap();
        }
        assert!(universe.is_empty());
    }
}

#[test]
fn static_single_body_does_not_move() {
    for method in Method::ALL {
        let mut universe = single_body(NVec3::zeros());
        let mut integrator = Integrator::new(method);
        // enough steps to push the order-8 methods past their bootstrap
        for _ in 0..12 {
            integrator.step(&mut universe, 1.0).unwrap();
        }
        let body = &universe.bodies[0];
        assert_abs_diff_eq!(body.position, NVec3::zeros(), epsilon = 1e-15);
        assert_abs_diff_eq!(body.velocity, NVec3::zeros(), epsilon = 1e-15);
    }
}

#[test]
fn single_body_moves_uniformly() {
    for method in Method::ALL {
        let mut universe = single_body(NVec3::new(1.0, 0.0, 0.0));
        let mut integrator = Integrator::new(method);
        integrator.step(&mut universe, 1.0).unwrap();

        let body = &universe.bodies[0];
        assert_abs_diff_eq!(body.position, NVec3::new(1.0, 0.0, 0.0), epsilon = 1e-8);
        assert_abs_diff_eq!(body.velocity, NVec3::new(1.0, 0.0, 0.0), epsilon = 1e-8);
    }
}

#[test]
fn uniform_motion_survives_the_multistep_switch() {
    // 12 steps take every method well past bootstrap; with zero force each
    // Adams coefficient row sums to its divisor, so motion stays exact
    for method in Method::ALL {
        let mut universe = single_body(NVec3::new(1.0, 0.0, 0.0));
        let mut integrator = Integrator::new(method);
        for _ in 0..12 {
            integrator.step(&mut universe, 1.0).unwrap();
        }
        let body = &universe.bodies[0];
        assert_abs_diff_eq!(body.position, NVec3::new(12.0, 0.0, 0.0), epsilon = 1e-8);
        assert_abs_diff_eq!(body.velocity, NVec3::new(1.0, 0.0, 0.0), epsilon = 1e-8);
    }
}

#[test]
fn every_method_fails_on_first_step_when_bodies_touch() {
    for method in Method::ALL {
        let mut universe = two_body_universe(0.05, 1.0, 1.0);
        let mut integrator = Integrator::new(method);
        let result = integrator.step(&mut universe, 1.0);
        assert!(
            matches!(result, Err(SimError::Collision { .. })),
            "{method} should have reported the close pair"
        );
    }
}

// ==================================================================================
// Multistep bootstrap and history tests
// ==================================================================================

/// Orbit-ish two-body setup that produces nonzero, nontrivial forces
fn orbiting_pair() -> Universe {
    let mut universe = two_body_universe(2.0, 1.0, 1.0);
    universe.bodies[0].velocity = NVec3::new(0.0, -0.1, 0.0);
    universe.bodies[1].velocity = NVec3::new(0.0, 0.1, 0.0);
    universe
}

#[test]
fn bootstrap_steps_match_runge_kutta() {
    let cases = [
        (Method::Ab4, 4usize),
        (Method::Abm4, 4),
        (Method::Ab8, 8),
        (Method::Abm8, 8),
    ];
    for (method, order) in cases {
        let mut adams_universe = orbiting_pair();
        let mut rk4_universe = orbiting_pair();
        let mut adams = Integrator::with_gravity(method, test_gravity());
        let mut rk4 = Integrator::with_gravity(Method::Rk4, test_gravity());

        for _ in 0..order - 1 {
            adams.step(&mut adams_universe, 0.1).unwrap();
            rk4.step(&mut rk4_universe, 0.1).unwrap();
        }

        for (a, b) in adams_universe.bodies.iter().zip(&rk4_universe.bodies) {
            assert_relative_eq!(a.position, b.position, epsilon = 1e-14);
            assert_relative_eq!(a.velocity, b.velocity, epsilon = 1e-14);
        }
        assert_eq!(adams.history_len(), order - 1, "bootstrap should be complete");
    }
}

#[test]
fn history_window_never_exceeds_order_minus_one() {
    let mut universe = orbiting_pair();
    let mut integrator = Integrator::with_gravity(Method::Abm4, test_gravity());

    for step in 1..=10 {
        integrator.step(&mut universe, 0.1).unwrap();
        assert!(integrator.history_len() <= 3);
        if step >= 3 {
            assert_eq!(integrator.history_len(), 3);
        }
    }
}

#[test]
fn reset_clears_history_and_is_idempotent() {
    let mut universe = orbiting_pair();
    let mut integrator = Integrator::with_gravity(Method::Ab4, test_gravity());

    for _ in 0..5 {
        integrator.step(&mut universe, 0.1).unwrap();
    }
    assert_eq!(integrator.history_len(), 3);

    integrator.reset();
    assert_eq!(integrator.history_len(), 0);
    integrator.reset();
    assert_eq!(integrator.history_len(), 0);

    // bootstrap starts over after a reset
    integrator.step(&mut universe, 0.1).unwrap();
    assert_eq!(integrator.history_len(), 1);
}

#[test]
fn history_restarts_when_body_count_changes() {
    let mut universe = orbiting_pair();
    let mut integrator = Integrator::with_gravity(Method::Ab4, test_gravity());

    for _ in 0..5 {
        integrator.step(&mut universe, 0.1).unwrap();
    }
    assert_eq!(integrator.history_len(), 3);

    universe.bodies.pop();
    integrator.step(&mut universe, 0.1).unwrap();
    // stale frames were dropped; only the fresh bootstrap frame remains
    assert_eq!(integrator.history_len(), 1);
}

#[test]
fn history_ring_evicts_oldest_first() {
    let marker = |x: f64| DerivativeSample {
        velocity: NVec3::new(x, 0.0, 0.0),
        acceleration: NVec3::zeros(),
    };

    let mut history = History::new(3);
    assert!(history.is_empty());

    for i in 0..3 {
        history.push(vec![marker(i as f64)]);
    }
    assert!(history.is_full());
    assert_eq!(history.frame(0)[0].velocity.x, 0.0);
    assert_eq!(history.frame(2)[0].velocity.x, 2.0);

    history.push(vec![marker(3.0)]);
    assert_eq!(history.len(), 3);
    assert_eq!(history.frame(0)[0].velocity.x, 1.0);
    assert_eq!(history.frame(2)[0].velocity.x, 3.0);

    history.push(vec![marker(4.0)]);
    assert_eq!(history.frame(0)[0].velocity.x, 2.0);
    assert_eq!(history.frame(2)[0].velocity.x, 4.0);

    history.clear();
    assert_eq!(history.len(), 0);
    assert_eq!(history.capacity(), 3);
}

// ==================================================================================
// Coefficient table tests
// ==================================================================================

#[test]
fn tables_hold_the_classic_coefficients() {
    let order4 = AdamsTables::new(4).unwrap();
    assert_eq!(order4.bashforth(0).unwrap(), 55.0);
    assert_eq!(order4.bashforth(3).unwrap(), -9.0);
    assert_eq!(order4.moulton(0).unwrap(), 9.0);
    assert_eq!(order4.moulton(3).unwrap(), 1.0);
    assert_relative_eq!(order4.divisor(), 1.0 / 24.0);

    let order8 = AdamsTables::new(8).unwrap();
    assert_eq!(order8.bashforth(0).unwrap(), 434241.0);
    assert_eq!(order8.moulton(7).unwrap(), 1375.0);
    assert_relative_eq!(order8.divisor(), 1.0 / 120960.0);
}

#[test]
fn table_lookups_past_the_order_fail() {
    let tables = AdamsTables::new(4).unwrap();
    assert!(tables.bashforth(3).is_ok());
    assert!(matches!(
        tables.bashforth(4),
        Err(SimError::CoefficientIndex { index: 4, order: 4 })
    ));
    assert!(matches!(
        tables.moulton(4),
        Err(SimError::CoefficientIndex { index: 4, order: 4 })
    ));
}

#[test]
fn tables_exist_only_for_orders_4_and_8() {
    assert!(AdamsTables::new(4).is_ok());
    assert!(AdamsTables::new(8).is_ok());
    for order in [0, 1, 2, 3, 5, 6, 7, 9, 16] {
        assert!(matches!(
            AdamsTables::new(order),
            Err(SimError::UnsupportedOrder(o)) if o == order
        ));
    }
}

// ==================================================================================
// Factory tests
// ==================================================================================

#[test]
fn factory_round_trips_every_method_key() {
    for method in Method::ALL {
        let integrator = factory(method.key()).unwrap();
        assert_eq!(integrator.method(), method);
        assert_eq!(integrator.history_len(), 0, "fresh history expected");
    }
}

#[test]
fn factory_rejects_unknown_method() {
    assert!(matches!(
        factory("rk5"),
        Err(SimError::UnknownMethod(name)) if name == "rk5"
    ));
}

// ==================================================================================
// Orbit tests
// ==================================================================================

#[test]
fn rk4_closes_a_circular_orbit() {
    let (mut universe, gravity, period) = circular_orbit_universe();
    let start: Vec<NVec3> = universe.bodies.iter().map(|b| b.position).collect();

    let steps = 20_000;
    let dt = period / steps as f64;
    let mut integrator = Integrator::with_gravity(Method::Rk4, gravity);
    for _ in 0..steps {
        integrator.step(&mut universe, dt).unwrap();
    }

    for (body, initial) in universe.bodies.iter().zip(&start) {
        assert!(
            (body.position - initial).norm() < 1e-3,
            "orbit did not close: ended {:?}, started {initial:?}",
            body.position
        );
    }
}

#[test]
fn predictor_corrector_tracks_runge_kutta_on_an_orbit() {
    let (universe, gravity, period) = circular_orbit_universe();
    let steps = 500;
    let dt = period / 20_000.0;

    let mut rk4_universe = universe.clone();
    let mut abm_universe = universe;
    let mut rk4 = Integrator::with_gravity(Method::Rk4, gravity.clone());
    let mut abm = Integrator::with_gravity(Method::Abm8, gravity);

    for _ in 0..steps {
        rk4.step(&mut rk4_universe, dt).unwrap();
        abm.step(&mut abm_universe, dt).unwrap();
    }

    for (a, b) in abm_universe.bodies.iter().zip(&rk4_universe.bodies) {
        assert!(
            (a.position - b.position).norm() < 1e-5,
            "methods diverged: {:?} vs {:?}",
            a.position,
            b.position
        );
    }
}

// ==================================================================================
// State helper tests
// ==================================================================================

#[test]
fn barycenter_weights_by_mass() {
    let universe = two_body_universe(2.0, 1.0, 3.0);
    // masses 1 and 3 at -1 and +1 put the barycenter at +0.5
    assert_relative_eq!(
        universe.barycenter().unwrap(),
        NVec3::new(0.5, 0.0, 0.0),
        epsilon = 1e-15
    );
    assert!(Universe::default().barycenter().is_none());
}
