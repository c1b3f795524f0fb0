use approx::assert_relative_eq;

use ikarus_core::{DiffMap, DifferentiableMap, Matrix, Vector, Vector2};

use super::{Action, Config, Event, Method, Status, ik_solve, solve, solve_unobserved};

/// Residual `x - 5` with unit derivative.
fn shifted_line() -> impl DifferentiableMap<f64, 1, 1> {
    DiffMap::new(
        |x: &Vector<f64, 1>| Vector::from([x[0] - 5.0]),
        |_: &Vector<f64, 1>| Matrix::from_rows([[1.0]]),
    )
}

/// Residual `x - (3, 4)` with identity Jacobian.
fn offset_identity() -> impl DifferentiableMap<f64, 2, 2> {
    let target = Vector2::new(3.0, 4.0);
    DiffMap::new(
        move |x: &Vector2| *x - target,
        |_: &Vector2| Matrix::identity(),
    )
}

fn config(max_iters: usize, max_step: f64, method: Method<f64>) -> Config<f64> {
    Config::new(max_iters, 1e-6, max_step, method).expect("valid config")
}

#[test]
fn converges_on_scalar_line() {
    let map = shifted_line();
    let mut x = Vector::from([0.0]);

    let solution = solve_unobserved(&map, &mut x, &Config::default());

    // Default clamp of 0.5 takes nine clamped steps and one final step.
    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 10);
    assert_relative_eq!(x[0], 5.0, epsilon = 1e-4);
    assert!(solution.square_residual() <= 1e-8);
}

#[test]
fn single_newton_step_with_identity_jacobian() {
    let map = offset_identity();
    let mut x = Vector2::zeros();

    let solution = solve_unobserved(&map, &mut x, &config(100, 10.0, Method::PseudoInverse));

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 1);
    assert_eq!(x, Vector2::new(3.0, 4.0));
}

#[test]
fn damped_step_converges_in_one_iteration_to_tolerance() {
    let map = offset_identity();
    let mut x = Vector2::zeros();
    let config = Config::default().with_max_step(10.0).expect("valid step");

    let solution = solve_unobserved(&map, &mut x, &config);

    // Damping shortens the step by a factor of 1 / (1 + λ²), which is well
    // within the default tolerance.
    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 1);
    assert_relative_eq!(x.x(), 3.0, epsilon = 1e-5);
    assert_relative_eq!(x.y(), 4.0, epsilon = 1e-5);
}

#[test]
fn singular_jacobian_stays_finite() {
    let map = DiffMap::new(
        |x: &Vector<f64, 1>| Vector::from([x[0] - 5.0]),
        |_: &Vector<f64, 1>| Matrix::zeros(),
    );

    for method in [
        Method::default(),
        Method::PseudoInverse,
        Method::Transpose,
    ] {
        let mut x = Vector::from([0.0]);
        let solution = solve_unobserved(&map, &mut x, &config(25, 0.5, method));

        assert_eq!(solution.status, Status::MaxIters, "{method:?}");
        assert_eq!(solution.iters, 25);
        assert!(x.is_finite());
        assert_eq!(x[0], 0.0);
    }
}

#[test]
fn pseudo_inverse_moves_from_rank_deficient_start() {
    // The second output is identically zero, so the Jacobian has rank one.
    let map = DiffMap::new(
        |x: &Vector2| Vector2::new(x.x() - 1.0, 0.0),
        |_: &Vector2| Matrix::from_rows([[1.0, 0.0], [0.0, 0.0]]),
    );
    let mut x = Vector2::zeros();

    let solution = solve_unobserved(&map, &mut x, &config(20, 10.0, Method::PseudoInverse));

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 1);
    assert_eq!(x, Vector2::new(1.0, 0.0));
}

#[test]
fn zero_derivative_at_start_does_not_diverge() {
    // f(x) = x² - 4 has a zero derivative at the starting point x = 0.
    let map = DiffMap::new(
        |x: &Vector<f64, 1>| Vector::from([x[0] * x[0] - 4.0]),
        |x: &Vector<f64, 1>| Matrix::from_rows([[2.0 * x[0]]]),
    );
    let mut x = Vector::from([0.0]);

    let solution = solve_unobserved(&map, &mut x, &Config::default().with_max_iters(10));

    assert_eq!(solution.status, Status::MaxIters);
    assert!(x.is_finite());
    assert_relative_eq!(solution.residual[0], -4.0);
}

#[test]
fn clamped_steps_approach_root_monotonically() {
    let map = offset_identity();
    let mut x = Vector2::zeros();
    let max_step = 1.0;

    let mut residuals = Vec::new();
    let mut largest_steps = Vec::new();
    let mut clamped = Vec::new();
    let observer = |event: &Event<'_, f64, 2, 2>| {
        residuals.push(event.square_residual());
        largest_steps.push(event.step.max_abs_component().unwrap_or(0.0));
        clamped.push(event.clamped);
        None
    };

    let solution = solve(
        &map,
        &mut x,
        &config(100, max_step, Method::PseudoInverse),
        observer,
    );

    // The unclamped step (3, 4) is scaled to (0.75, 1) each iteration.
    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 4);
    assert_relative_eq!(x.x(), 3.0, epsilon = 1e-12);
    assert_relative_eq!(x.y(), 4.0, epsilon = 1e-12);

    // The final step lands exactly on the bound, so it is not scaled.
    assert_eq!(clamped, vec![true, true, true, false]);
    assert_eq!(residuals.len(), 4);
    assert!(residuals.windows(2).all(|w| w[1] < w[0]));
    assert!(largest_steps.iter().all(|&s| s <= max_step + 1e-12));
}

#[test]
fn observer_can_stop_iteration() {
    let map = shifted_line();
    let mut x = Vector::from([0.0]);

    let mut calls = 0usize;
    let observer = |event: &Event<'_, f64, 1, 1>| {
        calls += 1;
        if event.iter >= 3 {
            Some(Action::StopEarly)
        } else {
            None
        }
    };

    let solution = solve(&map, &mut x, &Config::default(), observer);

    // Two steps applied; the third is vetoed.
    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 2);
    assert_eq!(calls, 3);
    assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(solution.residual[0], -4.0, epsilon = 1e-12);
}

#[test]
fn event_reports_next_configuration() {
    let map = offset_identity();
    let mut x = Vector2::zeros();

    let mut predicted = None;
    let observer = |event: &Event<'_, f64, 2, 2>| {
        predicted = Some(event.next_x());
        Some(Action::StopEarly)
    };

    solve(&map, &mut x, &Config::default(), observer);

    assert_eq!(x, Vector2::zeros());
    let predicted = predicted.expect("one event");
    assert_relative_eq!(predicted.x(), 0.375, epsilon = 1e-6);
    assert_relative_eq!(predicted.y(), 0.5, epsilon = 1e-12);
}

#[test]
fn non_finite_residual_stops_without_moving() {
    let map = DiffMap::new(
        |_: &Vector2| Vector2::new(f64::NAN, 1.0),
        |_: &Vector2| Matrix::identity(),
    );
    let mut x = Vector2::new(1.0, 2.0);

    let solution = solve_unobserved(&map, &mut x, &Config::default());

    assert_eq!(solution.status, Status::NonFinite);
    assert_eq!(solution.iters, 0);
    assert_eq!(x, Vector2::new(1.0, 2.0));
}

#[test]
fn non_finite_jacobian_stops_without_moving() {
    let map = DiffMap::new(
        |x: &Vector2| *x,
        |_: &Vector2| Matrix::from_rows([[f64::INFINITY, 0.0], [0.0, 1.0]]),
    );
    let mut x = Vector2::new(1.0, 2.0);

    let solution = solve_unobserved(&map, &mut x, &Config::default());

    assert_eq!(solution.status, Status::NonFinite);
    assert_eq!(x, Vector2::new(1.0, 2.0));
}

#[test]
fn already_converged_takes_no_steps() {
    let map = offset_identity();
    let mut x = Vector2::new(3.0, 4.0);

    let solution = solve_unobserved(&map, &mut x, &Config::default());

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 0);
}

#[test]
fn zero_iteration_budget_reports_max_iters() {
    let map = offset_identity();
    let mut x = Vector2::zeros();

    let solution = solve_unobserved(&map, &mut x, &Config::default().with_max_iters(0));

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 0);
    assert_eq!(x, Vector2::zeros());
    assert_relative_eq!(solution.square_residual(), 25.0);
}

#[test]
fn last_step_within_budget_counts_as_converged() {
    let map = offset_identity();
    let mut x = Vector2::zeros();

    let solution = solve_unobserved(&map, &mut x, &config(1, 10.0, Method::PseudoInverse));

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 1);
}

#[test]
fn overconstrained_map_converges() {
    // Two consistent equations in one unknown: x - 2 = 0 and 2x - 4 = 0.
    let map = DiffMap::new(
        |x: &Vector<f64, 1>| Vector2::new(x[0] - 2.0, 2.0 * x[0] - 4.0),
        |_: &Vector<f64, 1>| Matrix::from_rows([[1.0], [2.0]]),
    );
    let mut x = Vector::from([10.0]);

    let solution = solve_unobserved(&map, &mut x, &config(50, 100.0, Method::PseudoInverse));

    assert!(solution.is_converged());
    assert_relative_eq!(x[0], 2.0, epsilon = 1e-9);
}

#[test]
fn transpose_method_converges_on_identity() {
    let map = offset_identity();
    let mut x = Vector2::zeros();

    let solution = solve_unobserved(&map, &mut x, &config(100, 10.0, Method::Transpose));

    assert!(solution.is_converged());
    assert_relative_eq!(x.x(), 3.0, epsilon = 1e-6);
    assert_relative_eq!(x.y(), 4.0, epsilon = 1e-6);
}

#[test]
fn single_precision_solve() {
    let target = Vector2::<f32>::new(1.0, -2.0);
    let map = DiffMap::new(
        move |x: &Vector2<f32>| *x - target,
        |_: &Vector2<f32>| Matrix::identity(),
    );
    let mut x = Vector2::<f32>::zeros();

    let solution = solve_unobserved(&map, &mut x, &Config::default());

    assert!(solution.is_converged());
    assert_relative_eq!(x.x(), 1.0, epsilon = 1e-3);
    assert_relative_eq!(x.y(), -2.0, epsilon = 1e-3);
}

#[test]
fn ik_solve_mutates_in_place() {
    let map = shifted_line();
    let mut x = Vector::from([0.0]);

    ik_solve(&mut x, &map);

    // Convergence is probed by re-evaluating the map.
    assert!(map.evaluate(&x).square_mag() <= 1e-8);
}
