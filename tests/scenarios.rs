//! End-to-end routing scenarios.

use u_fleet::distance::DistanceMatrix;
use u_fleet::local_search::{SearchConfig, StopReason};
use u_fleet::models::RoutingProblem;
use u_fleet::{optimize, ConfigurationError, Optimizer, RoutingError};

fn interior(route: &[usize]) -> &[usize] {
    &route[1..route.len() - 1]
}

#[test]
fn single_vehicle_finds_shortest_cycle() {
    let rows = vec![
        vec![0, 2, 9, 4],
        vec![2, 0, 3, 7],
        vec![9, 3, 0, 5],
        vec![4, 7, 5, 0],
    ];
    let dm = DistanceMatrix::from_rows(rows.clone()).expect("valid");
    let problem = RoutingProblem::from_parts(dm, &[0], &[3], 1_000).expect("valid");

    let plan = optimize(&problem).expect("feasible");
    let route = plan.route(0);
    assert_eq!(route.len(), 5);
    assert_eq!(route[0], 0);
    assert_eq!(route[4], 0);

    // Brute force over the three distinct cycles through nodes 1..=3.
    let orders = [[1, 2, 3], [1, 3, 2], [2, 1, 3]];
    let best = orders
        .iter()
        .map(|o| rows[0][o[0]] + rows[o[0]][o[1]] + rows[o[1]][o[2]] + rows[o[2]][0])
        .min()
        .expect("non-empty");
    assert_eq!(best, 14);
    assert_eq!(plan.total_distance, best);
    assert_eq!(plan.search.stop_reason, StopReason::Converged);
}

#[test]
fn two_depots_share_four_stops() {
    let dm = DistanceMatrix::from_points(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (1.0, 2.0),
        (9.0, 2.0),
        (2.0, -1.0),
        (8.0, -1.0),
    ])
    .expect("valid");
    let problem = RoutingProblem::from_parts(dm, &[0, 1], &[4, 4], i64::MAX).expect("valid");

    let plan = optimize(&problem).expect("feasible");
    assert_eq!(plan.num_routes(), 2);
    assert_eq!(plan.route(0).first(), Some(&0));
    assert_eq!(plan.route(0).last(), Some(&0));
    assert_eq!(plan.route(1).first(), Some(&1));
    assert_eq!(plan.route(1).last(), Some(&1));

    let mut served: Vec<usize> = plan.routes.iter().flat_map(|r| interior(r).to_vec()).collect();
    served.sort_unstable();
    assert_eq!(served, vec![2, 3, 4, 5]);
    for route in &plan.routes {
        let inner = interior(route);
        assert!(!inner.contains(&0) && !inner.contains(&1));
    }
}

#[test]
fn too_little_capacity_is_infeasible() {
    let dm = DistanceMatrix::from_points(&[
        (0.0, 0.0),
        (5.0, 0.0),
        (1.0, 0.0),
        (2.0, 0.0),
        (3.0, 0.0),
        (4.0, 0.0),
    ])
    .expect("valid");
    let problem = RoutingProblem::from_parts(dm, &[0, 1], &[1, 1], i64::MAX).expect("valid");

    match optimize(&problem) {
        Err(RoutingError::Infeasible(err)) => assert_eq!(err.unplaced_count(), 2),
        other => panic!("expected infeasible, got {other:?}"),
    }
}

#[test]
fn too_short_ceiling_is_infeasible() {
    let dm = DistanceMatrix::from_rows(vec![
        vec![0, 1, 50],
        vec![1, 0, 50],
        vec![50, 50, 0],
    ])
    .expect("valid");
    let problem = RoutingProblem::from_parts(dm, &[0], &[5], 10).expect("valid");

    let err = optimize(&problem).expect_err("stop 2 is out of reach");
    assert!(matches!(err, RoutingError::Infeasible(ref e) if e.unplaced == vec![2]));
    assert_eq!(err.to_string(), "1 stop(s) could not be placed on any route");
}

#[test]
fn duplicate_depot_is_rejected_before_search() {
    let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).expect("valid");
    let err = RoutingProblem::from_parts(dm, &[1, 1], &[2, 2], 100).expect_err("shared depot");
    assert_eq!(
        err,
        ConfigurationError::DuplicateDepot {
            depot: 1,
            first: 0,
            second: 1
        }
    );
    let routing: RoutingError = err.into();
    assert!(matches!(routing, RoutingError::Configuration(_)));
}

#[test]
fn more_vehicles_than_locations_is_rejected() {
    let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0)]).expect("valid");
    let err = RoutingProblem::from_parts(dm, &[0, 1, 2], &[1, 1, 1], 100).expect_err("too many");
    assert_eq!(
        err,
        ConfigurationError::FewerLocationsThanVehicles {
            locations: 2,
            vehicles: 3
        }
    );
}

#[test]
fn repeated_runs_are_identical() {
    let points: Vec<(f64, f64)> = (0..12)
        .map(|i| {
            let t = i as f64;
            ((t * 7.3) % 11.0, (t * 3.1) % 9.0)
        })
        .collect();
    let dm = DistanceMatrix::from_points(&points).expect("valid");
    let problem =
        RoutingProblem::from_parts(dm, &[0, 1, 2], &[4, 4, 4], i64::MAX).expect("valid");

    let optimizer = Optimizer::new(SearchConfig::default());
    let first = optimizer.optimize(&problem).expect("feasible");
    let second = optimizer.optimize(&problem).expect("feasible");
    assert_eq!(first.routes, second.routes);
    assert_eq!(
        serde_json::to_string(&first.routes).expect("serializable"),
        serde_json::to_string(&second.routes).expect("serializable")
    );
}

#[test]
fn idle_vehicle_returns_depot_pair() {
    // Vehicle 1 lives far away; with no span penalty it stays home.
    let dm = DistanceMatrix::from_points(&[
        (0.0, 0.0),
        (100.0, 100.0),
        (1.0, 0.0),
        (0.0, 1.0),
    ])
    .expect("valid");
    let problem = RoutingProblem::from_parts(dm, &[0, 1], &[2, 2], i64::MAX).expect("valid");

    let plan = Optimizer::new(SearchConfig::default().with_span_cost_coefficient(0))
        .optimize(&problem)
        .expect("feasible");
    assert_eq!(plan.route(1), &[1, 1]);
    assert_eq!(plan.route_distances[1], 0);
}

#[test]
fn plan_serializes_to_json() {
    let dm = DistanceMatrix::from_rows(vec![vec![0, 3], vec![3, 0]]).expect("valid");
    let problem = RoutingProblem::from_parts(dm, &[0], &[1], 10).expect("valid");
    let plan = optimize(&problem).expect("feasible");

    let json = serde_json::to_value(&plan).expect("serializable");
    assert_eq!(json["routes"], serde_json::json!([[0, 1, 0]]));
    assert_eq!(json["total_distance"], 6);
    assert_eq!(json["search"]["stop_reason"], "Converged");
}

#[test]
fn distances_too_large_for_route_costs_are_rejected() {
    let huge = i64::MAX / 2 + 1;
    let err = DistanceMatrix::from_rows(vec![vec![0, huge], vec![huge, 0]])
        .expect_err("route 0→1→0 would overflow");
    assert!(matches!(err, ConfigurationError::DistanceOverflow { .. }));

    let err = DistanceMatrix::from_points(&[(0.0, 0.0), (1e15, 0.0)]).expect_err("too far apart");
    assert_eq!(err, ConfigurationError::DistanceOutOfRange { from: 0, to: 1 });
}
