use std::collections::BTreeMap;

use splitroute::solver::MicroLpSolver;
use splitroute::{Problem, SplitDeliveryModel, Status};

fn instance(distances: Vec<Vec<f64>>, demands: Vec<f64>, capacities: Vec<f64>) -> Problem {
    let names = std::iter::once("W".to_string())
        .chain((0..demands.len()).map(|i| format!("{}", (b'A' + i as u8) as char)))
        .collect();
    Problem::new(names, distances, demands, capacities).unwrap()
}

fn solve(problem: &Problem) -> splitroute::Solution {
    SplitDeliveryModel::solve(problem, &MicroLpSolver).unwrap()
}

#[test]
fn single_customer_out_and_back() {
    // 1 vehicle, 1 customer with demand 5 and plenty of capacity
    let problem = instance(
        vec![vec![0.0, 10.0], vec![10.0, 0.0]],
        vec![5.0],
        vec![15.0],
    );

    let solution = solve(&problem);

    assert_eq!(solution.status, Status::Optimal);
    assert!((solution.total_distance.unwrap() - 20.0).abs() < 1e-6);
    assert_eq!(solution.routes[0], vec![0, 1, 0]);
    assert_eq!(solution.deliveries[0], BTreeMap::from([(1, 5.0)]));
}

#[test]
fn demand_exceeding_fleet_capacity_is_infeasible() {
    // one vehicle of capacity 6 cannot serve two customers demanding 5 each
    let problem = instance(
        vec![
            vec![0.0, 10.0, 10.0],
            vec![10.0, 0.0, 10.0],
            vec![10.0, 10.0, 0.0],
        ],
        vec![5.0, 5.0],
        vec![6.0],
    );

    let solution = solve(&problem);

    assert_eq!(solution.status, Status::Infeasible);
    assert_eq!(solution.total_distance, None);
    assert!(solution.routes.iter().all(|r| r.is_empty()));
    assert!(solution.deliveries.iter().all(|d| d.is_empty()));
}

#[test]
fn two_vehicles_are_also_insufficient_when_combined_capacity_falls_short() {
    let problem = instance(
        vec![vec![0.0, 10.0], vec![10.0, 0.0]],
        vec![10.0],
        vec![4.0, 4.0],
    );

    assert_eq!(solve(&problem).status, Status::Infeasible);
}

#[test]
fn a_single_demand_splits_across_two_vehicles() {
    // demand 10 exceeds either capacity of 6, but not their sum
    let problem = instance(
        vec![vec![0.0, 10.0], vec![10.0, 0.0]],
        vec![10.0],
        vec![6.0, 6.0],
    );

    let solution = solve(&problem);
    assert_eq!(solution.status, Status::Optimal);

    // both vehicles must make the round trip
    assert!((solution.total_distance.unwrap() - 40.0).abs() < 1e-6);
    for v in 0..2 {
        assert_eq!(solution.routes[v], vec![0, 1, 0]);
        let delivered = solution.deliveries[v][&1];
        assert!(delivered > 0.0 && delivered <= 6.0 + 1e-6);
    }

    let total: f64 = (0..2).map(|v| solution.deliveries[v][&1]).sum();
    assert!((total - 10.0).abs() < 1e-6);
}

#[test]
fn asymmetric_distances_pick_the_cheap_direction() {
    // going W -> A -> B -> W costs 3; every other tour costs more
    let problem = instance(
        vec![
            vec![0.0, 1.0, 5.0],
            vec![5.0, 0.0, 1.0],
            vec![1.0, 5.0, 0.0],
        ],
        vec![2.0, 2.0],
        vec![10.0],
    );

    let solution = solve(&problem);

    assert_eq!(solution.status, Status::Optimal);
    assert!((solution.total_distance.unwrap() - 3.0).abs() < 1e-6);
    assert_eq!(solution.routes[0], vec![0, 1, 2, 0]);
}

#[test]
fn customers_without_demand_are_not_visited() {
    let problem = instance(
        vec![
            vec![0.0, 10.0, 100.0],
            vec![10.0, 0.0, 100.0],
            vec![100.0, 100.0, 0.0],
        ],
        vec![5.0, 0.0],
        vec![15.0],
    );

    let solution = solve(&problem);

    assert_eq!(solution.status, Status::Optimal);
    assert!((solution.total_distance.unwrap() - 20.0).abs() < 1e-6);
    assert_eq!(solution.routes[0], vec![0, 1, 0]);
    assert_eq!(solution.deliveries[0], BTreeMap::from([(1, 5.0)]));
}

#[test]
fn zero_demand_everywhere_needs_no_vehicle() {
    let problem = instance(
        vec![vec![0.0, 10.0], vec![10.0, 0.0]],
        vec![0.0],
        vec![15.0],
    );

    let solution = solve(&problem);

    assert_eq!(solution.status, Status::Optimal);
    assert!(solution.total_distance.unwrap().abs() < 1e-6);
    assert!(solution.routes[0].is_empty());
    assert!(solution.deliveries[0].is_empty());
}

#[test]
fn resolving_the_same_instance_is_idempotent() {
    let problem = instance(
        vec![
            vec![0.0, 4.0, 7.0],
            vec![4.0, 0.0, 2.0],
            vec![7.0, 2.0, 0.0],
        ],
        vec![3.0, 4.0],
        vec![10.0],
    );

    let first = solve(&problem);
    let second = solve(&problem);

    assert_eq!(first.status, Status::Optimal);
    assert_eq!(second.status, Status::Optimal);
    assert!((first.total_distance.unwrap() - second.total_distance.unwrap()).abs() < 1e-9);
}
