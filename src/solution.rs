use std::collections::BTreeMap;

use derive_more::{Display, Error};
use log::warn;
use serde::Serialize;

use crate::models::split_delivery::Variables;
use crate::problem::{LocationIndex, Problem, Quantity, VehicleIndex, WAREHOUSE};
use crate::solver::{SolverOutcome, Status};
use crate::utils::EPSILON;

/// An arc indicator counts as used when its solved value is at least this
/// close to 1, absorbing numerical drift in binary variables.
const ARC_THRESHOLD: f64 = 0.9;

/// The decoded result of one optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub status: Status,
    /// The total distance travelled; present iff the status is optimal.
    pub total_distance: Option<f64>,
    /// The ordered route of each vehicle, starting and ending at the
    /// warehouse. Empty for an unused vehicle.
    pub routes: Vec<Vec<LocationIndex>>,
    /// The strictly positive deliveries of each vehicle, per customer.
    pub deliveries: Vec<BTreeMap<LocationIndex, Quantity>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum DecodeError {
    /// The arc walk of a vehicle exceeded the location count without
    /// returning to the warehouse, which a conforming assignment cannot do.
    #[display(fmt = "route of vehicle {} does not return to the warehouse", vehicle)]
    Anomaly { vehicle: VehicleIndex },
}

impl Solution {
    /// Decode a solver outcome into routes and deliveries. A non-optimal
    /// status passes through verbatim, with no routes or deliveries.
    pub fn from_outcome(
        problem: &Problem,
        variables: &Variables,
        outcome: &SolverOutcome,
    ) -> Result<Solution, DecodeError> {
        let vehicles = problem.vehicles().len();

        if outcome.status != Status::Optimal {
            return Ok(Solution {
                status: outcome.status,
                total_distance: None,
                routes: vec![Vec::new(); vehicles],
                deliveries: vec![BTreeMap::new(); vehicles],
            });
        }

        let values = &outcome.values;

        let deliveries = (0..vehicles)
            .map(|v| {
                (1..problem.num_locations())
                    .filter_map(|j| {
                        let amount = values[variables.delivery(v, j).index()];
                        (amount > EPSILON).then_some((j, amount))
                    })
                    .collect()
            })
            .collect();

        let routes = (0..vehicles)
            .map(|v| walk(problem, variables, values, v))
            .collect::<Result<_, _>>()?;

        Ok(Solution {
            status: Status::Optimal,
            total_distance: outcome.objective,
            routes,
            deliveries,
        })
    }
}

/// Reconstruct the ordered route of one vehicle by following its solved arc
/// indicators from the warehouse. Flow conservation gives every visited
/// location exactly one successor, so the walk is deterministic for a
/// conforming assignment; a degenerate one is reported and cut short instead
/// of looping.
fn walk(
    problem: &Problem,
    variables: &Variables,
    values: &[f64],
    v: VehicleIndex,
) -> Result<Vec<LocationIndex>, DecodeError> {
    let n = problem.num_locations();
    let mut route = vec![WAREHOUSE];
    let mut current = WAREHOUSE;

    loop {
        let mut candidates = (0..n).filter(|&j| {
            j != current && values[variables.arc(v, current, j).index()] >= ARC_THRESHOLD
        });

        let next = candidates.next();
        if candidates.next().is_some() {
            warn!(
                "Vehicle {} has more than one arc out of location {}; taking the lowest index.",
                v, current
            );
        }

        match next {
            None | Some(WAREHOUSE) => break,
            Some(j) => {
                route.push(j);
                current = j;

                if route.len() > n {
                    return Err(DecodeError::Anomaly { vehicle: v });
                }
            }
        }
    }

    // A vehicle that never leaves the warehouse is unused.
    if route.len() > 1 {
        route.push(WAREHOUSE);
    } else {
        route.clear();
    }

    Ok(route)
}
