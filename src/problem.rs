use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// The type used for delivery quantity
pub type Quantity = f64;
/// The type used for distance
pub type Distance = f64;

pub type LocationIndex = usize;
pub type VehicleIndex = usize;

/// The warehouse is always the first location of a problem.
pub const WAREHOUSE: LocationIndex = 0;

/// An immutable split-delivery CVRP instance. Location `0` is the warehouse,
/// locations `1..n` are customers with a demand that must be met in full
/// across all vehicles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProblem", into = "RawProblem")]
pub struct Problem {
    /// The names of the locations, warehouse first.
    names: Vec<String>,
    /// A full distance matrix between the locations. The diagonal is unused,
    /// and the matrix need not be symmetric.
    distances: Vec<Vec<Distance>>,
    /// The demand of each customer, i.e. `demands[c]` belongs to location `c + 1`.
    demands: Vec<Quantity>,
    /// The vehicles available for use in the problem. Assumed to be ordered by index
    vehicles: Vec<Vehicle>,
}

impl Problem {
    pub fn new(
        names: Vec<String>,
        distances: Vec<Vec<Distance>>,
        demands: Vec<Quantity>,
        capacities: Vec<Quantity>,
    ) -> Result<Problem, ProblemConstructionError> {
        use ProblemConstructionError::*;

        let n = names.len();

        if n < 2 {
            return Err(NoCustomers);
        }

        if distances.len() != n || distances.iter().any(|row| row.len() != n) {
            return Err(DistanceSizeMismatch {
                expected: (n, n),
                actual: (
                    distances.len(),
                    distances.iter().map(|r| r.len()).max().unwrap_or(0),
                ),
            });
        }

        for (i, row) in distances.iter().enumerate() {
            for (j, &dist) in row.iter().enumerate() {
                if i != j && !(dist >= 0.0 && dist.is_finite()) {
                    return Err(InvalidDistance { from: i, to: j });
                }
            }
        }

        if demands.len() != n - 1 {
            return Err(DemandSizeMismatch {
                expected: n - 1,
                actual: demands.len(),
            });
        }

        if let Some(c) = demands.iter().position(|&d| !(d >= 0.0 && d.is_finite())) {
            return Err(InvalidDemand { location: c + 1 });
        }

        if capacities.is_empty() {
            return Err(NoVehicles);
        }

        if let Some(v) = capacities.iter().position(|&c| !(c >= 0.0 && c.is_finite())) {
            return Err(InvalidCapacity { vehicle: v });
        }

        Ok(Problem {
            names,
            distances,
            demands,
            vehicles: capacities
                .into_iter()
                .map(|capacity| Vehicle { capacity })
                .collect(),
        })
    }

    /// The total number of locations, warehouse included.
    pub fn num_locations(&self) -> usize {
        self.names.len()
    }

    /// The name of a location.
    pub fn location_name(&self, location: LocationIndex) -> &str {
        self.names[location].as_str()
    }

    /// The distance between two locations
    pub fn distance(&self, from: LocationIndex, to: LocationIndex) -> Distance {
        self.distances[from][to]
    }

    /// The demand of a location. The warehouse has no demand.
    pub fn demand(&self, location: LocationIndex) -> Quantity {
        match location {
            WAREHOUSE => 0.0,
            _ => self.demands[location - 1],
        }
    }

    /// The vehicles available for use in the problem. Ordered by index (continuous, starting at 0)
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// The maximum total quantity this vehicle can deliver across a single route.
    capacity: Quantity,
}

impl Vehicle {
    /// The maximum total quantity this vehicle can deliver across a single route.
    pub fn capacity(&self) -> Quantity {
        self.capacity
    }
}

#[derive(Debug, Clone, Display, Error, PartialEq)]
pub enum ProblemConstructionError {
    /// The size of the distance matrix is not as expected.
    #[display(fmt = "distance matrix has size {:?}, expected {:?}", actual, expected)]
    DistanceSizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// A distance between two distinct locations is negative or non-finite.
    #[display(fmt = "invalid distance from location {} to {}", from, to)]
    InvalidDistance {
        from: LocationIndex,
        to: LocationIndex,
    },
    /// The number of demands does not match the number of customers.
    #[display(fmt = "got {} demands, expected {}", actual, expected)]
    DemandSizeMismatch { expected: usize, actual: usize },
    /// A customer demand is negative or non-finite.
    #[display(fmt = "invalid demand at location {}", location)]
    InvalidDemand { location: LocationIndex },
    /// A vehicle capacity is negative or non-finite.
    #[display(fmt = "invalid capacity for vehicle {}", vehicle)]
    InvalidCapacity { vehicle: VehicleIndex },
    /// There must be at least one customer in addition to the warehouse.
    #[display(fmt = "the problem has no customers")]
    NoCustomers,
    /// There must be at least one vehicle.
    #[display(fmt = "the problem has no vehicles")]
    NoVehicles,
}

/// The serde-facing mirror of `Problem`, so that deserialized instances pass
/// through the same validation as constructed ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProblem {
    locations: Vec<String>,
    distances: Vec<Vec<Distance>>,
    demands: Vec<Quantity>,
    capacities: Vec<Quantity>,
}

impl TryFrom<RawProblem> for Problem {
    type Error = ProblemConstructionError;

    fn try_from(raw: RawProblem) -> Result<Problem, Self::Error> {
        Problem::new(raw.locations, raw.distances, raw.demands, raw.capacities)
    }
}

impl From<Problem> for RawProblem {
    fn from(problem: Problem) -> RawProblem {
        RawProblem {
            locations: problem.names,
            distances: problem.distances,
            demands: problem.demands,
            capacities: problem.vehicles.into_iter().map(|v| v.capacity).collect(),
        }
    }
}
