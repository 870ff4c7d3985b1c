use crate::problem::{Distance, LocationIndex, Problem, Quantity, VehicleIndex};

#[allow(non_snake_case)]
pub struct Sets {
    /// Set of locations, warehouse first
    pub L: Vec<LocationIndex>,
    /// Set of customers, i.e. every location except the warehouse
    pub C: Vec<LocationIndex>,
    /// Set of vehicles
    pub V: Vec<VehicleIndex>,
}

impl Sets {
    pub fn new(problem: &Problem) -> Sets {
        Sets {
            L: (0..problem.num_locations()).collect(),
            C: (1..problem.num_locations()).collect(),
            V: (0..problem.vehicles().len()).collect(),
        }
    }
}

pub struct Parameters {
    /// The distance between every ordered pair of locations (diagonal unused)
    pub distance: Vec<Vec<Distance>>,
    /// The demand of each location; zero for the warehouse
    pub demand: Vec<Quantity>,
    /// The capacity of each vehicle
    pub capacity: Vec<Quantity>,
    /// The total number of locations, which bounds the ordering values used
    /// for subtour elimination
    pub locations: usize,
}

impl Parameters {
    pub fn new(problem: &Problem) -> Parameters {
        let n = problem.num_locations();

        Parameters {
            distance: (0..n)
                .map(|i| (0..n).map(|j| problem.distance(i, j)).collect())
                .collect(),
            demand: (0..n).map(|j| problem.demand(j)).collect(),
            capacity: problem.vehicles().iter().map(|v| v.capacity()).collect(),
            locations: n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_and_parameters_from_problem() {
        let problem = Problem::new(
            vec!["W".into(), "A".into(), "B".into()],
            vec![
                vec![0.0, 1.0, 2.0],
                vec![3.0, 0.0, 4.0],
                vec![5.0, 6.0, 0.0],
            ],
            vec![7.0, 8.0],
            vec![9.0, 10.0],
        )
        .unwrap();

        let sets = Sets::new(&problem);
        assert_eq!(sets.L, vec![0, 1, 2]);
        assert_eq!(sets.C, vec![1, 2]);
        assert_eq!(sets.V, vec![0, 1]);

        let parameters = Parameters::new(&problem);
        assert_eq!(parameters.locations, 3);
        assert_eq!(parameters.distance[1][2], 4.0);
        assert_eq!(parameters.demand, vec![0.0, 7.0, 8.0]);
        assert_eq!(parameters.capacity, vec![9.0, 10.0]);
    }
}
