use itertools::iproduct;
use log::{debug, info};

use super::{Parameters, Sets, SolveError};
use crate::lp::{LinExpr, LpSum, Model, ModelBuilder, VarId};
use crate::models::utils::AddVars;
use crate::problem::{LocationIndex, Problem, VehicleIndex, WAREHOUSE};
use crate::solution::Solution;
use crate::solver::MilpSolver;

/// The exact formulation of the split-delivery capacitated VRP: a fleet of
/// capacity-constrained vehicles serves every customer from a single
/// warehouse at minimum total distance, where a customer's demand may be
/// split across several vehicles.
pub struct SplitDeliveryModel {}

impl SplitDeliveryModel {
    /// Construct the model for the given sets and parameters. This is a pure
    /// function of its inputs and cannot fail: every combination of variables
    /// and constraints is constructible, and feasibility is the solver's
    /// verdict to make.
    pub fn build(sets: &Sets, parameters: &Parameters) -> (Model, Variables) {
        info!(
            "Building split-delivery model: {} vehicles, {} customers.",
            sets.V.len(),
            sets.C.len()
        );

        let mut builder = ModelBuilder::new("split_delivery");

        let vehicles = sets.V.len();
        let customers = sets.C.len();
        let locations = sets.L.len();

        //*****************CREATE VARIABLES*****************//

        // 1 if the vehicle traverses the arc from i to j, 0 otherwise. There
        // is no variable on the diagonal.
        let mut x: Vec<Vec<Vec<Option<VarId>>>> = Vec::with_capacity(vehicles);
        for v in &sets.V {
            let mut arcs = Vec::with_capacity(locations);
            for i in &sets.L {
                let mut row = Vec::with_capacity(locations);
                for j in &sets.L {
                    row.push((i != j).then(|| builder.binary(format!("x_{}_{}_{}", v, i, j))));
                }
                arcs.push(row);
            }
            x.push(arcs);
        }

        // 1 if the vehicle visits the customer, 0 otherwise
        let y: Vec<Vec<VarId>> = (vehicles, customers).binary(&mut builder, "y");

        // The quantity the vehicle delivers to the customer
        let d: Vec<Vec<VarId>> = (vehicles, customers).vars_with(|(v, c)| {
            builder.cont(format!("d_{}_{}", v, c + 1), 0.0..parameters.demand[c + 1])
        });

        // Ordering value of the customer within the vehicle's route, used
        // only by the subtour elimination constraints
        let position_bound = (parameters.locations - 1) as f64;
        let u: Vec<Vec<VarId>> = (vehicles, customers)
            .vars_with(|(v, c)| builder.cont(format!("u_{}_{}", v, c + 1), 0.0..position_bound));

        let vars = Variables { x, y, d, u };

        //*****************ADD CONSTRAINTS*****************//

        // each vehicle performs at most one loop: at most one arc leaving the
        // warehouse, and at most one entering it
        for v in &sets.V {
            let depart = sets
                .C
                .iter()
                .map(|j| vars.arc(*v, WAREHOUSE, *j))
                .lp_sum();
            builder.add_constr(format!("depart_{}", v), depart.leq(1.0));

            let r#return = sets
                .C
                .iter()
                .map(|i| vars.arc(*v, *i, WAREHOUSE))
                .lp_sum();
            builder.add_constr(format!("return_{}", v), r#return.leq(1.0));
        }

        // flow conservation: a visited customer has exactly one predecessor
        // and one successor in the vehicle's route
        for (v, k) in iproduct!(&sets.V, &sets.C) {
            let inbound = sets
                .L
                .iter()
                .filter(|i| *i != k)
                .map(|i| vars.arc(*v, *i, *k))
                .lp_sum();
            let outbound = sets
                .L
                .iter()
                .filter(|j| *j != k)
                .map(|j| vars.arc(*v, *k, *j))
                .lp_sum();

            builder.add_constr(format!("flow_{}_{}", v, k), (inbound - outbound).eq(0.0));
        }

        // the visit indicator tracks the inbound arcs of the customer, and
        // nothing may be delivered to a customer the vehicle does not visit
        for (v, j) in iproduct!(&sets.V, &sets.C) {
            let inbound = sets
                .L
                .iter()
                .filter(|i| *i != j)
                .map(|i| vars.arc(*v, *i, *j))
                .lp_sum();
            let visit = LinExpr::from(vars.visit(*v, *j));
            builder.add_constr(format!("visit_{}_{}", v, j), (inbound - visit).eq(0.0));

            let delivery = LinExpr::from(vars.delivery(*v, *j));
            let allowed = LinExpr::term(parameters.demand[*j], vars.visit(*v, *j));
            builder.add_constr(
                format!("delivery_link_{}_{}", v, j),
                (delivery - allowed).leq(0.0),
            );
        }

        // every customer's demand is met exactly, split across vehicles as
        // needed
        for j in &sets.C {
            let delivered = sets.V.iter().map(|v| vars.delivery(*v, *j)).lp_sum();
            builder.add_constr(format!("demand_{}", j), delivered.eq(parameters.demand[*j]));
        }

        // vehicle capacities bound the total delivered quantity per route
        for v in &sets.V {
            let load = sets.C.iter().map(|j| vars.delivery(*v, *j)).lp_sum();
            builder.add_constr(format!("capacity_{}", v), load.leq(parameters.capacity[*v]));
        }

        // Miller-Tucker-Zemlin subtour elimination: a cycle among customers
        // that avoids the warehouse admits no consistent ordering values, so
        // no such cycle can be part of a feasible assignment
        let big_m = parameters.locations as f64;
        for (v, i, j) in iproduct!(&sets.V, &sets.C, &sets.C) {
            if i == j {
                continue;
            }

            let lhs = LinExpr::from(vars.position(*v, *i)) - LinExpr::from(vars.position(*v, *j))
                + LinExpr::term(big_m, vars.arc(*v, *i, *j));

            builder.add_constr(format!("mtz_{}_{}_{}", v, i, j), lhs.leq(big_m - 1.0));
        }

        // minimize the total distance travelled across all vehicles
        let total_distance = iproduct!(&sets.V, &sets.L, &sets.L)
            .filter(|(_, i, j)| i != j)
            .map(|(v, i, j)| (parameters.distance[*i][*j], vars.arc(*v, *i, *j)))
            .lp_sum();

        let model = builder.minimize(total_distance);
        debug!(
            "Model has {} variables and {} constraints.",
            model.variables.len(),
            model.constraints.len()
        );

        (model, vars)
    }

    /// Build the model for `problem`, hand it to `solver`, and decode the
    /// returned assignment into per-vehicle routes and deliveries. A
    /// non-optimal verdict is not an error: it comes back as the solution's
    /// status, with no routes or deliveries.
    pub fn solve(problem: &Problem, solver: &impl MilpSolver) -> Result<Solution, SolveError> {
        let sets = Sets::new(problem);
        let parameters = Parameters::new(problem);
        let (model, variables) = SplitDeliveryModel::build(&sets, &parameters);

        let outcome = solver.solve(&model)?;
        info!("Solver verdict for '{}': {:?}", model.name, outcome.status);

        Ok(Solution::from_outcome(problem, &variables, &outcome)?)
    }
}

/// The decision variables of the formulation, in per-(vehicle, location)
/// containers. Customer-indexed variables are stored with the warehouse
/// offset stripped; the accessors take plain location indices.
pub struct Variables {
    x: Vec<Vec<Vec<Option<VarId>>>>,
    y: Vec<Vec<VarId>>,
    d: Vec<Vec<VarId>>,
    u: Vec<Vec<VarId>>,
}

impl Variables {
    /// The arc-use indicator of vehicle `v` for the arc from `i` to `j`,
    /// which must be distinct locations.
    pub fn arc(&self, v: VehicleIndex, i: LocationIndex, j: LocationIndex) -> VarId {
        self.x[v][i][j].expect("arc variables only exist between distinct locations")
    }

    /// The visit indicator of vehicle `v` for customer `j`.
    pub fn visit(&self, v: VehicleIndex, j: LocationIndex) -> VarId {
        self.y[v][j - 1]
    }

    /// The delivered quantity of vehicle `v` for customer `j`.
    pub fn delivery(&self, v: VehicleIndex, j: LocationIndex) -> VarId {
        self.d[v][j - 1]
    }

    /// The route-ordering value of vehicle `v` for customer `j`.
    pub fn position(&self, v: VehicleIndex, j: LocationIndex) -> VarId {
        self.u[v][j - 1]
    }
}
