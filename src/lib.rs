//! Minimum-distance delivery routes for a fleet of capacity-constrained
//! vehicles serving customers from a single warehouse, where a customer's
//! demand may be split across vehicles. The crate builds the exact MILP
//! formulation, hands it to a pluggable solver backend, and decodes the
//! returned assignment into ordered per-vehicle routes and deliveries.

pub mod lp;
pub mod models;
pub mod problem;
pub mod solution;
pub mod solver;
pub mod utils;

pub use models::split_delivery::{SolveError, SplitDeliveryModel};
pub use problem::Problem;
pub use solution::Solution;
pub use solver::{MilpSolver, Status};
