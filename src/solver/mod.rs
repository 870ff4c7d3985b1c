//! The boundary towards the general-purpose MILP engine. The crate builds a
//! model and consumes a verdict plus an assignment; everything in between is
//! a pluggable backend.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::lp::Model;

#[cfg(feature = "gurobi")]
pub mod gurobi;
pub mod microlp;

pub use microlp::MicroLpSolver;

/// The terminal verdict of a solve. Anything but `Optimal` carries no
/// assignment, and is a property of the input data rather than a transient
/// condition: there is nothing to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
    NotSolved,
}

/// What a backend hands back: a status and, when optimal, a value for every
/// declared variable (indexed by `VarId`) plus the objective value.
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    pub status: Status,
    pub objective: Option<f64>,
    pub values: Vec<f64>,
}

impl SolverOutcome {
    pub fn optimal(objective: f64, values: Vec<f64>) -> SolverOutcome {
        SolverOutcome {
            status: Status::Optimal,
            objective: Some(objective),
            values,
        }
    }

    /// A verdict without an assignment.
    pub fn terminal(status: Status) -> SolverOutcome {
        SolverOutcome {
            status,
            objective: None,
            values: Vec::new(),
        }
    }
}

/// A backend failure that is not a verdict about the model, e.g. a missing
/// license or an environment problem.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display(fmt = "solver failure: {}", _0)]
pub struct SolverError(pub String);

impl std::error::Error for SolverError {}

/// A conformant mixed-integer solving engine: consumes a model, returns a
/// verdict, and when optimal an assignment with every binary variable within
/// a small tolerance of {0, 1}.
pub trait MilpSolver {
    fn solve(&self, model: &Model) -> Result<SolverOutcome, SolverError>;
}
