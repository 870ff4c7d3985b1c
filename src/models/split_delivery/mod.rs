pub mod model;
pub mod sets_and_parameters;

use derive_more::{Display, Error, From};

pub use model::{SplitDeliveryModel, Variables};
pub use sets_and_parameters::{Parameters, Sets};

use crate::solution::DecodeError;
use crate::solver::SolverError;

/// Everything that can go wrong between handing a model to the solver and
/// decoding the returned assignment. The model builder itself cannot fail.
#[derive(Debug, Display, Error, From)]
pub enum SolveError {
    Solver(SolverError),
    Decode(DecodeError),
}
