use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use log::{debug, warn};

use super::{MilpSolver, SolverError, SolverOutcome, Status};
use crate::lp::{LinExpr, Model, ObjSense, Sense, VarType};

/// The default backend: translates the model into `good_lp` on top of the
/// pure-Rust `microlp` branch-and-bound solver. Needs no external solver
/// installation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

fn expression(expr: &LinExpr, lookup: &[Variable]) -> Expression {
    expr.terms()
        .iter()
        .map(|&(var, coefficient)| coefficient * lookup[var.index()])
        .sum::<Expression>()
        + expr.constant()
}

impl MilpSolver for MicroLpSolver {
    fn solve(&self, model: &Model) -> Result<SolverOutcome, SolverError> {
        let mut vars = ProblemVariables::new();
        let lookup: Vec<Variable> = model
            .variables
            .iter()
            .map(|var| {
                let definition = match var.vtype {
                    VarType::Binary => variable().binary(),
                    VarType::Continuous => variable().min(var.lb).max(var.ub),
                };
                vars.add(definition.name(var.name.clone()))
            })
            .collect();

        let objective = expression(&model.objective, &lookup);
        let mut problem = match model.sense {
            ObjSense::Minimize => vars.minimise(objective).using(microlp),
            ObjSense::Maximize => vars.maximise(objective).using(microlp),
        };

        for constr in &model.constraints {
            let lhs = expression(&constr.expr, &lookup);
            let body = match constr.sense {
                Sense::Le => constraint::leq(lhs, constr.rhs),
                Sense::Ge => constraint::geq(lhs, constr.rhs),
                Sense::Eq => constraint::eq(lhs, constr.rhs),
            };
            problem = problem.with(body);
        }

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = lookup.iter().map(|&var| solution.value(var)).collect();
                // Evaluate the objective against our own expression so that
                // every backend reports the same number.
                let objective = model.objective.eval(&values);
                debug!(
                    "Solved '{}' to optimality with objective {}.",
                    model.name, objective
                );
                Ok(SolverOutcome::optimal(objective, values))
            }
            Err(ResolutionError::Infeasible) => Ok(SolverOutcome::terminal(Status::Infeasible)),
            Err(ResolutionError::Unbounded) => Ok(SolverOutcome::terminal(Status::Unbounded)),
            Err(err) => {
                warn!("Backend failed to solve '{}': {}", model.name, err);
                Ok(SolverOutcome::terminal(Status::NotSolved))
            }
        }
    }
}
