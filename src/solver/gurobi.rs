use grb::prelude::*;
use log::debug;

use super::{MilpSolver, SolverError, SolverOutcome, Status as Verdict};
use crate::lp::{Model as LpModel, ObjSense, Sense, VarType};

/// A Gurobi-backed solver. Requires a Gurobi installation and license, which
/// is why it sits behind the `gurobi` cargo feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct GurobiSolver;

impl From<grb::Error> for SolverError {
    fn from(err: grb::Error) -> SolverError {
        SolverError(err.to_string())
    }
}

impl MilpSolver for GurobiSolver {
    fn solve(&self, model: &LpModel) -> Result<SolverOutcome, SolverError> {
        let mut grb_model = Model::new(&model.name)?;
        grb_model.set_param(param::OutputFlag, 0)?;

        let vars = model
            .variables
            .iter()
            .map(|var| {
                let vtype = match var.vtype {
                    VarType::Binary => grb::VarType::Binary,
                    VarType::Continuous => grb::VarType::Continuous,
                };
                grb_model.add_var(&var.name, vtype, 0.0, var.lb, var.ub, std::iter::empty())
            })
            .collect::<grb::Result<Vec<Var>>>()?;
        grb_model.update()?;

        for constr in &model.constraints {
            let lhs = constr
                .expr
                .terms()
                .iter()
                .map(|&(id, coefficient)| coefficient * vars[id.index()])
                .grb_sum()
                + constr.expr.constant();
            let sense = match constr.sense {
                Sense::Le => ConstrSense::Less,
                Sense::Ge => ConstrSense::Greater,
                Sense::Eq => ConstrSense::Equal,
            };

            grb_model.add_constr(
                &constr.name,
                grb::constr::IneqExpr {
                    lhs,
                    sense,
                    rhs: constr.rhs.into(),
                },
            )?;
        }

        let objective = model
            .objective
            .terms()
            .iter()
            .map(|&(id, coefficient)| coefficient * vars[id.index()])
            .grb_sum()
            + model.objective.constant();
        let sense = match model.sense {
            ObjSense::Minimize => Minimize,
            ObjSense::Maximize => Maximize,
        };
        grb_model.set_objective(objective, sense)?;

        grb_model.optimize()?;

        let status = grb_model.status()?;
        debug!("Gurobi finished '{}' with status {:?}.", model.name, status);

        match status {
            Status::Optimal => {
                let values = vars
                    .iter()
                    .map(|var| grb_model.get_obj_attr(attr::X, var))
                    .collect::<grb::Result<Vec<f64>>>()?;
                let objective = model.objective.eval(&values);
                Ok(SolverOutcome::optimal(objective, values))
            }
            Status::Infeasible => Ok(SolverOutcome::terminal(Verdict::Infeasible)),
            Status::Unbounded | Status::InfOrUnbd => Ok(SolverOutcome::terminal(Verdict::Unbounded)),
            _ => Ok(SolverOutcome::terminal(Verdict::NotSolved)),
        }
    }
}
