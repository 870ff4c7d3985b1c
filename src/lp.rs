//! An explicit, immutable mixed-integer linear program: a list of variables,
//! a list of linear constraints and a single objective. Built once by a model
//! builder and then handed by value to whatever solver backend is in use.

use std::ops::{Add, Range, Sub};

/// An opaque handle to a variable declared in a [`ModelBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    /// The position of this variable in the model's variable table, which is
    /// also its position in a solver's assignment vector.
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Binary,
    Continuous,
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub vtype: VarType,
    pub lb: f64,
    pub ub: f64,
}

/// A linear expression over declared variables, plus a constant offset.
#[derive(Debug, Clone, Default)]
pub struct LinExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinExpr {
    pub fn new() -> LinExpr {
        LinExpr::default()
    }

    /// A single-term expression `coefficient * var`.
    pub fn term(coefficient: f64, var: VarId) -> LinExpr {
        LinExpr {
            terms: vec![(var, coefficient)],
            constant: 0.0,
        }
    }

    pub fn add_term(&mut self, coefficient: f64, var: VarId) {
        self.terms.push((var, coefficient));
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Evaluate the expression against an assignment indexed by `VarId`.
    pub fn eval(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coefficient)| coefficient * values[var.index()])
            .sum::<f64>()
            + self.constant
    }

    pub fn leq(self, rhs: f64) -> Constr {
        Constr {
            expr: self,
            sense: Sense::Le,
            rhs,
        }
    }

    pub fn geq(self, rhs: f64) -> Constr {
        Constr {
            expr: self,
            sense: Sense::Ge,
            rhs,
        }
    }

    pub fn eq(self, rhs: f64) -> Constr {
        Constr {
            expr: self,
            sense: Sense::Eq,
            rhs,
        }
    }
}

impl From<VarId> for LinExpr {
    fn from(var: VarId) -> LinExpr {
        LinExpr::term(1.0, var)
    }
}

impl From<(f64, VarId)> for LinExpr {
    fn from((coefficient, var): (f64, VarId)) -> LinExpr {
        LinExpr::term(coefficient, var)
    }
}

impl Add for LinExpr {
    type Output = LinExpr;

    fn add(mut self, rhs: LinExpr) -> LinExpr {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl Sub for LinExpr {
    type Output = LinExpr;

    fn sub(mut self, rhs: LinExpr) -> LinExpr {
        self.terms
            .extend(rhs.terms.into_iter().map(|(var, c)| (var, -c)));
        self.constant -= rhs.constant;
        self
    }
}

/// Summation of anything convertible to a `LinExpr` over an iterator.
pub trait LpSum {
    fn lp_sum(self) -> LinExpr;
}

impl<T, I> LpSum for I
where
    T: Into<LinExpr>,
    I: IntoIterator<Item = T>,
{
    fn lp_sum(self) -> LinExpr {
        self.into_iter()
            .fold(LinExpr::new(), |sum, expr| sum + expr.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Le,
    Ge,
    Eq,
}

/// An unnamed constraint body, as produced by [`LinExpr::leq`] and friends.
#[derive(Debug, Clone)]
pub struct Constr {
    pub expr: LinExpr,
    pub sense: Sense,
    pub rhs: f64,
}

#[derive(Debug, Clone)]
pub struct Constraint {
    pub name: String,
    pub expr: LinExpr,
    pub sense: Sense,
    pub rhs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjSense {
    Minimize,
    Maximize,
}

/// A complete model. Constructing one is infallible: any combination of
/// declared variables and linear constraints is a valid model, regardless of
/// whether it turns out feasible.
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    pub objective: LinExpr,
    pub sense: ObjSense,
}

/// Accumulates variables and constraints, and is consumed into an immutable
/// [`Model`] by [`ModelBuilder::minimize`] or [`ModelBuilder::maximize`].
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn add_var(
        &mut self,
        name: impl Into<String>,
        vtype: VarType,
        bounds: Range<f64>,
    ) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable {
            name: name.into(),
            vtype,
            lb: bounds.start,
            ub: bounds.end,
        });
        id
    }

    /// A binary variable.
    pub fn binary(&mut self, name: impl Into<String>) -> VarId {
        self.add_var(name, VarType::Binary, 0.0..1.0)
    }

    /// A bounded continuous variable.
    pub fn cont(&mut self, name: impl Into<String>, bounds: Range<f64>) -> VarId {
        self.add_var(name, VarType::Continuous, bounds)
    }

    pub fn add_constr(&mut self, name: impl Into<String>, constr: Constr) {
        self.constraints.push(Constraint {
            name: name.into(),
            expr: constr.expr,
            sense: constr.sense,
            rhs: constr.rhs,
        });
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    pub fn minimize(self, objective: LinExpr) -> Model {
        self.finish(objective, ObjSense::Minimize)
    }

    pub fn maximize(self, objective: LinExpr) -> Model {
        self.finish(objective, ObjSense::Maximize)
    }

    fn finish(self, objective: LinExpr, sense: ObjSense) -> Model {
        Model {
            name: self.name,
            variables: self.variables,
            constraints: self.constraints,
            objective,
            sense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expressions_evaluate() {
        let mut builder = ModelBuilder::new("test");
        let a = builder.binary("a");
        let b = builder.cont("b", 0.0..10.0);

        let expr = LinExpr::term(2.0, a) + LinExpr::term(3.0, b);
        assert_eq!(expr.eval(&[1.0, 4.0]), 14.0);

        let diff = LinExpr::term(1.0, a) - LinExpr::term(1.0, b);
        assert_eq!(diff.eval(&[1.0, 4.0]), -3.0);
    }

    #[test]
    fn lp_sum_collects_terms() {
        let mut builder = ModelBuilder::new("test");
        let vars: Vec<VarId> = (0..3).map(|i| builder.binary(format!("x_{i}"))).collect();

        let sum = vars.iter().copied().lp_sum();
        assert_eq!(sum.terms().len(), 3);
        assert_eq!(sum.eval(&[1.0, 0.0, 1.0]), 2.0);

        let weighted = vars.iter().map(|&v| (2.0, v)).lp_sum();
        assert_eq!(weighted.eval(&[1.0, 1.0, 0.0]), 4.0);
    }

    #[test]
    fn builder_records_variables_and_constraints() {
        let mut builder = ModelBuilder::new("test");
        let x = builder.binary("x");
        let d = builder.cont("d", 0.0..5.0);
        builder.add_constr("link", (LinExpr::from(d) - LinExpr::term(5.0, x)).leq(0.0));

        let model = builder.minimize(LinExpr::term(10.0, x));

        assert_eq!(model.variables.len(), 2);
        assert_eq!(model.variables[x.index()].vtype, VarType::Binary);
        assert_eq!(model.variables[x.index()].ub, 1.0);
        assert_eq!(model.variables[d.index()].ub, 5.0);
        assert_eq!(model.constraints.len(), 1);
        assert_eq!(model.constraints[0].name, "link");
        assert_eq!(model.constraints[0].sense, Sense::Le);
        assert_eq!(model.sense, ObjSense::Minimize);
    }
}
