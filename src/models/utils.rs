use std::ops::Range;

use crate::lp::{ModelBuilder, VarId, VarType};

/// Bulk creation of variables shaped after an index set: a `usize` yields a
/// `Vec<VarId>`, a pair of them a `Vec<Vec<VarId>>`, and so on. Names are
/// composed from the base name and the indices (`x_0_1`).
pub trait AddVars {
    type Out;

    /// Create a variable per index with a closure
    fn vars_with<F: FnMut(Self) -> VarId>(&self, func: F) -> Self::Out
    where
        Self: Sized;

    /// Create a variable for any type
    fn vars(
        &self,
        builder: &mut ModelBuilder,
        base_name: &str,
        vtype: VarType,
        bounds: &Range<f64>,
    ) -> Self::Out;

    /// Binary variables
    fn binary(&self, builder: &mut ModelBuilder, base_name: &str) -> Self::Out {
        self.vars(builder, base_name, VarType::Binary, &(0.0..1.0))
    }

    /// Bounded continuous variables
    fn cont(&self, builder: &mut ModelBuilder, base_name: &str, bounds: &Range<f64>) -> Self::Out {
        self.vars(builder, base_name, VarType::Continuous, bounds)
    }
}

impl AddVars for usize {
    type Out = Vec<VarId>;

    fn vars_with<F: FnMut(Self) -> VarId>(&self, mut func: F) -> Self::Out {
        let mut vec = Vec::with_capacity(*self);
        for i in 0..*self {
            vec.push(func(i));
        }

        vec
    }

    fn vars(
        &self,
        builder: &mut ModelBuilder,
        base_name: &str,
        vtype: VarType,
        bounds: &Range<f64>,
    ) -> Self::Out {
        let mut vec = Vec::with_capacity(*self);
        for i in 0..*self {
            vec.push(builder.add_var(format!("{}_{}", base_name, i), vtype, bounds.clone()));
        }

        vec
    }
}

impl AddVars for (usize, usize) {
    type Out = Vec<<usize as AddVars>::Out>;

    fn vars_with<F: FnMut(Self) -> VarId>(&self, mut func: F) -> Self::Out {
        let mut out = Vec::with_capacity(self.0);
        for i in 0..self.0 {
            out.push(self.1.vars_with(|j| func((i, j))));
        }

        out
    }

    fn vars(
        &self,
        builder: &mut ModelBuilder,
        base_name: &str,
        vtype: VarType,
        bounds: &Range<f64>,
    ) -> Self::Out {
        let mut out = Vec::with_capacity(self.0);
        for i in 0..self.0 {
            out.push(
                self.1
                    .vars(builder, &format!("{}_{}", base_name, i), vtype, bounds),
            );
        }

        out
    }
}

impl AddVars for (usize, usize, usize) {
    type Out = Vec<<(usize, usize) as AddVars>::Out>;

    fn vars_with<F: FnMut(Self) -> VarId>(&self, mut func: F) -> Self::Out {
        let mut out = Vec::with_capacity(self.0);
        for i in 0..self.0 {
            out.push((self.1, self.2).vars_with(|(j, k)| func((i, j, k))));
        }

        out
    }

    fn vars(
        &self,
        builder: &mut ModelBuilder,
        base_name: &str,
        vtype: VarType,
        bounds: &Range<f64>,
    ) -> Self::Out {
        let mut out = Vec::with_capacity(self.0);
        for i in 0..self.0 {
            out.push((self.1, self.2).vars(
                builder,
                &format!("{}_{}", base_name, i),
                vtype,
                bounds,
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::ModelBuilder;

    #[test]
    fn shapes_and_names() {
        let mut builder = ModelBuilder::new("test");

        let flat = 3usize.binary(&mut builder, "a");
        let grid = (2usize, 2usize).cont(&mut builder, "b", &(0.0..4.0));

        assert_eq!(flat.len(), 3);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].len(), 2);

        let model = builder.minimize(Default::default());
        assert_eq!(model.variables[flat[1].index()].name, "a_1");
        assert_eq!(model.variables[grid[1][0].index()].name, "b_1_0");
        assert_eq!(model.variables[grid[1][0].index()].ub, 4.0);
    }

    #[test]
    fn vars_with_passes_indices() {
        let mut builder = ModelBuilder::new("test");
        let out = (2usize, 3usize).vars_with(|(i, j)| builder.binary(format!("v_{}_{}", i, j)));

        assert_eq!(out.len(), 2);
        let model = builder.minimize(Default::default());
        assert_eq!(model.variables[out[1][2].index()].name, "v_1_2");
    }
}
