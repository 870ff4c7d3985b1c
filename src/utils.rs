/// Tolerance below which a solved continuous quantity is treated as zero.
pub const EPSILON: f64 = 1e-5;
