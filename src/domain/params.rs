//! Split parameters and the policy supplying them per split

use crate::domain::error::{DomainError, DomainResult};

/// The four free parameters `(a, b, c, d)` of a single split.
///
/// Each lies in the open interval (0, 1), with `a < b` and `c < d`. They are
/// transient inputs to one split and are never stored on a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitParameters {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl SplitParameters {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> DomainResult<Self> {
        for (name, value) in [("a", a), ("b", b), ("c", c), ("d", d)] {
            if !value.is_finite() || value <= 0.0 || value >= 1.0 {
                return Err(DomainError::InvalidParameters {
                    reason: format!("{name} = {value} outside (0, 1)"),
                });
            }
        }
        if a >= b {
            return Err(DomainError::InvalidParameters {
                reason: format!("require a < b, got a = {a}, b = {b}"),
            });
        }
        if c >= d {
            return Err(DomainError::InvalidParameters {
                reason: format!("require c < d, got c = {c}, d = {d}"),
            });
        }
        Ok(Self { a, b, c, d })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn d(&self) -> f64 {
        self.d
    }
}

impl Default for SplitParameters {
    /// 9/20 and 11/20, chosen for easily interpreted charts.
    fn default() -> Self {
        Self {
            a: 0.45,
            b: 0.55,
            c: 0.45,
            d: 0.55,
        }
    }
}

/// Position of a split in the tree: the layer being split and the pair's
/// index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPosition {
    pub depth: usize,
    pub index: usize,
}

/// Supplies `(a, b, c, d)` for each split.
///
/// The default [`FixedPolicy`] returns the same constants everywhere;
/// closures over [`SplitPosition`] implement the trait for callers wanting
/// depth- or path-dependent parameters.
pub trait ParameterPolicy {
    fn parameters(&self, position: SplitPosition) -> DomainResult<SplitParameters>;
}

/// The same validated parameters at every tree position.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPolicy {
    parameters: SplitParameters,
}

impl FixedPolicy {
    pub fn new(parameters: SplitParameters) -> Self {
        Self { parameters }
    }
}

impl ParameterPolicy for FixedPolicy {
    fn parameters(&self, _position: SplitPosition) -> DomainResult<SplitParameters> {
        Ok(self.parameters)
    }
}

impl<F> ParameterPolicy for F
where
    F: Fn(SplitPosition) -> DomainResult<SplitParameters>,
{
    fn parameters(&self, position: SplitPosition) -> DomainResult<SplitParameters> {
        self(position)
    }
}
