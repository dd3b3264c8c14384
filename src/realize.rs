//! Turn a layer's continuous proportions into integer count tables
//!
//! Sits outside the core: it only reads heights and widths. Group sizes are
//! allocated by largest remainder so they sum exactly to the requested
//! sample size; rounding each proportion independently can drift from the
//! target total. Recovered counts are rounded within each group, so a
//! group's recovered never exceeds its size.

use itertools::Itertools;
use thiserror::Error;

use crate::domain::Layer;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RealizeError {
    #[error("sample size must be positive")]
    ZeroSample,
}

/// One row of a count table: the four integers for a pair, labeled by the
/// pair's binary path from the root (empty at depth 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub label: String,
    pub treatment_recovered: u64,
    pub treatment_total: u64,
    pub control_recovered: u64,
    pub control_total: u64,
}

impl CountRow {
    pub fn treatment_not_recovered(&self) -> u64 {
        self.treatment_total - self.treatment_recovered
    }

    pub fn control_not_recovered(&self) -> u64 {
        self.control_total - self.control_recovered
    }
}

/// Realize `layer` (at depth `depth`) as count data for `n` people in total.
pub fn count_table(layer: &Layer, depth: usize, n: u64) -> Result<Vec<CountRow>, RealizeError> {
    if n == 0 {
        return Err(RealizeError::ZeroSample);
    }

    // Flatten to treatment widths then control widths, mirroring the layer's
    // chart order, and allocate group sizes across all of them at once.
    let widths: Vec<f64> = layer
        .pairs()
        .iter()
        .map(|p| p.treatment().width())
        .chain(layer.pairs().iter().map(|p| p.control().width()))
        .collect();
    let totals = largest_remainder(&widths, n);

    let half = layer.len();
    let rows = layer
        .pairs()
        .iter()
        .enumerate()
        .map(|(i, pair)| CountRow {
            label: path_label(depth, i),
            treatment_total: totals[i],
            treatment_recovered: recovered(pair.treatment().height(), totals[i]),
            control_total: totals[half + i],
            control_recovered: recovered(pair.control().height(), totals[half + i]),
        })
        .collect();
    Ok(rows)
}

/// Allocate `n` units proportionally to `weights`, handing the leftover
/// units to the largest fractional remainders so the result sums exactly
/// to `n`.
fn largest_remainder(weights: &[f64], n: u64) -> Vec<u64> {
    let total: f64 = weights.iter().sum();
    let ideal: Vec<f64> = weights.iter().map(|w| w / total * n as f64).collect();
    let mut counts: Vec<u64> = ideal.iter().map(|x| x.floor() as u64).collect();
    let assigned: u64 = counts.iter().sum();

    let by_remainder = (0..weights.len())
        .sorted_by(|&i, &j| (ideal[j] - ideal[j].floor()).total_cmp(&(ideal[i] - ideal[i].floor())));
    for i in by_remainder.take((n - assigned) as usize) {
        counts[i] += 1;
    }
    counts
}

fn recovered(height: f64, total: u64) -> u64 {
    ((height * total as f64).round() as u64).min(total)
}

/// Binary path label for pair `index` at `depth`, e.g. `"01"` at depth 2.
fn path_label(depth: usize, index: usize) -> String {
    if depth == 0 {
        String::new()
    } else {
        format!("{index:0width$b}", width = depth)
    }
}
