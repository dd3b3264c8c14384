//! The split algorithm: divide one sibling pair into two child pairs under
//! width and area conservation, inverting the tall/short relationship.
//!
//! Given a pair `(T, C)` with `T` the taller column and parameters
//! `(a, b, c, d)`, the children's heights are
//!
//! ```text
//! h_tl = h_t + a·(1 − h_t)      h_tr = c·h_s
//! h_sl = h_t + b·(1 − h_t)      h_sr = d·h_s
//! ```
//!
//! and each parent is cut at the break fraction `z = (h − lo) / (hi − lo)`
//! so that its children's widths sum to its width and their areas to its
//! area. With `a < b` and `c < d`, the shorter parent's children sit above
//! the taller parent's children in both new pairs, which is what produces a
//! reversal at every level for the default parameters.

use tracing::instrument;

use crate::domain::column::{Column, SiblingPair, Side};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::params::SplitParameters;

/// The two child pairs of one split, ordered left then right, plus which
/// original role played the tall column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitChildren {
    pub left: SiblingPair,
    pub right: SiblingPair,
    pub taller: Side,
}

/// Split one sibling pair into the two pairs of the next layer.
///
/// Pure and deterministic. When the control column is the taller one, the
/// roles are swapped internally and swapped back in the result, so callers
/// always see (treatment, control) orientation. Equal heights tie-break to
/// treatment as taller.
///
/// Fails with [`DomainError::InfeasibleSplit`] when a break fraction falls
/// outside the open interval (0, 1); the result is never clamped, since a
/// clamped width would break the conservation laws.
#[instrument(level = "trace")]
pub fn split_pair(pair: SiblingPair, params: SplitParameters) -> DomainResult<SplitChildren> {
    if pair.treatment().height() >= pair.control().height() {
        let [tl, tr, sl, sr] = split_oriented(pair.treatment(), pair.control(), params)?;
        Ok(SplitChildren {
            left: SiblingPair::new(tl, sl),
            right: SiblingPair::new(tr, sr),
            taller: Side::Treatment,
        })
    } else {
        let [tl, tr, sl, sr] = split_oriented(pair.control(), pair.treatment(), params)?;
        Ok(SplitChildren {
            left: SiblingPair::new(sl, tl),
            right: SiblingPair::new(sr, tr),
            taller: Side::Control,
        })
    }
}

/// The core computation, assuming `tall.height >= short.height`.
///
/// Returns `[tall_left, tall_right, short_left, short_right]`, the children
/// of each parent in left-to-right order.
fn split_oriented(
    tall: Column,
    short: Column,
    params: SplitParameters,
) -> DomainResult<[Column; 4]> {
    let h_t = tall.height();
    let h_s = short.height();

    // Children of the tall column are lifted above h_t on the left and
    // squashed below h_s on the right; the short column's children straddle
    // the same two bands slightly higher.
    let h_tl = h_t + params.a() * (1.0 - h_t);
    let h_sl = h_t + params.b() * (1.0 - h_t);
    let h_tr = params.c() * h_s;
    let h_sr = params.d() * h_s;

    let z_t = break_fraction(h_t, h_tl, h_tr, "tall")?;
    let z_s = break_fraction(h_s, h_sl, h_sr, "short")?;

    Ok([
        Column::new(h_tl, z_t * tall.width())?,
        Column::new(h_tr, (1.0 - z_t) * tall.width())?,
        Column::new(h_sl, z_s * short.width())?,
        Column::new(h_sr, (1.0 - z_s) * short.width())?,
    ])
}

/// How far along its width to cut a parent of height `h` whose children will
/// have heights `hi` and `lo`.
///
/// `z·hi + (1 − z)·lo = h` conserves area exactly when `z = (h − lo)/(hi − lo)`;
/// the split is feasible only for `z` strictly inside (0, 1), which keeps
/// both child widths positive.
fn break_fraction(h: f64, hi: f64, lo: f64, side: &'static str) -> DomainResult<f64> {
    let denom = hi - lo;
    if denom == 0.0 {
        return Err(DomainError::InfeasibleSplit {
            side,
            z: f64::NAN,
        });
    }
    let z = (h - lo) / denom;
    if !z.is_finite() || z <= 0.0 || z >= 1.0 {
        return Err(DomainError::InfeasibleSplit { side, z });
    }
    Ok(z)
}
