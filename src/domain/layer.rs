//! A horizontal slice of the tree: the ordered sibling pairs at one depth

use itertools::Itertools;

use crate::domain::column::{Column, SiblingPair, Side};

/// The ordered sibling pairs at one tree depth. Layer `k` holds `2^k` pairs;
/// pair `i` parents pairs `2i` and `2i+1` of the next layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pairs: Vec<SiblingPair>,
}

impl Layer {
    pub(crate) fn new(pairs: Vec<SiblingPair>) -> Self {
        Self { pairs }
    }

    /// Layer 0: the single caller-supplied pair standing for all patients.
    pub fn root(pair: SiblingPair) -> Self {
        Self { pairs: vec![pair] }
    }

    pub fn pairs(&self) -> &[SiblingPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Read-only view for external consumers:
    /// `(treatment_height, treatment_width, control_height, control_width)`
    /// per pair, in layer order.
    pub fn as_tuples(&self) -> Vec<(f64, f64, f64, f64)> {
        self.pairs.iter().map(SiblingPair::as_tuple).collect()
    }

    /// Total width of one side across the whole layer. Conserved end-to-end:
    /// equals the side's width at layer 0.
    pub fn side_width(&self, side: Side) -> f64 {
        self.pairs.iter().map(|p| p.column(side).width()).sum()
    }

    /// Merge adjacent pairs two-at-a-time, reconstructing the parent layer.
    ///
    /// Returns `None` for a root layer (or any layer with an odd pair count,
    /// which cannot have come from this generator).
    pub fn merged(&self) -> Option<Layer> {
        if self.pairs.len() < 2 || self.pairs.len() % 2 != 0 {
            return None;
        }
        let pairs = self
            .pairs
            .chunks_exact(2)
            .map(|two| {
                SiblingPair::new(
                    Column::merge(two[0].treatment(), two[1].treatment()),
                    Column::merge(two[0].control(), two[1].control()),
                )
            })
            .collect();
        Some(Layer::new(pairs))
    }

    pub fn approx_eq(&self, other: &Layer) -> bool {
        self.pairs.len() == other.pairs.len()
            && self
                .pairs
                .iter()
                .zip(&other.pairs)
                .all(|(a, b)| a.approx_eq(b))
    }

    /// Positioned bars for an external chart renderer: treatment columns
    /// first along the x axis, then the control columns, hatched. Offsets
    /// accumulate over widths, so a layer whose widths sum to 1.0 spans the
    /// unit interval.
    pub fn segments(&self) -> Vec<Segment> {
        let bars: Vec<(f64, f64, bool)> = self
            .pairs
            .iter()
            .map(|p| (p.treatment().height(), p.treatment().width(), false))
            .chain(
                self.pairs
                    .iter()
                    .map(|p| (p.control().height(), p.control().width(), true)),
            )
            .collect();

        let edges = std::iter::once(0.0).chain(bars.iter().scan(0.0, |x, (_, w, _)| {
            *x += w;
            Some(*x)
        }));

        edges
            .tuple_windows()
            .zip(&bars)
            .map(|((x0, x1), &(height, _, hatched))| Segment {
                x0,
                x1,
                height,
                hatched,
            })
            .collect()
    }
}

/// One positioned bar of a layer chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x0: f64,
    pub x1: f64,
    pub height: f64,
    /// Control-side bars are hatched to distinguish the two groups.
    pub hatched: bool,
}
