//! Lazy, memoized generation of successive layers
//!
//! The tree is conceptually infinite; the generator realizes a finite prefix
//! as an indexable cache of layers, populated monotonically as deeper layers
//! are requested and never invalidated. Computation for layer `k` is
//! proportional to `2^k`, so callers bound `k` themselves.

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::column::SiblingPair;
use crate::domain::error::DomainError;
use crate::domain::layer::Layer;
use crate::domain::params::{ParameterPolicy, SplitPosition};
use crate::domain::split::split_pair;

/// Pair count above which a layer's splits run in parallel. Splits are pure
/// and mutually independent, so this is an optimization only.
const PARALLEL_THRESHOLD: usize = 64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// A split failed for one specific pair; `layer` and `index` identify
    /// the branch that is infeasible under the current policy.
    #[error("split failed at layer {layer}, pair {index}: {source}")]
    Split {
        layer: usize,
        index: usize,
        #[source]
        source: DomainError,
    },
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Generates layers on demand from a root pair and a parameter policy.
///
/// Single-threaded and synchronous; `layer()` takes `&mut self`, so the
/// borrow checker already guarantees at-most-one build per depth and no
/// reader ever observes a partially computed layer.
#[derive(Debug)]
pub struct SimpsonTree<P> {
    policy: P,
    layers: Vec<Layer>,
}

impl<P: ParameterPolicy + Sync> SimpsonTree<P> {
    pub fn new(root: SiblingPair, policy: P) -> Self {
        Self {
            policy,
            layers: vec![Layer::root(root)],
        }
    }

    /// The layer at depth `k`, computing and caching layers `0..=k` as
    /// needed. Cached layers are reused; nothing beyond `k` is materialized.
    #[instrument(level = "debug", skip(self))]
    pub fn layer(&mut self, k: usize) -> GeneratorResult<&Layer> {
        while self.layers.len() <= k {
            let next = self.next_layer()?;
            self.layers.push(next);
        }
        Ok(&self.layers[k])
    }

    /// All layers `0..=k`, the full realized prefix of the tree.
    pub fn layers_to(&mut self, k: usize) -> GeneratorResult<&[Layer]> {
        self.layer(k)?;
        Ok(&self.layers[..=k])
    }

    /// Deepest layer computed so far.
    pub fn computed_depth(&self) -> usize {
        self.layers.len() - 1
    }

    fn next_layer(&self) -> GeneratorResult<Layer> {
        let depth = self.layers.len() - 1;
        let pairs = self.layers[depth].pairs();
        debug!(depth, pairs = pairs.len(), "computing next layer");

        let split_at = |(index, pair): (usize, &SiblingPair)| {
            let position = SplitPosition { depth, index };
            self.policy
                .parameters(position)
                .and_then(|params| split_pair(*pair, params))
                .map(|children| [children.left, children.right])
                .map_err(|source| GeneratorError::Split {
                    layer: depth,
                    index,
                    source,
                })
        };

        let children: Vec<[SiblingPair; 2]> = if pairs.len() >= PARALLEL_THRESHOLD {
            pairs
                .par_iter()
                .enumerate()
                .map(split_at)
                .collect::<GeneratorResult<_>>()?
        } else {
            pairs
                .iter()
                .enumerate()
                .map(split_at)
                .collect::<GeneratorResult<_>>()?
        };

        Ok(Layer::new(children.into_iter().flatten().collect()))
    }
}
