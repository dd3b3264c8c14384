//! Generate indefinitely many Simpson reversals.
//!
//! A Simpson reversal is when the association between treatment and outcome
//! changes sign under conditioning: the treatment group recovers at a lower
//! rate overall, yet at a higher rate in each of two sub-populations, and so
//! on to any depth. This crate builds such hierarchies as layers of weighted
//! (height, width) columns, where each split of a sibling pair conserves
//! width and area exactly while inverting the tall/short ordering.
//!
//! Main components:
//! - [`domain`] — columns, the split algorithm, parameter policies, and the
//!   memoized layer generator.
//! - [`realize`] — integer count tables for a layer (largest-remainder
//!   allocation).
//! - [`scenario`] — TOML scenario configuration.
//! - [`cli`] — argument parsing and command dispatch for the `simpson`
//!   binary.
//!
//! # Example
//!
//! ```ignore
//! use simpson_tree::{Column, FixedPolicy, SiblingPair, SimpsonTree};
//!
//! let root = SiblingPair::new(Column::new(0.6, 0.5)?, Column::new(0.4, 0.5)?);
//! let mut tree = SimpsonTree::new(root, FixedPolicy::default());
//! let layer = tree.layer(3)?;
//! assert_eq!(layer.len(), 8);
//! ```

pub mod cli;
pub mod domain;
pub mod exitcode;
pub mod realize;
pub mod scenario;
pub mod util;

// Re-export commonly used items
pub use domain::{
    split_pair, Column, DomainError, FixedPolicy, GeneratorError, Layer, ParameterPolicy, Segment,
    SiblingPair, Side, SimpsonTree, SplitChildren, SplitParameters, SplitPosition, TOLERANCE,
};
pub use realize::{count_table, CountRow, RealizeError};
pub use scenario::{Scenario, ScenarioError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
