//! Domain layer: columns, splits, policies, and the layer generator
//!
//! Pure and synchronous: no I/O, no CLI, no config loading.

pub mod column;
pub mod error;
pub mod generator;
pub mod layer;
pub mod params;
pub mod split;

pub use column::{Column, SiblingPair, Side, TOLERANCE};
pub use error::{DomainError, DomainResult};
pub use generator::{GeneratorError, GeneratorResult, SimpsonTree};
pub use layer::{Layer, Segment};
pub use params::{FixedPolicy, ParameterPolicy, SplitParameters, SplitPosition};
pub use split::{split_pair, SplitChildren};
