//! Core value types: columns and sibling pairs

use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// Relative tolerance within which the conservation laws must hold.
pub const TOLERANCE: f64 = 1e-9;

/// A sub-population's recovery rate (`height`) and its share of the total
/// population (`width`), both in the half-open interval (0, 1].
///
/// Immutable once created: fields are private and every constructor
/// validates the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    height: f64,
    width: f64,
}

impl Column {
    pub fn new(height: f64, width: f64) -> DomainResult<Self> {
        if !height.is_finite() || height <= 0.0 || height > 1.0 {
            return Err(DomainError::ColumnOutOfRange {
                field: "height",
                value: height,
            });
        }
        if !width.is_finite() || width <= 0.0 || width > 1.0 {
            return Err(DomainError::ColumnOutOfRange {
                field: "width",
                value: width,
            });
        }
        Ok(Self { height, width })
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Rate times share: the quantity conserved by splits.
    pub fn area(&self) -> f64 {
        self.height * self.width
    }

    /// Weighted-average merge of two sibling columns into their parent.
    ///
    /// Inverse of the split: for any split of `parent`, merging the two
    /// children reconstructs `parent` within [`TOLERANCE`].
    pub fn merge(left: Column, right: Column) -> Column {
        let width = left.width + right.width;
        Column {
            height: (left.area() + right.area()) / width,
            width,
        }
    }

    /// Relative comparison within [`TOLERANCE`].
    pub fn approx_eq(&self, other: &Column) -> bool {
        approx(self.height, other.height) && approx(self.width, other.width)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} × {:.4}", self.height, self.width)
    }
}

pub(crate) fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Which role of a sibling pair a column plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Treatment,
    Control,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Treatment => write!(f, "treatment"),
            Side::Control => write!(f, "control"),
        }
    }
}

/// The (treatment, control) columns compared at one tree position.
///
/// Pairs, not individual columns, are the atomic unit of a split: the
/// conservation laws are defined jointly across the pair's two subtrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiblingPair {
    treatment: Column,
    control: Column,
}

impl SiblingPair {
    pub fn new(treatment: Column, control: Column) -> Self {
        Self { treatment, control }
    }

    /// Build a pair from raw heights and widths, validating all four values.
    pub fn from_parts(th: f64, tw: f64, ch: f64, cw: f64) -> DomainResult<Self> {
        Ok(Self::new(Column::new(th, tw)?, Column::new(ch, cw)?))
    }

    pub fn treatment(&self) -> Column {
        self.treatment
    }

    pub fn control(&self) -> Column {
        self.control
    }

    pub fn column(&self, side: Side) -> Column {
        match side {
            Side::Treatment => self.treatment,
            Side::Control => self.control,
        }
    }

    /// The same pair with roles exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            treatment: self.control,
            control: self.treatment,
        }
    }

    /// `(treatment_height, treatment_width, control_height, control_width)`
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (
            self.treatment.height,
            self.treatment.width,
            self.control.height,
            self.control.width,
        )
    }

    pub fn approx_eq(&self, other: &SiblingPair) -> bool {
        self.treatment.approx_eq(&other.treatment) && self.control.approx_eq(&other.control)
    }
}
