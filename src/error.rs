//! Error type shared by every curve, spline and numeric routine.

/// Failure of a curve, spline or numeric operation.
///
/// Operations that fail on invalid input return one of these without
/// mutating the receiver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("point limit of {limit} exceeded")]
    PointLimitExceeded { limit: usize },
    #[error("index {index} out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("coordinates must be finite")]
    NonFiniteCoordinate,
    #[error("insufficient points: {required} required, {found} present")]
    InsufficientPoints { required: usize, found: usize },
    #[error("expected {expected} interpolation points, got {found}")]
    WrongPointCount { expected: usize, found: usize },
    #[error("interpolation points are coincident or degenerate")]
    DegenerateInterpolation,
    #[error("a knot already exists at this coordinate")]
    DuplicateKnot,
    #[error("moving knot {index} would break knot ordering")]
    KnotOrder { index: usize },
    #[error("no knot at x = {x}")]
    NoKnotAt { x: f64 },
    #[error("left-hand interval value overlaps right-hand value")]
    InvalidInterval,
    #[error("invalid number of quadrature points: {points}")]
    InvalidQuadratureOrder { points: usize },
    #[error("no sign change in interval")]
    NoSignChange,
    #[error("fit must be in 1..=10, got {fit}")]
    InvalidFit { fit: u8 },
    #[error("binomial row {n} is not representable")]
    BinomialOverflow { n: usize },
}
