use thiserror::Error;

/// Top-level error type for the ratgeo kernel.
#[derive(Debug, Error)]
pub enum RatgeoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Numeric(#[from] NumericError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Construction-time invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("points defining a line must be distinct")]
    CoincidentPoints,

    #[error("zero-length vector")]
    ZeroVector,

    #[error("points are collinear")]
    CollinearPoints,

    #[error("points are coplanar")]
    CoplanarPoints,

    #[error("corners do not form a rectangle: {0}")]
    NotRectangular(&'static str),

    #[error("an envelope needs at least one point")]
    EmptyEnvelope,

    #[error("extent {axis}: minimum exceeds maximum")]
    InvalidExtents { axis: char },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised by the numeric tower.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumericError {
    #[error("square root of a negative value")]
    NegativeRadicand,

    #[error("cannot parse {0:?} as a decimal")]
    Parse(String),
}

/// Errors related to operations on existing geometry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not supported: {0}")]
    Unsupported(String),
}

/// Convenience type alias for results using [`RatgeoError`].
pub type Result<T> = std::result::Result<T, RatgeoError>;
