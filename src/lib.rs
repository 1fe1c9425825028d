pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{RatgeoError, Result};
pub use geometry::{Distance, Geometry, Intersect, Transform};
pub use math::{Oom, Rational, RoundingMode};
