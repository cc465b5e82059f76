//! Implements `Convert` functions between the interface point type and nalgebra types.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hex_if::points::Point;
use nalgebra::Vector3;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

pub trait Convert<O> {
    fn convert(&self) -> O;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Convert<Vector3<f64>> for Point {
    fn convert(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build a named interface point from a position vector.
pub fn named_point<S: Into<String>>(name: S, position: &Vector3<f64>) -> Point {
    Point::new(name, position.x, position.y, position.z)
}
