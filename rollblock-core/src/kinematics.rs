/// Arc geometry of a single 90 degree roll
///
/// A roll tips the block over one of its bottom edges. Seen along the rolling
/// axis the block is a rectangle whose center sweeps a quarter circle around
/// the hinge corner (the pivot). Everything here is relative to the block's
/// center before the roll.
use nalgebra::{Rotation3, Unit, Vector3};

use crate::axis::{Sign, WorldAxis};
use crate::error::RollError;
use crate::orientation::{LocalAxis, Orientation};

/// Half sizes of the block along its local axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfExtents {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl HalfExtents {
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, RollError> {
        for (axis, value) in [('x', x), ('y', y), ('z', z)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RollError::InvalidExtent { axis, value });
            }
        }
        Ok(Self { x, y, z })
    }

    /// Half extents of a block with the given full width, height and depth.
    pub fn from_size(width: f64, height: f64, depth: f64) -> Result<Self, RollError> {
        Self::new(width / 2.0, height / 2.0, depth / 2.0)
    }

    pub fn along(&self, axis: LocalAxis) -> f64 {
        match axis {
            LocalAxis::X => self.x,
            LocalAxis::Y => self.y,
            LocalAxis::Z => self.z,
        }
    }
}

/// The circular arc followed by the block's center during one roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollArcParameters {
    /// Hinge corner, relative to the center before the roll.
    pub pivot: Vector3<f64>,
    /// Direction from the pivot to the center before the roll.
    pub u: Unit<Vector3<f64>>,
    /// Direction from the pivot to the center after the roll.
    pub v: Unit<Vector3<f64>>,
    pub radius: f64,
    pub rotation_sign: Sign,
}

impl RollArcParameters {
    /// Axis the block turns about, `u x v`.
    pub fn rotation_axis(&self) -> Unit<Vector3<f64>> {
        Unit::new_normalize(self.u.cross(self.v.as_ref()))
    }

    /// Center offset from the pre-roll center at the given arc angle.
    pub fn point_at(&self, angle: f64) -> Vector3<f64> {
        let (sin, cos) = angle.sin_cos();
        self.pivot + (self.u.into_inner() * cos + self.v.into_inner() * sin) * self.radius
    }

    pub fn rotation_at(&self, angle: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&self.rotation_axis(), angle)
    }

    /// Net movement of the center once the roll completes.
    pub fn displacement(&self) -> Vector3<f64> {
        self.pivot + self.v.into_inner() * self.radius
    }
}

/// In-plane world axes for a roll: the one the block travels along and the
/// one its height is measured along.
fn cross_section(axis: WorldAxis) -> (WorldAxis, WorldAxis) {
    match axis {
        WorldAxis::X => (WorldAxis::Y, WorldAxis::Z),
        WorldAxis::Y => (WorldAxis::X, WorldAxis::Z),
        WorldAxis::Z => (WorldAxis::X, WorldAxis::Y),
    }
}

/// Compute the arc for rolling a block in `orientation` about `axis`.
///
/// `outer` picks which of the two bottom edges is the hinge. `perpendicular`
/// picks which side of the cross-section is on the ground; rolling on a floor
/// always uses `Sign::Positive`.
pub fn roll_arc(
    orientation: Orientation,
    extents: &HalfExtents,
    axis: WorldAxis,
    outer: Sign,
    perpendicular: Sign,
) -> RollArcParameters {
    let (travel, height) = cross_section(axis);
    let roles = orientation.roles();
    let a = extents.along(roles.local_for(travel));
    let b = extents.along(roles.local_for(height));
    let o = outer.value();
    let p = perpendicular.value();

    let (pivot, u, v) = match axis {
        WorldAxis::X => (
            Vector3::new(0.0, o * a, -p * b),
            Vector3::new(0.0, -o * a, p * b),
            Vector3::new(0.0, o * b, p * a),
        ),
        WorldAxis::Y => (
            Vector3::new(-o * a, 0.0, -p * b),
            Vector3::new(o * a, 0.0, p * b),
            Vector3::new(-o * b, 0.0, p * a),
        ),
        WorldAxis::Z => (
            Vector3::new(o * a, -p * b, 0.0),
            Vector3::new(-o * a, p * b, 0.0),
            Vector3::new(o * b, p * a, 0.0),
        ),
    };

    RollArcParameters {
        pivot,
        u: Unit::new_normalize(u),
        v: Unit::new_normalize(v),
        radius: (a * a + b * b).sqrt(),
        rotation_sign: outer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn extents() -> HalfExtents {
        HalfExtents::new(1.0, 2.0, 3.0).unwrap()
    }

    #[test]
    fn test_invalid_extents() {
        assert!(HalfExtents::new(0.0, 1.0, 1.0).is_err());
        assert!(HalfExtents::new(1.0, -1.0, 1.0).is_err());
        assert_eq!(
            HalfExtents::new(1.0, 1.0, f64::NAN).unwrap_err().to_string(),
            "half extent along z must be finite and positive, got NaN"
        );
        assert_eq!(HalfExtents::from_size(2.0, 4.0, 6.0), Ok(extents()));
    }

    #[test]
    fn test_x_roll_from_base() {
        let arc = roll_arc(Orientation::BASE, &extents(), WorldAxis::X, Sign::Positive, Sign::Positive);
        assert_eq!(arc.radius, 13f64.sqrt());
        assert_eq!(arc.pivot, Vector3::new(0.0, 2.0, -3.0));
        assert_relative_eq!(arc.u.into_inner(), Vector3::new(0.0, -2.0, 3.0) / 13f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(arc.v.into_inner(), Vector3::new(0.0, 3.0, 2.0) / 13f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(arc.displacement(), Vector3::new(0.0, 5.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(arc.rotation_axis().into_inner(), -Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_y_roll_from_base() {
        let arc = roll_arc(Orientation::BASE, &extents(), WorldAxis::Y, Sign::Positive, Sign::Positive);
        assert_eq!(arc.radius, 10f64.sqrt());
        assert_eq!(arc.pivot, Vector3::new(-1.0, 0.0, -3.0));
        assert_relative_eq!(arc.displacement(), Vector3::new(-4.0, 0.0, -2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_negative_outer_sign_mirrors_pivot() {
        let arc = roll_arc(Orientation::BASE, &extents(), WorldAxis::X, Sign::Negative, Sign::Positive);
        assert_eq!(arc.pivot, Vector3::new(0.0, -2.0, -3.0));
        assert_eq!(arc.rotation_sign, Sign::Negative);
        assert_relative_eq!(arc.displacement(), Vector3::new(0.0, -5.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_arc_endpoints() {
        let arc = roll_arc(Orientation::BASE, &extents(), WorldAxis::Z, Sign::Positive, Sign::Positive);
        assert_relative_eq!(arc.point_at(0.0), Vector3::zeros(), epsilon = 1e-12);
        assert_relative_eq!(arc.point_at(FRAC_PI_2), arc.displacement(), epsilon = 1e-12);
    }

    #[test]
    fn test_basis_is_orthonormal_everywhere() {
        let cube = HalfExtents::new(1.5, 1.5, 1.5).unwrap();
        for orientation in crate::OrientationGraph::global().states() {
            for extents in [extents(), cube] {
                for axis in WorldAxis::ALL {
                    for outer in [Sign::Positive, Sign::Negative] {
                        for perpendicular in [Sign::Positive, Sign::Negative] {
                            let arc = roll_arc(orientation, &extents, axis, outer, perpendicular);
                            assert_relative_eq!(arc.u.norm(), 1.0, epsilon = 1e-12);
                            assert_relative_eq!(arc.v.norm(), 1.0, epsilon = 1e-12);
                            assert!(arc.u.dot(arc.v.as_ref()).abs() < 1e-12);
                            assert!(arc.radius > 0.0);
                            assert_relative_eq!(arc.point_at(0.0), Vector3::zeros(), epsilon = 1e-12);
                        }
                    }
                }
            }
        }
    }
}
