//! Rigid transforms and the operations that position solids with them.

use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};

use crate::errors::GeometryError;
use crate::geometry::Solid;

/// Smallest axis direction norm accepted for a rotation.
const AXIS_EPSILON: f64 = 1.0e-12;

/// Rotation by an angle about an axis passing through a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRotation {
    /// A point on the rotation axis.
    pub point: Point3<f64>,
    /// Direction of the axis; normalised on construction of the transform.
    pub direction: Vector3<f64>,
    /// Right-handed rotation angle in radians.
    pub angle: f64,
}

impl AxisRotation {
    /// Create a rotation description.
    #[must_use]
    pub const fn new(point: Point3<f64>, direction: Vector3<f64>, angle: f64) -> Self {
        Self {
            point,
            direction,
            angle,
        }
    }
}

/// Rigid transform made of a rotation followed by a translation.
///
/// # Examples
/// ```
/// use lacingx::{point, vector, Transform};
///
/// let shift = Transform::translation(vector(444.3, 0.0, 0.0));
/// let moved = shift.apply_point(&point(0.0, 10.0, 0.0));
/// assert_eq!(moved, point(444.3, 10.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Underlying rigid motion.
    isometry: Isometry3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The transform that leaves every point in place.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            isometry: Isometry3::identity(),
        }
    }

    /// Pure translation by `offset`.
    #[must_use]
    pub fn translation(offset: Vector3<f64>) -> Self {
        Self {
            isometry: Isometry3::from_parts(Translation3::from(offset), UnitQuaternion::identity()),
        }
    }

    /// Rotation by `angle` radians about the axis through `axis_point` along
    /// `axis_direction`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateAxis`] when `axis_direction` has no length.
    pub fn rotation_about(
        axis_point: Point3<f64>,
        axis_direction: Vector3<f64>,
        angle: f64,
    ) -> Result<Self, GeometryError> {
        let axis = Unit::try_new(axis_direction, AXIS_EPSILON).ok_or(GeometryError::DegenerateAxis)?;
        let rotation = UnitQuaternion::from_axis_angle(&axis, angle);
        // Points on the axis stay fixed: p -> R (p - c) + c.
        let shift = axis_point.coords - rotation * axis_point.coords;
        Ok(Self {
            isometry: Isometry3::from_parts(Translation3::from(shift), rotation),
        })
    }

    /// Translate by `offset`, then rotate about `rotation`.
    ///
    /// The rotation axis point is expressed in the target frame, i.e. after the
    /// translation has been applied. The result is one rigid transform equal to
    /// `translation(offset).then(rotation_about(..))`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateAxis`] when the rotation axis has no length.
    pub fn placement(
        offset: Vector3<f64>,
        rotation: Option<AxisRotation>,
    ) -> Result<Self, GeometryError> {
        let translate = Self::translation(offset);
        match rotation {
            None => Ok(translate),
            Some(r) => Ok(translate.then(&Self::rotation_about(r.point, r.direction, r.angle)?)),
        }
    }

    /// Transform that applies `self` first and `next` second.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            isometry: next.isometry * self.isometry,
        }
    }

    /// Inverse rigid motion.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            isometry: self.isometry.inverse(),
        }
    }

    /// Map a point through the transform.
    #[must_use]
    pub fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.isometry.transform_point(point)
    }

    /// Map a direction through the transform, ignoring translation.
    #[must_use]
    pub fn apply_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.isometry.transform_vector(vector)
    }

    /// Translation component.
    #[must_use]
    pub fn translation_vector(&self) -> Vector3<f64> {
        self.isometry.translation.vector
    }

    /// Rotation angle in radians.
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        self.isometry.rotation.angle()
    }

    /// Borrow the underlying `nalgebra` isometry.
    #[must_use]
    pub fn isometry(&self) -> &Isometry3<f64> {
        &self.isometry
    }

    /// Whether the transform moves no point by more than `epsilon` near the origin.
    #[must_use]
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.approx_eq(&Self::identity(), epsilon)
    }

    /// Component-wise comparison of rotation and translation.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.translation_vector() - other.translation_vector()).amax() <= epsilon
            && self.isometry.rotation.angle_to(&other.isometry.rotation) <= epsilon
    }
}

impl From<Isometry3<f64>> for Transform {
    fn from(isometry: Isometry3<f64>) -> Self {
        Self { isometry }
    }
}

/// Return `solid` moved by `offset`.
#[must_use]
pub fn translate(solid: &Solid, offset: Vector3<f64>) -> Solid {
    solid.transformed(&Transform::translation(offset))
}

/// Return `solid` rotated by `angle` radians about the axis through
/// `axis_point` along `axis_direction`.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateAxis`] when `axis_direction` has no length.
pub fn rotate(
    solid: &Solid,
    axis_point: Point3<f64>,
    axis_direction: Vector3<f64>,
    angle: f64,
) -> Result<Solid, GeometryError> {
    let rotation = Transform::rotation_about(axis_point, axis_direction, angle)?;
    Ok(solid.transformed(&rotation))
}

/// Combine two transforms into one that applies `first` and then `second`.
///
/// Composition is associative: `compose(&compose(a, b), c)` equals
/// `compose(a, &compose(b, c))`.
#[must_use]
pub fn compose(first: &Transform, second: &Transform) -> Transform {
    first.then(second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{point, vector};
    use crate::primitives::make_box;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_is_a_no_op() {
        let solid = make_box(10.0, 20.0, 30.0).expect("valid box");
        let same = solid.transformed(&Transform::identity());
        assert!(same.approx_eq(&solid, 1.0e-12));
    }

    #[test]
    fn translate_keeps_input_and_extents() {
        let solid = make_box(10.0, 20.0, 30.0).expect("valid box");
        let moved = translate(&solid, vector(1.0, 2.0, 3.0));
        assert_eq!(solid.origin(), point(0.0, 0.0, 0.0));
        assert_relative_eq!(moved.origin(), point(1.0, 2.0, 3.0));
        assert_eq!(moved.extents(), solid.extents());
    }

    #[test]
    fn rotation_keeps_axis_points_fixed() {
        let pivot = point(5.0, 5.0, 0.0);
        let rotation =
            Transform::rotation_about(pivot, vector(0.0, 0.0, 2.0), FRAC_PI_2).expect("valid axis");
        assert_relative_eq!(rotation.apply_point(&pivot), pivot, epsilon = 1.0e-12);
        assert_relative_eq!(
            rotation.apply_point(&point(6.0, 5.0, 0.0)),
            point(5.0, 6.0, 0.0),
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn zero_axis_is_rejected() {
        let solid = make_box(1.0, 1.0, 1.0).expect("valid box");
        let error = rotate(&solid, point(0.0, 0.0, 0.0), vector(0.0, 0.0, 0.0), 1.0)
            .expect_err("zero axis");
        assert_eq!(error, GeometryError::DegenerateAxis);
    }

    #[test]
    fn placement_translates_before_rotating() {
        let rotation = AxisRotation::new(point(0.0, 0.0, 0.0), vector(0.0, 0.0, 1.0), FRAC_PI_2);
        let placement =
            Transform::placement(vector(1.0, 0.0, 0.0), Some(rotation)).expect("valid axis");
        // Origin moves to (1, 0, 0) first and is then swung onto the Y axis.
        assert_relative_eq!(
            placement.apply_point(&point(0.0, 0.0, 0.0)),
            point(0.0, 1.0, 0.0),
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn compose_is_associative() {
        let a = Transform::translation(vector(1.0, 2.0, 3.0));
        let b = Transform::rotation_about(point(1.0, 0.0, 0.0), vector(0.0, 1.0, 0.0), 0.3)
            .expect("valid axis");
        let c = Transform::rotation_about(point(0.0, 4.0, 0.0), vector(1.0, 1.0, 0.0), -1.1)
            .expect("valid axis");
        let left = compose(&compose(&a, &b), &c);
        let right = compose(&a, &compose(&b, &c));
        assert!(left.approx_eq(&right, 1.0e-9));
    }

    #[test]
    fn zero_angle_rotation_is_identity() {
        let rotation = Transform::rotation_about(point(3.0, 1.0, 2.0), vector(0.0, 0.0, 1.0), 0.0)
            .expect("valid axis");
        assert!(rotation.is_identity(1.0e-12));
    }
}
