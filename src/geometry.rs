//! Fundamental geometric types for solid modelling.
//!
//! All lengths are millimetres. The assembly frame uses X across the two beams,
//! Y along the beam length and Z through the section depth.

use std::fmt;

use nalgebra::{Point3, Vector3};

use crate::transform::Transform;

/// Coordinate axis of the assembly frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Across the two beams.
    X,
    /// Along the beam length.
    Y,
    /// Through the section depth.
    Z,
}

impl Axis {
    /// All three axes in component order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of the axis in a [`Vector3`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "spacing",
            Axis::Y => "longitudinal",
            Axis::Z => "height",
        };
        f.write_str(name)
    }
}

/// Convenience helper for creating [`Point3`] instances.
///
/// # Examples
/// ```
/// use lacingx::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub fn point(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

/// Convenience helper for creating [`Vector3`] instances.
///
/// # Examples
/// ```
/// use lacingx::vector;
///
/// let offset = vector(444.3, 0.0, 0.0);
/// assert_eq!(offset.x, 444.3);
/// ```
#[must_use]
pub fn vector(x: f64, y: f64, z: f64) -> Vector3<f64> {
    Vector3::new(x, y, z)
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from two corners in any order.
    #[must_use]
    pub fn from_corners(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_corners(first, first), |acc, p| Self {
            min: acc.min.inf(&p),
            max: acc.max.sup(&p),
        }))
    }

    /// Extent of the box along each axis.
    #[must_use]
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Whether `other` lies inside this box, allowing `tolerance` on every face.
    #[must_use]
    pub fn contains(&self, other: &Self, tolerance: f64) -> bool {
        Axis::ALL.iter().all(|axis| {
            let i = axis.index();
            other.min[i] >= self.min[i] - tolerance && other.max[i] <= self.max[i] + tolerance
        })
    }

    /// Volume shared by the interiors of two boxes.
    ///
    /// Boxes touching on a face, edge or corner share no interior and give zero.
    #[must_use]
    pub fn interior_overlap(&self, other: &Self) -> f64 {
        Axis::ALL
            .iter()
            .map(|axis| {
                let i = axis.index();
                (self.max[i].min(other.max[i]) - self.min[i].max(other.min[i])).max(0.0)
            })
            .product()
    }

    /// Depth by which two boxes interpenetrate, in millimetres.
    ///
    /// This is the smallest overlap over the three axes, so it is zero for
    /// boxes that are disjoint or only touch, and a length that can be compared
    /// against a length tolerance.
    #[must_use]
    pub fn penetration_depth(&self, other: &Self) -> f64 {
        Axis::ALL
            .iter()
            .map(|axis| {
                let i = axis.index();
                (self.max[i].min(other.max[i]) - self.min[i].max(other.min[i])).max(0.0)
            })
            .fold(f64::INFINITY, f64::min)
    }
}

/// Rectangular box solid anchored at its local origin corner.
///
/// The box spans `[0, extents.x] × [0, extents.y] × [0, extents.z]` in its own
/// frame; `placement` maps that frame into the parent frame. Solids are never
/// mutated, transforming one returns a new value with the same extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solid {
    /// Size along the local X, Y and Z axes.
    extents: Vector3<f64>,
    /// Rigid placement of the local frame.
    placement: Transform,
}

impl Solid {
    /// Create a solid at the identity placement. Extents are assumed positive.
    pub(crate) fn from_extents(extents: Vector3<f64>) -> Self {
        Self {
            extents,
            placement: Transform::identity(),
        }
    }

    /// Intrinsic size along the local axes.
    #[must_use]
    pub fn extents(&self) -> Vector3<f64> {
        self.extents
    }

    /// Placement of the solid's local frame.
    #[must_use]
    pub fn placement(&self) -> &Transform {
        &self.placement
    }

    /// Enclosed volume in cubic millimetres.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.extents.x * self.extents.y * self.extents.z
    }

    /// Position of the anchor corner in the parent frame.
    #[must_use]
    pub fn origin(&self) -> Point3<f64> {
        self.placement.apply_point(&Point3::origin())
    }

    /// The eight corners in the parent frame.
    #[must_use]
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let e = self.extents;
        let mut corners = [Point3::origin(); 8];
        for (bits, corner) in corners.iter_mut().enumerate() {
            let local = Point3::new(
                if bits & 1 == 0 { 0.0 } else { e.x },
                if bits & 2 == 0 { 0.0 } else { e.y },
                if bits & 4 == 0 { 0.0 } else { e.z },
            );
            *corner = self.placement.apply_point(&local);
        }
        corners
    }

    /// Axis-aligned bounds in the parent frame.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        let corners = self.corners();
        corners[1..]
            .iter()
            .fold(Aabb::from_corners(corners[0], corners[0]), |acc, p| Aabb {
                min: acc.min.inf(p),
                max: acc.max.sup(p),
            })
    }

    /// Return a copy of the solid moved by `transform`.
    ///
    /// The new placement applies the existing placement first and `transform`
    /// second. The receiver is left untouched.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self {
            extents: self.extents,
            placement: self.placement.then(transform),
        }
    }

    /// Whether two solids have the same extents and placement within `epsilon`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.extents - other.extents).amax() <= epsilon
            && self.placement.approx_eq(&other.placement, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn touching_boxes_share_no_interior() {
        let a = Aabb::from_corners(point(0.0, 0.0, 0.0), point(1.0, 1.0, 1.0));
        let b = Aabb::from_corners(point(1.0, 0.0, 0.0), point(2.0, 1.0, 1.0));
        assert_eq!(a.interior_overlap(&b), 0.0);
        let c = Aabb::from_corners(point(0.5, 0.5, 0.5), point(2.0, 2.0, 2.0));
        assert_relative_eq!(a.interior_overlap(&c), 0.125);
    }

    #[test]
    fn penetration_depth_is_the_shallowest_axis() {
        let a = Aabb::from_corners(point(0.0, 0.0, 0.0), point(10.0, 1000.0, 10.0));
        let b = Aabb::from_corners(point(2.0, 0.0, 9.5), point(4.0, 1000.0, 20.0));
        assert_relative_eq!(a.penetration_depth(&b), 0.5);
        let touching = Aabb::from_corners(point(10.0, 0.0, 0.0), point(12.0, 1.0, 1.0));
        assert_eq!(a.penetration_depth(&touching), 0.0);
        let apart = Aabb::from_corners(point(20.0, 0.0, 0.0), point(22.0, 1.0, 1.0));
        assert_eq!(a.penetration_depth(&apart), 0.0);
    }

    #[test]
    fn containment_respects_tolerance() {
        let outer = Aabb::from_corners(point(0.0, 0.0, 0.0), point(10.0, 10.0, 10.0));
        let inner = Aabb::from_corners(point(0.0, 2.0, 2.0), point(10.0 + 1.0e-9, 3.0, 3.0));
        assert!(outer.contains(&inner, 1.0e-6));
        assert!(!outer.contains(&inner, 0.0));
    }

    #[test]
    fn bounding_box_of_translated_solid() {
        let solid = Solid::from_extents(vector(2.0, 3.0, 4.0))
            .transformed(&Transform::translation(vector(1.0, -1.0, 0.5)));
        let bounds = solid.bounding_box();
        assert_relative_eq!(bounds.min, point(1.0, -1.0, 0.5));
        assert_relative_eq!(bounds.max, point(3.0, 2.0, 4.5));
        assert_relative_eq!(solid.volume(), 24.0);
    }

    #[test]
    fn aabb_from_points_handles_empty_input() {
        assert!(Aabb::from_points(Vec::<Point3<f64>>::new()).is_none());
        let bounds = Aabb::from_points(vec![point(1.0, 5.0, -2.0), point(-1.0, 0.0, 3.0)])
            .expect("two points");
        assert_eq!(bounds.min, point(-1.0, 0.0, -2.0));
        assert_eq!(bounds.max, point(1.0, 5.0, 3.0));
    }

    #[test]
    fn axis_display_uses_frame_names() {
        assert_eq!(Axis::X.to_string(), "spacing");
        assert_eq!(Axis::Y.to_string(), "longitudinal");
        assert_eq!(Axis::Z.to_string(), "height");
    }
}
