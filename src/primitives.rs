//! Box primitives and the composite I-section built from them.

use std::fmt;

use nalgebra::Vector3;
use tracing::debug;

use crate::dimensions::{DimensionSet, LENGTH_TOLERANCE};
use crate::errors::GeometryError;
use crate::geometry::{point, vector, Aabb, Axis, Solid};
use crate::transform::Transform;

/// Construct an axis-aligned box with its anchor corner at the local origin.
///
/// `length`, `width` and `height` are the extents along the local X, Y and Z
/// axes respectively.
///
/// # Errors
///
/// Returns [`GeometryError::NonPositiveExtent`] when any extent is not a positive
/// finite number.
///
/// # Examples
/// ```
/// use lacingx::make_box;
///
/// let solid = make_box(10.0, 20.0, 30.0).expect("positive extents");
/// assert_eq!(solid.volume(), 6000.0);
/// ```
pub fn make_box(length: f64, width: f64, height: f64) -> Result<Solid, GeometryError> {
    box_from_extents(vector(length, width, height))
}

/// Construct a lacing bar.
///
/// The bar spans the gap between the beams along X (`length`), is `width` wide
/// along the beams' longitudinal Y axis and `thickness` deep along Z.
///
/// # Errors
///
/// Returns [`GeometryError::NonPositiveExtent`] when any extent is not positive.
pub fn make_lacing_solid(length: f64, thickness: f64, width: f64) -> Result<Solid, GeometryError> {
    box_from_extents(vector(length, width, thickness))
}

/// Construct a batten plate.
///
/// `width` runs across the beams (X), `thickness` along the beams (Y) and
/// `height` through the section depth (Z).
///
/// # Errors
///
/// Returns [`GeometryError::NonPositiveExtent`] when any extent is not positive.
pub fn make_plate(width: f64, height: f64, thickness: f64) -> Result<Solid, GeometryError> {
    box_from_extents(vector(width, thickness, height))
}

/// Validate extents and build the box.
fn box_from_extents(extents: Vector3<f64>) -> Result<Solid, GeometryError> {
    for axis in Axis::ALL {
        let value = extents[axis.index()];
        if !(value.is_finite() && value > 0.0) {
            return Err(GeometryError::NonPositiveExtent { axis, value });
        }
    }
    Ok(Solid::from_extents(extents))
}

/// Component box of an I-section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionPart {
    /// Lower flange plate.
    BottomFlange,
    /// Vertical web plate.
    Web,
    /// Upper flange plate.
    TopFlange,
}

impl SectionPart {
    /// Identifier used for part names in the assembly tree.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SectionPart::BottomFlange => "bottom_flange",
            SectionPart::Web => "web",
            SectionPart::TopFlange => "top_flange",
        }
    }
}

impl fmt::Display for SectionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionPart::BottomFlange => "bottom flange",
            SectionPart::Web => "web",
            SectionPart::TopFlange => "top flange",
        };
        f.write_str(name)
    }
}

/// One box of an I-section together with the transform placing it in the beam frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionComponent {
    /// Which plate this is.
    pub part: SectionPart,
    /// Box at its own origin.
    pub solid: Solid,
    /// Placement in the beam frame.
    pub transform: Transform,
}

impl SectionComponent {
    /// The box moved into the beam frame.
    #[must_use]
    pub fn positioned(&self) -> Solid {
        self.solid.transformed(&self.transform)
    }
}

/// An I-section extruded to a given length, made of three boxes.
///
/// The beam frame has the section width and depth along X and Z and the
/// length along Y, with the origin at the outer corner of the bottom flange.
#[derive(Clone, Debug, PartialEq)]
pub struct IBeamSection {
    /// Extruded length.
    length: f64,
    /// Flange width, also used as the overall section depth.
    depth: f64,
    /// Bottom flange, web and top flange in that order.
    components: [SectionComponent; 3],
}

impl IBeamSection {
    /// Extruded length in millimetres.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The three component boxes.
    #[must_use]
    pub fn components(&self) -> &[SectionComponent; 3] {
        &self.components
    }

    /// Nominal `width × length × width` envelope of the section.
    #[must_use]
    pub fn envelope(&self) -> Aabb {
        Aabb::from_corners(point(0.0, 0.0, 0.0), point(self.depth, self.length, self.depth))
    }

    /// Cross-sectional area in square millimetres.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.components
            .iter()
            .map(|c| c.solid.extents().x * c.solid.extents().z)
            .sum()
    }

    /// Verify that no component leaves the envelope and that components meet
    /// only on shared faces.
    ///
    /// `tolerance` is a length: components may interpenetrate by at most that
    /// depth along their shallowest axis.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SectionOutsideEnvelope`] or
    /// [`GeometryError::SectionOverlap`] for the first violation found.
    pub fn check(&self, tolerance: f64) -> Result<(), GeometryError> {
        let envelope = self.envelope();
        let bounds: Vec<(SectionPart, Aabb)> = self
            .components
            .iter()
            .map(|c| (c.part, c.positioned().bounding_box()))
            .collect();
        for (part, bbox) in &bounds {
            if !envelope.contains(bbox, tolerance) {
                return Err(GeometryError::SectionOutsideEnvelope { part: *part });
            }
        }
        for (i, (first, a)) in bounds.iter().enumerate() {
            for (second, b) in &bounds[i + 1..] {
                if a.penetration_depth(b) > tolerance {
                    return Err(GeometryError::SectionOverlap {
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Build an I-section of the given length from the section dimensions.
///
/// The bottom flange sits at the origin, the web is centred across the flange
/// width and lifted by one flange thickness, and the top flange is lifted by
/// `flange_width - flange_thickness`.
///
/// # Errors
///
/// Returns [`GeometryError`] when a component box is degenerate or the
/// assembled section fails [`IBeamSection::check`].
pub fn make_i_beam_section(
    length: f64,
    dimensions: &DimensionSet,
) -> Result<IBeamSection, GeometryError> {
    let width = dimensions.flange_width();
    let flange = dimensions.flange_thickness();
    let web = dimensions.web_thickness();

    let bottom = box_from_extents(vector(width, length, flange))?;
    let web_box = box_from_extents(vector(web, length, dimensions.web_height()))?;
    let top = box_from_extents(vector(width, length, flange))?;

    let section = IBeamSection {
        length,
        depth: width,
        components: [
            SectionComponent {
                part: SectionPart::BottomFlange,
                solid: bottom,
                transform: Transform::identity(),
            },
            SectionComponent {
                part: SectionPart::Web,
                solid: web_box,
                transform: Transform::translation(vector((width - web) / 2.0, 0.0, flange)),
            },
            SectionComponent {
                part: SectionPart::TopFlange,
                solid: top,
                transform: Transform::translation(vector(0.0, 0.0, width - flange)),
            },
        ],
    };
    section.check(LENGTH_TOLERANCE)?;
    debug!(length, area = section.area(), "Built I-section");
    Ok(section)
}
