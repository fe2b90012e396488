//! Placement of the second beam, the lacing bars and the batten plates.
//!
//! Lacing and batten positions are expressed in the connector frame, whose
//! origin is the outer face of beam 1's web. In that frame the web centre
//! planes sit at `web_thickness / 2` and `beam_spacing - web_thickness / 2`.
//! Lacing bars run between those planes and so meet both webs. Everything
//! else stays between the webs and flanges without touching them, and the
//! bars stay clear of the batten plates.

use std::fmt;

use nalgebra::Vector3;
use tracing::debug;

use crate::dimensions::{DimensionSet, LENGTH_TOLERANCE};
use crate::errors::GeometryError;
use crate::geometry::{point, vector, Aabb, Axis, Solid};
use crate::primitives::{make_lacing_solid, make_plate};
use crate::transform::Transform;

/// Kind of element positioned by the placement algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// One of the two main beams.
    Beam,
    /// A lacing bar between the webs.
    Lacing,
    /// An end batten plate.
    Batten,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Beam => "beam",
            ElementKind::Lacing => "lacing bar",
            ElementKind::Batten => "batten plate",
        };
        f.write_str(name)
    }
}

/// A primitive together with the transform that positions it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// What the element is.
    pub kind: ElementKind,
    /// Zero-based index within its group.
    pub index: usize,
    /// Box at its own origin.
    pub solid: Solid,
    /// Position in the connector frame.
    pub transform: Transform,
}

impl Placement {
    /// The box moved into the connector frame.
    #[must_use]
    pub fn positioned(&self) -> Solid {
        self.solid.transformed(&self.transform)
    }

    /// Longitudinal position of the element's anchor corner.
    #[must_use]
    pub fn longitudinal_position(&self) -> f64 {
        self.transform.translation_vector().y
    }
}

/// Longitudinal stations `i × beam_length / (count + 1)` for `i = 1..=count`.
///
/// Stations are produced lazily so a caller can stop at the first bar that
/// does not fit.
///
/// # Examples
/// ```
/// use lacingx::placement::lacing_positions;
///
/// let stations: Vec<f64> = lacing_positions(6096.0, 5).collect();
/// assert_eq!(stations, vec![1016.0, 2032.0, 3048.0, 4064.0, 5080.0]);
/// assert_eq!(lacing_positions(6096.0, 0).count(), 0);
/// ```
pub fn lacing_positions(beam_length: f64, count: usize) -> impl Iterator<Item = f64> {
    let pitch = beam_length / (count as f64 + 1.0);
    (1..=count).map(move |i| i as f64 * pitch)
}

/// Transform from the connector frame into the assembly frame.
#[must_use]
pub fn connector_frame(dimensions: &DimensionSet) -> Transform {
    let web_face = (dimensions.flange_width() - dimensions.web_thickness()) / 2.0;
    Transform::translation(vector(web_face, 0.0, 0.0))
}

/// Region of the connector frame the lacing bars must stay within.
///
/// Bars reach the web centre planes across the spacing, stay clear of both
/// batten plates along the beams and fit the web clear height between the
/// flanges.
#[must_use]
pub fn lacing_envelope(dimensions: &DimensionSet) -> Aabb {
    let batten = dimensions.batten_thickness();
    let flange = dimensions.flange_thickness();
    // Corners stay in order so an envelope with no room rejects every element.
    Aabb {
        min: point(0.0, batten, flange),
        max: point(
            dimensions.beam_spacing(),
            dimensions.beam_length() - batten,
            dimensions.flange_width() - flange,
        ),
    }
}

/// Region of the connector frame the batten plates must stay within.
///
/// Plates fit between the inner faces of the webs and the inner faces of the
/// flanges, along the full beam length.
#[must_use]
pub fn batten_envelope(dimensions: &DimensionSet) -> Aabb {
    let web = dimensions.web_thickness();
    let flange = dimensions.flange_thickness();
    Aabb {
        min: point(web, 0.0, flange),
        max: point(
            dimensions.beam_spacing() - web,
            dimensions.beam_length(),
            dimensions.flange_width() - flange,
        ),
    }
}

/// Offset of beam 2 from beam 1 along the spacing axis.
///
/// # Errors
///
/// Returns [`GeometryError::ClearGapMismatch`] when the offset differs from the
/// lacing length, which would leave the bars short of or past the second web.
pub fn second_beam_offset(dimensions: &DimensionSet) -> Result<Vector3<f64>, GeometryError> {
    let offset = dimensions.beam_spacing() - dimensions.web_thickness();
    let lacing_length = dimensions.lacing_length();
    if (offset - lacing_length).abs() > LENGTH_TOLERANCE {
        return Err(GeometryError::ClearGapMismatch {
            offset,
            lacing_length,
        });
    }
    Ok(vector(offset, 0.0, 0.0))
}

/// Position the lacing bars at uniform stations along the beams.
///
/// Each bar starts on the centre plane of beam 1's web, spans the lacing length
/// to beam 2's web and is centred through the section depth.
///
/// # Errors
///
/// Returns [`GeometryError::OutOfEnvelope`] with the bar's index when a bar
/// leaves the [`lacing_envelope`], or [`GeometryError::NonPositiveExtent`] for a
/// degenerate bar.
pub fn place_lacing(dimensions: &DimensionSet) -> Result<Vec<Placement>, GeometryError> {
    let envelope = lacing_envelope(dimensions);
    let bar = make_lacing_solid(
        dimensions.lacing_length(),
        dimensions.lacing_thickness(),
        dimensions.lacing_width(),
    )?;
    let x_start = dimensions.web_thickness() / 2.0;
    let z_center = (dimensions.flange_width() - dimensions.lacing_thickness()) / 2.0;

    lacing_positions(dimensions.beam_length(), dimensions.lacing_count())
        .enumerate()
        .map(|(index, y)| {
            let placement = Placement {
                kind: ElementKind::Lacing,
                index,
                solid: bar,
                transform: Transform::translation(vector(x_start, y, z_center)),
            };
            check_envelope(&placement, &envelope)?;
            debug!(index, position = y, "Placed lacing bar");
            Ok(placement)
        })
        .collect()
}

/// Position the bottom and top batten plates.
///
/// The bottom plate sits at the start of the beams and the top plate ends flush
/// with them; both are centred across the spacing and through the depth.
///
/// # Errors
///
/// Returns [`GeometryError::OutOfEnvelope`] with the plate's index (0 bottom,
/// 1 top) when a plate leaves the [`batten_envelope`].
pub fn place_battens(dimensions: &DimensionSet) -> Result<[Placement; 2], GeometryError> {
    let envelope = batten_envelope(dimensions);
    let plate = make_plate(
        dimensions.batten_width(),
        dimensions.batten_height(),
        dimensions.batten_thickness(),
    )?;
    let x_offset = (dimensions.beam_spacing() - dimensions.batten_width()) / 2.0;
    let z_offset = (dimensions.flange_width() - dimensions.batten_height()) / 2.0;
    let place = |index: usize, y: f64| {
        let placement = Placement {
            kind: ElementKind::Batten,
            index,
            solid: plate,
            transform: Transform::translation(vector(x_offset, y, z_offset)),
        };
        check_envelope(&placement, &envelope)?;
        debug!(index, position = y, "Placed batten plate");
        Ok::<_, GeometryError>(placement)
    };
    let top = dimensions.beam_length() - dimensions.batten_thickness();
    Ok([place(0, 0.0)?, place(1, top)?])
}

/// Ensure the placed box lies within `envelope`, reporting the first offending face.
fn check_envelope(placement: &Placement, envelope: &Aabb) -> Result<(), GeometryError> {
    let bounds = placement.positioned().bounding_box();
    for axis in Axis::ALL {
        let i = axis.index();
        let violation = if bounds.min[i] < envelope.min[i] - LENGTH_TOLERANCE {
            Some((bounds.min[i], envelope.min[i]))
        } else if bounds.max[i] > envelope.max[i] + LENGTH_TOLERANCE {
            Some((bounds.max[i], envelope.max[i]))
        } else {
            None
        };
        if let Some((coordinate, limit)) = violation {
            return Err(GeometryError::OutOfEnvelope {
                kind: placement.kind,
                index: placement.index,
                axis,
                coordinate,
                limit,
            });
        }
    }
    Ok(())
}
