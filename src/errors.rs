//! Error types produced while validating dimensions or placing geometry.

use thiserror::Error;

use crate::geometry::Axis;
use crate::placement::ElementKind;
use crate::primitives::SectionPart;

/// Error returned when a [`DimensionSet`](crate::DimensionSet) cannot be constructed.
///
/// Every variant names the parameter that violated its invariant so callers can
/// point users at the value to fix.
///
/// # Examples
///
/// ```
/// use lacingx::ConfigurationError;
///
/// let error = ConfigurationError::NoClearGap {
///     beam_spacing: 5.0,
///     web_thickness: 5.7,
/// };
/// assert_eq!(error.parameter(), "webThickness");
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    /// Returned when a length is zero, negative or not finite.
    #[error("{parameter} must be a positive length in millimetres (received {value})")]
    NonPositive {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the lacing count resolves to zero or fewer bars.
    #[error("lacingSpacingOrCount must give at least one lacing bar (received count {count})")]
    NonPositiveLacingCount {
        /// Requested or derived number of bars.
        count: i64,
    },
    /// Returned when the bars are wider than the pitch between stations, so
    /// neighbouring bars would overlap or the last one would overrun the beams.
    #[error(
        "lacingSpacingOrCount gives {count} bars at a pitch of {pitch}, narrower than \
         lacingWidth ({lacing_width})"
    )]
    LacingTooDense {
        /// Resolved number of bars.
        count: usize,
        /// Distance between consecutive stations.
        pitch: f64,
        /// Bar width along the beams.
        lacing_width: f64,
    },
    /// Returned when the flanges leave no room for a web.
    #[error(
        "flangeWidth ({flange_width}) must exceed twice flangeThickness ({flange_thickness}) \
         so the web height is positive"
    )]
    NoWebHeight {
        /// Flange width, which is also the section depth.
        flange_width: f64,
        /// Flange thickness.
        flange_thickness: f64,
    },
    /// Returned when the web is at least as thick as the beam spacing.
    #[error(
        "webThickness ({web_thickness}) must be smaller than beamSpacing ({beam_spacing}) \
         so the clear gap is positive"
    )]
    NoClearGap {
        /// Beam spacing.
        beam_spacing: f64,
        /// Web thickness.
        web_thickness: f64,
    },
    /// Returned when the second beam would intersect the first.
    #[error(
        "beamSpacing - webThickness ({clear_gap}) must be at least flangeWidth ({flange_width}) \
         so the beams do not intersect"
    )]
    BeamsOverlap {
        /// Offset of the second beam, `beam_spacing - web_thickness`.
        clear_gap: f64,
        /// Flange width of each beam.
        flange_width: f64,
    },
    /// Returned when an explicit lacing length disagrees with the clear gap.
    #[error("lacingLength ({lacing_length}) must equal beamSpacing - webThickness ({clear_gap})")]
    LacingLengthMismatch {
        /// Supplied lacing length.
        lacing_length: f64,
        /// Clear gap implied by the beam spacing and web thickness.
        clear_gap: f64,
    },
    /// Returned when a batten plate is wider than the beam spacing.
    #[error("battenWidth ({batten_width}) must not exceed beamSpacing ({beam_spacing})")]
    BattenWiderThanSpacing {
        /// Supplied batten width.
        batten_width: f64,
        /// Beam spacing.
        beam_spacing: f64,
    },
    /// Returned when a required parameter is absent.
    #[error("missing parameter {0}")]
    MissingParameter(&'static str),
    /// Returned when the raw mapping cannot be parsed.
    #[error("invalid dimension input: {reason}")]
    InvalidInput {
        /// Parser message.
        reason: String,
    },
}

impl ConfigurationError {
    /// Name of the input parameter responsible for the error.
    #[must_use]
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::NonPositive { parameter, .. } | Self::MissingParameter(parameter) => parameter,
            Self::NonPositiveLacingCount { .. } | Self::LacingTooDense { .. } => {
                "lacingSpacingOrCount"
            }
            Self::NoWebHeight { .. } => "flangeThickness",
            Self::NoClearGap { .. } => "webThickness",
            Self::BeamsOverlap { .. } => "beamSpacing",
            Self::LacingLengthMismatch { .. } => "lacingLength",
            Self::BattenWiderThanSpacing { .. } => "battenWidth",
            Self::InvalidInput { .. } => "input",
        }
    }
}

/// Error returned when a primitive or placement computation produces invalid geometry.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when a box is requested with a non-positive extent.
    #[error("box extent along {axis} must be positive (received {value})")]
    NonPositiveExtent {
        /// Axis of the rejected extent.
        axis: Axis,
        /// Rejected extent in millimetres.
        value: f64,
    },
    /// Returned when a rotation axis has no direction.
    #[error("rotation axis direction must be non-zero")]
    DegenerateAxis,
    /// Returned when a placed element leaves its envelope in the connector frame.
    #[error(
        "{kind} {index} leaves the envelope along the {axis} axis \
         (coordinate {coordinate}, limit {limit})"
    )]
    OutOfEnvelope {
        /// Kind of the offending element.
        kind: ElementKind,
        /// Zero-based index of the element within its group.
        index: usize,
        /// Axis along which the envelope is exceeded.
        axis: Axis,
        /// Offending coordinate in millimetres.
        coordinate: f64,
        /// Envelope bound that was crossed.
        limit: f64,
    },
    /// Returned when the second beam offset does not reproduce the lacing length.
    #[error("second beam offset ({offset}) does not match lacing length ({lacing_length})")]
    ClearGapMismatch {
        /// Offset of beam 2 along the spacing axis.
        offset: f64,
        /// Lacing length the offset must equal.
        lacing_length: f64,
    },
    /// Returned when two boxes of an I-section interpenetrate.
    #[error("{first} and {second} of the I-section overlap")]
    SectionOverlap {
        /// First overlapping component.
        first: SectionPart,
        /// Second overlapping component.
        second: SectionPart,
    },
    /// Returned when a section component exceeds the nominal section envelope.
    #[error("{part} of the I-section exceeds the section envelope")]
    SectionOutsideEnvelope {
        /// Offending component.
        part: SectionPart,
    },
}

/// Error returned by the one-shot entry points that validate and build in a single call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildError {
    /// The dimensions were rejected.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The geometry could not be placed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
