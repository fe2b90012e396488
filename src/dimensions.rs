//! Validated dimension set for a laced and battened built-up member.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uom::si::f64::Length;
use uom::si::length::millimeter;

use crate::errors::ConfigurationError;

/// Tolerance in millimetres used when comparing derived lengths.
pub const LENGTH_TOLERANCE: f64 = 1.0e-6;

/// How the number of lacing bars is specified.
///
/// In JSON an integer is read as a count and a real number as a maximum pitch,
/// so `5` means five bars while `1016.0` means bars no further than 1016 mm apart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LacingLayout {
    /// Exact number of bars.
    Count(i64),
    /// Largest allowed distance between consecutive bars, in millimetres.
    Spacing(f64),
}

/// Raw, unvalidated dimensions as supplied by a caller or a configuration file.
///
/// Every length is in millimetres. Keys use camelCase when deserialised.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DimensionInput {
    /// Length of each beam.
    pub beam_length: f64,
    /// Spacing between the two beams.
    pub beam_spacing: f64,
    /// Flange width, also the overall section depth.
    pub flange_width: f64,
    /// Flange thickness.
    pub flange_thickness: f64,
    /// Web thickness.
    pub web_thickness: f64,
    /// Lacing bar width along the beams.
    pub lacing_width: f64,
    /// Lacing bar thickness through the section depth.
    pub lacing_thickness: f64,
    /// Lacing bar length; derived from the clear gap when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lacing_length: Option<f64>,
    /// Number of lacing bars or their maximum pitch.
    ///
    /// A JSON integer such as `5` is a bar count. A JSON real such as `5.0` or
    /// `1016.5` is a maximum pitch in millimetres, so `5.0` asks for bars at
    /// most 5 mm apart rather than five bars.
    #[serde(rename = "lacingSpacingOrCount")]
    pub lacing: LacingLayout,
    /// Batten plate width across the beams.
    pub batten_width: f64,
    /// Batten plate height through the section depth.
    pub batten_height: f64,
    /// Batten plate thickness along the beams.
    pub batten_thickness: f64,
}

/// Immutable, validated dimensions for one built-up member.
///
/// # Examples
/// ```
/// use lacingx::DimensionSet;
///
/// let dimensions = DimensionSet::from_json(
///     r#"{
///         "beamLength": 6096, "beamSpacing": 450,
///         "flangeWidth": 200, "flangeThickness": 9, "webThickness": 5.7,
///         "lacingWidth": 10, "lacingThickness": 10, "lacingSpacingOrCount": 5,
///         "battenWidth": 350, "battenHeight": 180, "battenThickness": 10
///     }"#,
/// )
/// .expect("valid dimensions");
/// assert_eq!(dimensions.lacing_count(), 5);
/// assert!((dimensions.lacing_length() - 444.3).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionInput", into = "DimensionInput")]
pub struct DimensionSet {
    /// Length of each beam.
    beam_length: f64,
    /// Spacing between the two beams.
    beam_spacing: f64,
    /// Flange width and section depth.
    flange_width: f64,
    /// Flange thickness.
    flange_thickness: f64,
    /// Web thickness.
    web_thickness: f64,
    /// Lacing bar width.
    lacing_width: f64,
    /// Lacing bar thickness.
    lacing_thickness: f64,
    /// Lacing bar length, equal to the clear gap.
    lacing_length: f64,
    /// Resolved number of lacing bars.
    lacing_count: usize,
    /// Layout as originally requested.
    lacing_layout: LacingLayout,
    /// Whether the lacing length was given explicitly.
    explicit_lacing_length: bool,
    /// Batten plate width.
    batten_width: f64,
    /// Batten plate height.
    batten_height: f64,
    /// Batten plate thickness.
    batten_thickness: f64,
}

impl DimensionSet {
    /// Validate raw dimensions.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found, checking positivity of every
    /// length, the lacing layout and its density against the bar width, the web
    /// height, the clear gap and its room for the flanges, the lacing length and
    /// finally the batten width.
    pub fn new(input: DimensionInput) -> Result<Self, ConfigurationError> {
        let lengths = [
            ("beamLength", input.beam_length),
            ("beamSpacing", input.beam_spacing),
            ("flangeWidth", input.flange_width),
            ("flangeThickness", input.flange_thickness),
            ("webThickness", input.web_thickness),
            ("lacingWidth", input.lacing_width),
            ("lacingThickness", input.lacing_thickness),
            ("battenWidth", input.batten_width),
            ("battenHeight", input.batten_height),
            ("battenThickness", input.batten_thickness),
        ];
        for (parameter, value) in lengths {
            require_positive(parameter, value)?;
        }
        if let Some(length) = input.lacing_length {
            require_positive("lacingLength", length)?;
        }

        let lacing_count = resolve_lacing_count(input.beam_length, input.lacing)?;
        // Bars may touch but not overlap, which also bounds the count.
        let pitch = input.beam_length / (lacing_count as f64 + 1.0);
        if input.lacing_width > pitch + LENGTH_TOLERANCE {
            return Err(ConfigurationError::LacingTooDense {
                count: lacing_count,
                pitch,
                lacing_width: input.lacing_width,
            });
        }

        if input.flange_width <= 2.0 * input.flange_thickness {
            return Err(ConfigurationError::NoWebHeight {
                flange_width: input.flange_width,
                flange_thickness: input.flange_thickness,
            });
        }
        if input.beam_spacing <= input.web_thickness {
            return Err(ConfigurationError::NoClearGap {
                beam_spacing: input.beam_spacing,
                web_thickness: input.web_thickness,
            });
        }

        let clear_gap = input.beam_spacing - input.web_thickness;
        if clear_gap < input.flange_width - LENGTH_TOLERANCE {
            return Err(ConfigurationError::BeamsOverlap {
                clear_gap,
                flange_width: input.flange_width,
            });
        }
        let lacing_length = match input.lacing_length {
            Some(length) if (length - clear_gap).abs() > LENGTH_TOLERANCE => {
                return Err(ConfigurationError::LacingLengthMismatch {
                    lacing_length: length,
                    clear_gap,
                });
            }
            _ => clear_gap,
        };

        if input.batten_width > input.beam_spacing {
            return Err(ConfigurationError::BattenWiderThanSpacing {
                batten_width: input.batten_width,
                beam_spacing: input.beam_spacing,
            });
        }

        debug!(lacing_count, lacing_length, "Validated dimension set");

        Ok(Self {
            beam_length: input.beam_length,
            beam_spacing: input.beam_spacing,
            flange_width: input.flange_width,
            flange_thickness: input.flange_thickness,
            web_thickness: input.web_thickness,
            lacing_width: input.lacing_width,
            lacing_thickness: input.lacing_thickness,
            lacing_length,
            lacing_count,
            lacing_layout: input.lacing,
            explicit_lacing_length: input.lacing_length.is_some(),
            batten_width: input.batten_width,
            batten_height: input.batten_height,
            batten_thickness: input.batten_thickness,
        })
    }

    /// Parse a flat JSON mapping and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidInput`] when the text is not a valid
    /// mapping, or any validation error from [`DimensionSet::new`].
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        let input: DimensionInput =
            serde_json::from_str(text).map_err(|e| ConfigurationError::InvalidInput {
                reason: e.to_string(),
            })?;
        Self::new(input)
    }

    /// Start building a dimension set from unit-typed lengths.
    #[must_use]
    pub fn builder() -> DimensionSetBuilder {
        DimensionSetBuilder::default()
    }

    /// Length of each beam.
    #[must_use]
    pub fn beam_length(&self) -> f64 {
        self.beam_length
    }

    /// Spacing between the beams.
    #[must_use]
    pub fn beam_spacing(&self) -> f64 {
        self.beam_spacing
    }

    /// Flange width, which is also the section depth.
    #[must_use]
    pub fn flange_width(&self) -> f64 {
        self.flange_width
    }

    /// Flange thickness.
    #[must_use]
    pub fn flange_thickness(&self) -> f64 {
        self.flange_thickness
    }

    /// Web thickness.
    #[must_use]
    pub fn web_thickness(&self) -> f64 {
        self.web_thickness
    }

    /// Clear height of the web between the flanges.
    #[must_use]
    pub fn web_height(&self) -> f64 {
        self.flange_width - 2.0 * self.flange_thickness
    }

    /// Distance between the facing webs, `beam_spacing - web_thickness`.
    #[must_use]
    pub fn clear_gap(&self) -> f64 {
        self.beam_spacing - self.web_thickness
    }

    /// Lacing bar width along the beams.
    #[must_use]
    pub fn lacing_width(&self) -> f64 {
        self.lacing_width
    }

    /// Lacing bar thickness through the section depth.
    #[must_use]
    pub fn lacing_thickness(&self) -> f64 {
        self.lacing_thickness
    }

    /// Lacing bar length.
    #[must_use]
    pub fn lacing_length(&self) -> f64 {
        self.lacing_length
    }

    /// Number of lacing bars.
    #[must_use]
    pub fn lacing_count(&self) -> usize {
        self.lacing_count
    }

    /// Uniform distance between lacing stations, `beam_length / (count + 1)`.
    #[must_use]
    pub fn lacing_pitch(&self) -> f64 {
        self.beam_length / (self.lacing_count as f64 + 1.0)
    }

    /// Batten plate width.
    #[must_use]
    pub fn batten_width(&self) -> f64 {
        self.batten_width
    }

    /// Batten plate height.
    #[must_use]
    pub fn batten_height(&self) -> f64 {
        self.batten_height
    }

    /// Batten plate thickness.
    #[must_use]
    pub fn batten_thickness(&self) -> f64 {
        self.batten_thickness
    }
}

impl TryFrom<DimensionInput> for DimensionSet {
    type Error = ConfigurationError;

    fn try_from(input: DimensionInput) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

impl From<DimensionSet> for DimensionInput {
    fn from(set: DimensionSet) -> Self {
        Self {
            beam_length: set.beam_length,
            beam_spacing: set.beam_spacing,
            flange_width: set.flange_width,
            flange_thickness: set.flange_thickness,
            web_thickness: set.web_thickness,
            lacing_width: set.lacing_width,
            lacing_thickness: set.lacing_thickness,
            lacing_length: set.explicit_lacing_length.then_some(set.lacing_length),
            lacing: set.lacing_layout,
            batten_width: set.batten_width,
            batten_height: set.batten_height,
            batten_thickness: set.batten_thickness,
        }
    }
}

/// Reject zero, negative and non-finite lengths.
fn require_positive(parameter: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { parameter, value })
    }
}

/// Turn a count or a maximum pitch into a bar count of at least one.
fn resolve_lacing_count(beam_length: f64, layout: LacingLayout) -> Result<usize, ConfigurationError> {
    let count = match layout {
        LacingLayout::Count(count) => count,
        LacingLayout::Spacing(pitch) => {
            require_positive("lacingSpacingOrCount", pitch)?;
            // Smallest count whose uniform pitch does not exceed the requested one.
            let bays = (beam_length / pitch - LENGTH_TOLERANCE).ceil();
            let count = bays as i64 - 1;
            debug!(pitch, count, "Derived lacing count from maximum pitch");
            count
        }
    };
    usize::try_from(count)
        .ok()
        .filter(|&n| n >= 1)
        .ok_or(ConfigurationError::NonPositiveLacingCount { count })
}

/// Builder for [`DimensionSet`] taking lengths in any unit.
///
/// # Examples
/// ```
/// use lacingx::DimensionSet;
/// use uom::si::f64::Length;
/// use uom::si::length::{foot, millimeter};
///
/// let mm = |value: f64| Length::new::<millimeter>(value);
/// let dimensions = DimensionSet::builder()
///     .beam_length(Length::new::<foot>(20.0))
///     .beam_spacing(mm(450.0))
///     .flange_width(mm(200.0))
///     .flange_thickness(mm(9.0))
///     .web_thickness(mm(5.7))
///     .lacing_width(mm(10.0))
///     .lacing_thickness(mm(10.0))
///     .lacing_count(5)
///     .batten_width(mm(350.0))
///     .batten_height(mm(180.0))
///     .batten_thickness(mm(10.0))
///     .build()
///     .expect("valid dimensions");
/// assert!((dimensions.beam_length() - 6096.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DimensionSetBuilder {
    /// Beam length in millimetres.
    beam_length: Option<f64>,
    /// Beam spacing in millimetres.
    beam_spacing: Option<f64>,
    /// Flange width in millimetres.
    flange_width: Option<f64>,
    /// Flange thickness in millimetres.
    flange_thickness: Option<f64>,
    /// Web thickness in millimetres.
    web_thickness: Option<f64>,
    /// Lacing bar width in millimetres.
    lacing_width: Option<f64>,
    /// Lacing bar thickness in millimetres.
    lacing_thickness: Option<f64>,
    /// Explicit lacing bar length in millimetres.
    lacing_length: Option<f64>,
    /// Requested lacing layout.
    lacing: Option<LacingLayout>,
    /// Batten plate width in millimetres.
    batten_width: Option<f64>,
    /// Batten plate height in millimetres.
    batten_height: Option<f64>,
    /// Batten plate thickness in millimetres.
    batten_thickness: Option<f64>,
}

impl DimensionSetBuilder {
    /// Set the beam length.
    #[must_use]
    pub fn beam_length(mut self, value: Length) -> Self {
        self.beam_length = Some(value.get::<millimeter>());
        self
    }

    /// Set the beam spacing.
    #[must_use]
    pub fn beam_spacing(mut self, value: Length) -> Self {
        self.beam_spacing = Some(value.get::<millimeter>());
        self
    }

    /// Set the flange width.
    #[must_use]
    pub fn flange_width(mut self, value: Length) -> Self {
        self.flange_width = Some(value.get::<millimeter>());
        self
    }

    /// Set the flange thickness.
    #[must_use]
    pub fn flange_thickness(mut self, value: Length) -> Self {
        self.flange_thickness = Some(value.get::<millimeter>());
        self
    }

    /// Set the web thickness.
    #[must_use]
    pub fn web_thickness(mut self, value: Length) -> Self {
        self.web_thickness = Some(value.get::<millimeter>());
        self
    }

    /// Set the lacing bar width.
    #[must_use]
    pub fn lacing_width(mut self, value: Length) -> Self {
        self.lacing_width = Some(value.get::<millimeter>());
        self
    }

    /// Set the lacing bar thickness.
    #[must_use]
    pub fn lacing_thickness(mut self, value: Length) -> Self {
        self.lacing_thickness = Some(value.get::<millimeter>());
        self
    }

    /// Set an explicit lacing bar length, checked against the clear gap.
    #[must_use]
    pub fn lacing_length(mut self, value: Length) -> Self {
        self.lacing_length = Some(value.get::<millimeter>());
        self
    }

    /// Request an exact number of lacing bars.
    #[must_use]
    pub fn lacing_count(mut self, count: i64) -> Self {
        self.lacing = Some(LacingLayout::Count(count));
        self
    }

    /// Request lacing bars no further apart than `value`.
    #[must_use]
    pub fn lacing_spacing(mut self, value: Length) -> Self {
        self.lacing = Some(LacingLayout::Spacing(value.get::<millimeter>()));
        self
    }

    /// Set the batten plate width.
    #[must_use]
    pub fn batten_width(mut self, value: Length) -> Self {
        self.batten_width = Some(value.get::<millimeter>());
        self
    }

    /// Set the batten plate height.
    #[must_use]
    pub fn batten_height(mut self, value: Length) -> Self {
        self.batten_height = Some(value.get::<millimeter>());
        self
    }

    /// Set the batten plate thickness.
    #[must_use]
    pub fn batten_thickness(mut self, value: Length) -> Self {
        self.batten_thickness = Some(value.get::<millimeter>());
        self
    }

    /// Validate and produce the dimension set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingParameter`] for the first unset value,
    /// or any validation error from [`DimensionSet::new`].
    pub fn build(self) -> Result<DimensionSet, ConfigurationError> {
        fn required<T>(value: Option<T>, parameter: &'static str) -> Result<T, ConfigurationError> {
            value.ok_or(ConfigurationError::MissingParameter(parameter))
        }

        DimensionSet::new(DimensionInput {
            beam_length: required(self.beam_length, "beamLength")?,
            beam_spacing: required(self.beam_spacing, "beamSpacing")?,
            flange_width: required(self.flange_width, "flangeWidth")?,
            flange_thickness: required(self.flange_thickness, "flangeThickness")?,
            web_thickness: required(self.web_thickness, "webThickness")?,
            lacing_width: required(self.lacing_width, "lacingWidth")?,
            lacing_thickness: required(self.lacing_thickness, "lacingThickness")?,
            lacing_length: self.lacing_length,
            lacing: required(self.lacing, "lacingSpacingOrCount")?,
            batten_width: required(self.batten_width, "battenWidth")?,
            batten_height: required(self.batten_height, "battenHeight")?,
            batten_thickness: required(self.batten_thickness, "battenThickness")?,
        })
    }
}
