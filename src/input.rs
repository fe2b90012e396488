use lacingx::{DimensionInput, DimensionSet, LacingLayout};
use std::error::Error;
use std::fs;
use std::path::Path;

/// Dimensions of the reference member: two 200 mm I-sections, 20 ft long,
/// laced with five 10 mm square bars and closed with end battens.
#[must_use]
pub fn reference_dimensions() -> DimensionInput {
    DimensionInput {
        beam_length: 6096.0,
        beam_spacing: 450.0,
        flange_width: 200.0,
        flange_thickness: 9.0,
        web_thickness: 5.7,
        lacing_width: 10.0,
        lacing_thickness: 10.0,
        lacing_length: None,
        lacing: LacingLayout::Count(5),
        batten_width: 350.0,
        batten_height: 180.0,
        batten_thickness: 10.0,
    }
}

/// Load the dimension set from a JSON file, or fall back to the reference
/// member when no path is given.
///
/// The file holds a flat mapping of camelCase names to millimetre values, the
/// same shape [`DimensionInput`] serialises to.
pub fn load_dimensions(path: Option<&Path>) -> Result<DimensionSet, Box<dyn Error>> {
    match path {
        // Reading the file is the only I/O in the program; everything after
        // this point is a pure function of the parsed values.
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(DimensionSet::from_json(&text)?)
        }
        None => Ok(DimensionSet::new(reference_dimensions())?),
    }
}
