//! Property-based tests for assembling laced columns.
//!
//! These tests generate random dimension sets that satisfy every validation
//! rule and check the invariants of the resulting assembly.
//!
//! Run with: cargo test --test proptest_assembly

use lacingx::{
    build, make_i_beam_section, DimensionInput, DimensionSet, LacingLayout, PartKind, WorldPart,
    LENGTH_TOLERANCE,
};
use proptest::prelude::*;

// =============================================================================
// Strategies for generating dimension sets
// =============================================================================

/// Generate dimensions whose elements all fit inside the member without clashing.
///
/// The beams are spaced at least a flange width apart, bars and plates are no
/// deeper than the web clear height, plates fit between the webs, and a bar
/// plus a batten plate always fits in the smallest pitch.
fn arb_dimensions() -> impl Strategy<Value = DimensionInput> {
    (
        (1000.0..10_000.0f64, 1i64..=20, 1.0..20.0f64, 0.1..1.0f64),
        (0.0..400.0f64, 2.0..20.0f64),
        (100.0..400.0f64, 2.0..40.0f64),
        (0.2..1.0f64, 0.2..1.0f64, 1.0..20.0f64),
    )
        .prop_map(
            |(
                (beam_length, count, lacing_width, thickness_fraction),
                (gap, web_thickness),
                (flange_width, flange_thickness),
                (batten_fraction, height_fraction, batten_thickness),
            )| {
                let web_height = flange_width - 2.0 * flange_thickness;
                let beam_spacing = flange_width + web_thickness + gap;
                DimensionInput {
                    beam_length,
                    beam_spacing,
                    flange_width,
                    flange_thickness,
                    web_thickness,
                    lacing_width,
                    lacing_thickness: web_height * thickness_fraction,
                    lacing_length: None,
                    lacing: LacingLayout::Count(count),
                    batten_width: (beam_spacing - 2.0 * web_thickness) * batten_fraction,
                    batten_height: web_height * height_fraction,
                    batten_thickness,
                }
            },
        )
}

/// Whether two parts are a lacing bar and the web it ends on.
fn is_bar_on_web(a: &WorldPart, b: &WorldPart) -> bool {
    let kinds = [a.kind, b.kind];
    kinds.contains(&PartKind::LacingBar) && kinds.contains(&PartKind::Web)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Building is a pure function of the dimensions.
    #[test]
    fn build_is_deterministic(input in arb_dimensions()) {
        let dimensions = DimensionSet::new(input).expect("generated dimensions validate");
        let first = build(&dimensions).expect("first build");
        let second = build(&dimensions).expect("second build");
        prop_assert!(first.structurally_equal(&second, 0.0));
    }

    /// Bars are evenly spaced, strictly increasing and inside the beam length.
    #[test]
    fn lacing_stations_are_ordered(input in arb_dimensions()) {
        let dimensions = DimensionSet::new(input).expect("generated dimensions validate");
        let assembly = build(&dimensions).expect("assembly builds");
        let stations: Vec<f64> = assembly
            .world_parts()
            .iter()
            .filter(|part| part.kind == PartKind::LacingBar)
            .map(|part| part.solid.origin().y)
            .collect();

        prop_assert_eq!(stations.len(), dimensions.lacing_count());
        prop_assert!(stations.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(stations.iter().all(|&y| y > 0.0 && y < dimensions.beam_length()));
        for (i, &y) in stations.iter().enumerate() {
            let expected = (i + 1) as f64 * dimensions.lacing_pitch();
            prop_assert!((y - expected).abs() <= LENGTH_TOLERANCE);
        }
    }

    /// Flanges and web meet only on shared faces.
    #[test]
    fn section_never_self_intersects(input in arb_dimensions()) {
        let dimensions = DimensionSet::new(input).expect("generated dimensions validate");
        let section = make_i_beam_section(dimensions.beam_length(), &dimensions)
            .expect("section builds");
        prop_assert!(section.check(LENGTH_TOLERANCE).is_ok());
    }

    /// Bars run exactly from one web centre plane to the other.
    #[test]
    fn lacing_spans_the_clear_gap(input in arb_dimensions()) {
        let dimensions = DimensionSet::new(input).expect("generated dimensions validate");
        let assembly = build(&dimensions).expect("assembly builds");
        let (offset, _) = assembly.beam(2).expect("second beam present");

        prop_assert!(
            (offset.translation_vector().x - dimensions.lacing_length()).abs() <= LENGTH_TOLERANCE
        );
        for bar in assembly
            .world_parts()
            .iter()
            .filter(|part| part.kind == PartKind::LacingBar)
        {
            prop_assert!((bar.solid.extents().x - dimensions.clear_gap()).abs() <= LENGTH_TOLERANCE);
        }
    }

    /// Plates stay between the outer faces of the two beams.
    #[test]
    fn battens_stay_inside_the_member(input in arb_dimensions()) {
        let dimensions = DimensionSet::new(input).expect("generated dimensions validate");
        let assembly = build(&dimensions).expect("assembly builds");
        let bounds = assembly.bounding_box().expect("non-empty assembly");
        let web_face = (dimensions.flange_width() - dimensions.web_thickness()) / 2.0;

        for plate in assembly
            .world_parts()
            .iter()
            .filter(|part| part.kind == PartKind::BattenPlate)
        {
            let plate_bounds = plate.solid.bounding_box();
            prop_assert!(plate_bounds.min.x >= web_face - LENGTH_TOLERANCE);
            prop_assert!(bounds.contains(&plate_bounds, LENGTH_TOLERANCE));
        }
    }

    /// Only the lacing bars touch other parts with volume, and only the webs.
    #[test]
    fn solids_never_clash(input in arb_dimensions()) {
        let dimensions = DimensionSet::new(input).expect("generated dimensions validate");
        let parts = build(&dimensions).expect("assembly builds").world_parts();
        for (i, a) in parts.iter().enumerate() {
            for b in &parts[i + 1..] {
                if is_bar_on_web(a, b) {
                    continue;
                }
                let depth = a.solid.bounding_box().penetration_depth(&b.solid.bounding_box());
                prop_assert!(
                    depth <= LENGTH_TOLERANCE,
                    "{} and {} interpenetrate by {}",
                    a.path,
                    b.path,
                    depth
                );
            }
        }
    }
}
