use lacingx::{Assembly, MemberKind, PartKind, StickModel, STEEL_DENSITY};
use std::fmt::Write;

/// Render a textual summary of the assembled member.
///
/// The report lists the positions a fabricator would set out from, followed
/// by a cut list so the numbers can be checked against a drawing such as the
/// typical details at <https://en.wikipedia.org/wiki/Batten_(structural)>.
#[must_use]
pub fn render_summary(assembly: &Assembly, model: &StickModel) -> String {
    let mut output = String::new();
    let dimensions = assembly.dimensions();

    // State the member first so the reader knows what the numbers describe.
    writeln!(
        &mut output,
        "Laced column: {:.1} mm long, beams {:.1} mm apart, {} lacing bars",
        dimensions.beam_length(),
        dimensions.beam_spacing(),
        dimensions.lacing_count()
    )
    .expect("writing to string cannot fail");

    // Offset of the second beam. It equals the clear gap between the webs,
    // which is also the length of every lacing bar.
    if let Some((transform, _)) = assembly.beam(2) {
        writeln!(
            &mut output,
            "Second beam offset: {:.1} mm (lacing length {:.1} mm)",
            transform.translation_vector().x,
            dimensions.lacing_length()
        )
        .expect("writing to string cannot fail");
    }

    // Set-out positions measured from the bottom of the member.
    for (kind, label) in [
        (PartKind::LacingBar, "Lacing bars at"),
        (PartKind::BattenPlate, "Batten plates at"),
    ] {
        let positions: Vec<String> = assembly
            .world_parts()
            .iter()
            .filter(|part| part.kind == kind)
            .map(|part| format!("{:.1}", part.solid.origin().y))
            .collect();
        writeln!(&mut output, "{label}: {} mm", positions.join(", "))
            .expect("writing to string cannot fail");
    }

    // The cut list groups identical pieces, largest dimension first.
    output.push_str("Cut list:\n");
    for item in assembly.cut_list() {
        writeln!(
            &mut output,
            "  {:>2} x {:<13} {:.1} x {:.1} x {:.1} mm",
            item.quantity,
            item.kind.to_string(),
            item.length,
            item.width,
            item.thickness
        )
        .expect("writing to string cannot fail");
    }
    writeln!(
        &mut output,
        "Steel mass: {:.1} kg",
        assembly.steel_mass(STEEL_DENSITY)
    )
    .expect("writing to string cannot fail");

    // Line model size, useful when handing the member to an analysis package.
    writeln!(
        &mut output,
        "Stick model: {} joints, {} chord segments, {} connectors",
        model.joint_count(),
        model.members_of_kind(MemberKind::Chord).len(),
        model.members_of_kind(MemberKind::Lacing).len()
            + model.members_of_kind(MemberKind::Batten).len()
    )
    .expect("writing to string cannot fail");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::reference_dimensions;
    use lacingx::{build, DimensionSet};

    #[test]
    fn formats_human_readable_report() {
        let dimensions = DimensionSet::new(reference_dimensions()).expect("valid");
        let assembly = build(&dimensions).expect("built");
        let model = StickModel::from_assembly(&assembly);
        let report = render_summary(&assembly, &model);
        assert!(report.contains("Laced column: 6096.0 mm long"));
        assert!(report.contains("Second beam offset: 444.3 mm"));
        assert!(report.contains("Lacing bars at: 1016.0, 2032.0, 3048.0, 4064.0, 5080.0 mm"));
        assert!(report.contains("Batten plates at: 0.0, 6086.0 mm"));
        assert!(report.contains(" 5 x lacing bar"));
        assert!(report.contains("Stick model: 18 joints, 16 chord segments, 7 connectors"));
    }
}
