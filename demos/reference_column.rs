use lacingx::{build, DimensionSet, PartKind, STEEL_DENSITY};
use uom::si::f64::Length;
use uom::si::length::{foot, millimeter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mm = |value: f64| Length::new::<millimeter>(value);
    let dimensions = DimensionSet::builder()
        .beam_length(Length::new::<foot>(20.0))
        .beam_spacing(mm(450.0))
        .flange_width(mm(200.0))
        .flange_thickness(mm(9.0))
        .web_thickness(mm(5.7))
        .lacing_width(mm(10.0))
        .lacing_thickness(mm(10.0))
        .lacing_spacing(mm(1100.0))
        .batten_width(mm(350.0))
        .batten_height(mm(180.0))
        .batten_thickness(mm(10.0))
        .build()?;

    let assembly = build(&dimensions)?;

    for part in assembly.world_parts() {
        if part.kind == PartKind::LacingBar {
            let origin = part.solid.origin();
            println!("{} at y = {:.1} mm", part.path, origin.y);
        }
    }
    println!("mass = {:.1} kg", assembly.steel_mass(STEEL_DENSITY));

    Ok(())
}
