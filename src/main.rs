mod input;
mod report;

use input::load_dimensions;
use lacingx::{build, StickModel};
use report::render_summary;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Log to stderr so the report on stdout stays clean. `RUST_LOG=debug`
    // shows every lacing bar and batten plate as it is placed.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Read the dimensions. A built-up member is two main sections tied together
    // so they act as one; see https://en.wikipedia.org/wiki/Lattice_girder.
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let dimensions = load_dimensions(path.as_deref())?;

    // Build the solid geometry. Validation has already happened, so the only
    // remaining failures are elements that do not fit inside the member.
    let assembly = build(&dimensions)?;

    // Reduce the solids to a line model, the form a frame analysis package
    // expects (https://en.wikipedia.org/wiki/Structural_analysis).
    let model = StickModel::from_assembly(&assembly);

    // Render a human-friendly report and print it for the CLI user.
    let report = render_summary(&assembly, &model);
    println!("{report}");

    Ok(())
}
