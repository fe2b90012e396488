#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod assembly;
pub mod dimensions;
pub mod errors;
pub mod geometry;
pub mod placement;
pub mod primitives;
pub mod stick_model;
pub mod transform;

pub use crate::assembly::{
    build, build_from_json, Assembly, AssemblyNode, Attachment, Child, CutListItem, Part,
    PartKind, WorldPart, STEEL_DENSITY,
};
pub use crate::dimensions::{
    DimensionInput, DimensionSet, DimensionSetBuilder, LacingLayout, LENGTH_TOLERANCE,
};
pub use crate::errors::{BuildError, ConfigurationError, GeometryError};
pub use crate::geometry::{point, vector, Aabb, Axis, Solid};
pub use crate::placement::{ElementKind, Placement};
pub use crate::primitives::{
    make_box, make_i_beam_section, make_lacing_solid, make_plate, IBeamSection, SectionPart,
};
pub use crate::stick_model::{MemberKind, StickModel};
pub use crate::transform::{compose, rotate, translate, AxisRotation, Transform};
