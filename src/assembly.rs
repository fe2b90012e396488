//! Hierarchical assembly of the built-up member.

use std::fmt;

use tracing::{debug, info};

use crate::dimensions::DimensionSet;
use crate::errors::{BuildError, GeometryError};
use crate::geometry::{Aabb, Solid};
use crate::placement::{
    connector_frame, place_battens, place_lacing, second_beam_offset, Placement,
};
use crate::primitives::{make_i_beam_section, SectionPart};
use crate::transform::Transform;

/// Density of structural steel in kilograms per cubic millimetre.
pub const STEEL_DENSITY: f64 = 7.85e-6;

/// Name of the root node.
pub const ROOT_NAME: &str = "laced_column";
/// Name of the lacing group node.
pub const LACING_GROUP: &str = "lacing";
/// Name of the batten group node.
pub const BATTEN_GROUP: &str = "battens";

/// Kind of leaf solid in the assembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartKind {
    /// Lower flange of a beam.
    BottomFlange,
    /// Web of a beam.
    Web,
    /// Upper flange of a beam.
    TopFlange,
    /// Lacing bar.
    LacingBar,
    /// Batten plate.
    BattenPlate,
}

impl From<SectionPart> for PartKind {
    fn from(part: SectionPart) -> Self {
        match part {
            SectionPart::BottomFlange => PartKind::BottomFlange,
            SectionPart::Web => PartKind::Web,
            SectionPart::TopFlange => PartKind::TopFlange,
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartKind::BottomFlange => "bottom flange",
            PartKind::Web => "web",
            PartKind::TopFlange => "top flange",
            PartKind::LacingBar => "lacing bar",
            PartKind::BattenPlate => "batten plate",
        };
        f.write_str(name)
    }
}

/// Leaf solid of the assembly tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    /// Name unique among its siblings.
    pub name: String,
    /// What the solid represents.
    pub kind: PartKind,
    /// The box in its own frame.
    pub solid: Solid,
}

/// Child of an [`AssemblyNode`].
#[derive(Clone, Debug, PartialEq)]
pub enum Child {
    /// A nested grouping.
    Node(AssemblyNode),
    /// A leaf solid.
    Part(Part),
}

/// A child together with the transform placing it in its parent's frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment {
    /// Placement in the parent frame.
    pub transform: Transform,
    /// The owned child.
    pub child: Child,
}

/// Named grouping that owns its children.
#[derive(Clone, Debug, PartialEq)]
pub struct AssemblyNode {
    /// Node name.
    name: String,
    /// Owned children in insertion order.
    children: Vec<Attachment>,
}

impl AssemblyNode {
    /// Create an empty node.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node placed by `transform` (builder pattern).
    #[must_use]
    pub fn with_node(mut self, transform: Transform, node: AssemblyNode) -> Self {
        self.children.push(Attachment {
            transform,
            child: Child::Node(node),
        });
        self
    }

    /// Add a leaf solid placed by `transform` (builder pattern).
    #[must_use]
    pub fn with_part(mut self, transform: Transform, part: Part) -> Self {
        self.children.push(Attachment {
            transform,
            child: Child::Part(part),
        });
        self
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Attachment] {
        &self.children
    }

    /// Find a direct child node by name together with its transform.
    #[must_use]
    pub fn child_node(&self, name: &str) -> Option<(&Transform, &AssemblyNode)> {
        self.children.iter().find_map(|a| match &a.child {
            Child::Node(node) if node.name == name => Some((&a.transform, node)),
            _ => None,
        })
    }

    /// Direct leaf parts with their transforms.
    pub fn parts(&self) -> impl Iterator<Item = (&Transform, &Part)> {
        self.children.iter().filter_map(|a| match &a.child {
            Child::Part(part) => Some((&a.transform, part)),
            Child::Node(_) => None,
        })
    }

    /// Number of leaf parts in this subtree.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.children
            .iter()
            .map(|a| match &a.child {
                Child::Node(node) => node.part_count(),
                Child::Part(_) => 1,
            })
            .sum()
    }

    /// Append every leaf of this subtree, positioned by `frame`, to `out`.
    fn collect_world_parts(&self, frame: &Transform, prefix: &str, out: &mut Vec<WorldPart>) {
        let path = format!("{prefix}{}", self.name);
        for attachment in &self.children {
            let placed = attachment.transform.then(frame);
            match &attachment.child {
                Child::Node(node) => node.collect_world_parts(&placed, &format!("{path}/"), out),
                Child::Part(part) => out.push(WorldPart {
                    path: format!("{path}/{}", part.name),
                    kind: part.kind,
                    solid: part.solid.transformed(&placed),
                }),
            }
        }
    }
}

/// A leaf solid resolved into the assembly frame.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldPart {
    /// Slash separated node path, e.g. `laced_column/lacing/lacing_3`.
    pub path: String,
    /// What the solid represents.
    pub kind: PartKind,
    /// The solid in the assembly frame.
    pub solid: Solid,
}

/// One line of the cut list.
#[derive(Clone, Debug, PartialEq)]
pub struct CutListItem {
    /// What the pieces are.
    pub kind: PartKind,
    /// Largest extent in millimetres.
    pub length: f64,
    /// Middle extent in millimetres.
    pub width: f64,
    /// Smallest extent in millimetres.
    pub thickness: f64,
    /// Number of identical pieces.
    pub quantity: usize,
}

impl CutListItem {
    /// Volume of one piece in cubic millimetres.
    #[must_use]
    pub fn unit_volume(&self) -> f64 {
        self.length * self.width * self.thickness
    }
}

/// The finished built-up member.
///
/// The root node holds `beam_1`, `beam_2`, `lacing` and `battens` in that order.
#[derive(Clone, Debug, PartialEq)]
pub struct Assembly {
    /// Root of the tree.
    root: AssemblyNode,
    /// Dimensions the tree was built from.
    dimensions: DimensionSet,
}

impl Assembly {
    /// Root node of the tree.
    #[must_use]
    pub fn root(&self) -> &AssemblyNode {
        &self.root
    }

    /// Dimensions the assembly was built from.
    #[must_use]
    pub fn dimensions(&self) -> &DimensionSet {
        &self.dimensions
    }

    /// Beam subtree `1` or `2` with its placement.
    #[must_use]
    pub fn beam(&self, number: usize) -> Option<(&Transform, &AssemblyNode)> {
        self.root.child_node(&format!("beam_{number}"))
    }

    /// Lacing group with its placement.
    #[must_use]
    pub fn lacing_group(&self) -> Option<(&Transform, &AssemblyNode)> {
        self.root.child_node(LACING_GROUP)
    }

    /// Batten group with its placement.
    #[must_use]
    pub fn batten_group(&self) -> Option<(&Transform, &AssemblyNode)> {
        self.root.child_node(BATTEN_GROUP)
    }

    /// Number of leaf solids.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.root.part_count()
    }

    /// Every leaf solid in the assembly frame, depth first.
    #[must_use]
    pub fn world_parts(&self) -> Vec<WorldPart> {
        let mut parts = Vec::with_capacity(self.part_count());
        self.root
            .collect_world_parts(&Transform::identity(), "", &mut parts);
        parts
    }

    /// Bounds of the whole assembly, or `None` if it holds no parts.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.world_parts()
            .iter()
            .map(|p| p.solid.bounding_box())
            .reduce(|a, b| a.union(&b))
    }

    /// Whether two assemblies hold the same parts at the same places within `epsilon`.
    #[must_use]
    pub fn structurally_equal(&self, other: &Self, epsilon: f64) -> bool {
        let ours = self.world_parts();
        let theirs = other.world_parts();
        ours.len() == theirs.len()
            && ours.iter().zip(&theirs).all(|(a, b)| {
                a.path == b.path && a.kind == b.kind && a.solid.approx_eq(&b.solid, epsilon)
            })
    }

    /// Group identical pieces into a cut list, ordered by kind then size.
    #[must_use]
    pub fn cut_list(&self) -> Vec<CutListItem> {
        let mut items: Vec<CutListItem> = Vec::new();
        for part in self.world_parts() {
            let e = part.solid.extents();
            let mut sizes = [e.x, e.y, e.z];
            sizes.sort_by(|a, b| b.total_cmp(a));
            let [length, width, thickness] = sizes;
            match items.iter_mut().find(|item| {
                item.kind == part.kind
                    && item.length == length
                    && item.width == width
                    && item.thickness == thickness
            }) {
                Some(item) => item.quantity += 1,
                None => items.push(CutListItem {
                    kind: part.kind,
                    length,
                    width,
                    thickness,
                    quantity: 1,
                }),
            }
        }
        items.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| b.length.total_cmp(&a.length))
        });
        items
    }

    /// Total steel volume in cubic millimetres.
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.world_parts().iter().map(|p| p.solid.volume()).sum()
    }

    /// Mass in kilograms for a material `density` in kg/mm³.
    #[must_use]
    pub fn steel_mass(&self, density: f64) -> f64 {
        self.total_volume() * density
    }
}

/// Build the assembly for a validated dimension set.
///
/// The build is a pure function of `dimensions`: calling it twice gives
/// structurally identical trees, and on error no partial assembly is returned.
///
/// # Errors
///
/// Returns [`GeometryError`] when a section, bar or plate cannot be placed.
///
/// # Examples
/// ```
/// use lacingx::{build, DimensionSet};
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
/// let assembly = build(&dimensions).expect("geometry fits");
/// assert_eq!(assembly.part_count(), 2 * 3 + 5 + 2);
/// ```
pub fn build(dimensions: &DimensionSet) -> Result<Assembly, GeometryError> {
    info!(
        beam_length = dimensions.beam_length(),
        lacing_count = dimensions.lacing_count(),
        "Building laced column"
    );

    let beam = beam_node(dimensions)?;
    let offset = second_beam_offset(dimensions)?;
    debug!(offset = offset.x, "Offset second beam");
    let lacing = group_node(LACING_GROUP, "lacing", PartKind::LacingBar, place_lacing(dimensions)?);
    let battens = group_node(
        BATTEN_GROUP,
        "batten",
        PartKind::BattenPlate,
        place_battens(dimensions)?.to_vec(),
    );
    let frame = connector_frame(dimensions);

    let root = AssemblyNode::new(ROOT_NAME)
        .with_node(Transform::identity(), beam.clone())
        .with_node(
            Transform::translation(offset),
            AssemblyNode {
                name: "beam_2".to_owned(),
                ..beam
            },
        )
        .with_node(frame, lacing)
        .with_node(frame, battens);

    let assembly = Assembly {
        root,
        dimensions: dimensions.clone(),
    };
    info!(parts = assembly.part_count(), "Laced column complete");
    Ok(assembly)
}

/// Validate a flat JSON mapping and build it in one call.
///
/// # Errors
///
/// Returns [`BuildError::Configuration`] for rejected dimensions and
/// [`BuildError::Geometry`] when placement fails.
pub fn build_from_json(text: &str) -> Result<Assembly, BuildError> {
    let dimensions = DimensionSet::from_json(text)?;
    Ok(build(&dimensions)?)
}

/// Beam subtree holding the three section plates.
fn beam_node(dimensions: &DimensionSet) -> Result<AssemblyNode, GeometryError> {
    let section = make_i_beam_section(dimensions.beam_length(), dimensions)?;
    Ok(section
        .components()
        .iter()
        .fold(AssemblyNode::new("beam_1"), |node, component| {
            node.with_part(
                component.transform,
                Part {
                    name: component.part.name().to_owned(),
                    kind: component.part.into(),
                    solid: component.solid,
                },
            )
        }))
}

/// Group node with one numbered part per placement, numbered from 1.
fn group_node(name: &str, prefix: &str, kind: PartKind, placements: Vec<Placement>) -> AssemblyNode {
    placements
        .into_iter()
        .fold(AssemblyNode::new(name), |node, placement| {
            node.with_part(
                placement.transform,
                Part {
                    name: format!("{prefix}_{}", placement.index + 1),
                    kind,
                    solid: placement.solid,
                },
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::{DimensionInput, LacingLayout};
    use crate::geometry::vector;
    use approx::assert_relative_eq;

    fn dimensions() -> DimensionSet {
        DimensionSet::new(DimensionInput {
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
        })
        .expect("valid dimensions")
    }

    #[test]
    fn root_holds_four_subtrees_in_order() {
        let assembly = build(&dimensions()).expect("built");
        let names: Vec<&str> = assembly
            .root()
            .children()
            .iter()
            .filter_map(|a| match &a.child {
                Child::Node(node) => Some(node.name()),
                Child::Part(_) => None,
            })
            .collect();
        assert_eq!(names, vec!["beam_1", "beam_2", "lacing", "battens"]);
        assert_eq!(assembly.part_count(), 13);
    }

    #[test]
    fn world_paths_name_every_part() {
        let assembly = build(&dimensions()).expect("built");
        let parts = assembly.world_parts();
        assert_eq!(parts[0].path, "laced_column/beam_1/bottom_flange");
        assert_eq!(parts[4].path, "laced_column/beam_2/web");
        assert_eq!(parts[8].path, "laced_column/lacing/lacing_3");
        assert_eq!(parts[12].path, "laced_column/battens/batten_2");
    }

    #[test]
    fn lacing_meets_both_web_centre_planes() {
        let assembly = build(&dimensions()).expect("built");
        let parts = assembly.world_parts();
        let web_1 = parts[1].solid.bounding_box();
        let web_2 = parts[4].solid.bounding_box();
        let bar = parts
            .iter()
            .find(|p| p.kind == PartKind::LacingBar)
            .expect("lacing present")
            .solid
            .bounding_box();
        assert_relative_eq!(bar.min.x, (web_1.min.x + web_1.max.x) / 2.0, epsilon = 1.0e-9);
        assert_relative_eq!(bar.max.x, (web_2.min.x + web_2.max.x) / 2.0, epsilon = 1.0e-9);
    }

    #[test]
    fn battens_are_centred_between_webs() {
        let assembly = build(&dimensions()).expect("built");
        let parts = assembly.world_parts();
        let web_1 = parts[1].solid.bounding_box();
        let web_2 = parts[4].solid.bounding_box();
        let webs_mid = (web_1.min.x + web_2.max.x) / 2.0;
        for part in parts.iter().filter(|p| p.kind == PartKind::BattenPlate) {
            let bounds = part.solid.bounding_box();
            assert_relative_eq!((bounds.min.x + bounds.max.x) / 2.0, webs_mid, epsilon = 1.0e-9);
        }
    }

    #[test]
    fn cut_list_groups_identical_pieces() {
        let assembly = build(&dimensions()).expect("built");
        let items = assembly.cut_list();
        let quantities: Vec<(PartKind, usize)> =
            items.iter().map(|i| (i.kind, i.quantity)).collect();
        assert_eq!(
            quantities,
            vec![
                (PartKind::BottomFlange, 2),
                (PartKind::Web, 2),
                (PartKind::TopFlange, 2),
                (PartKind::LacingBar, 5),
                (PartKind::BattenPlate, 2),
            ]
        );
        let bar = &items[3];
        assert_relative_eq!(bar.length, 444.3, epsilon = 1.0e-9);
        assert_relative_eq!(bar.unit_volume(), 444.3 * 100.0, epsilon = 1.0e-6);
    }

    #[test]
    fn mass_follows_volume() {
        let assembly = build(&dimensions()).expect("built");
        let expected_volume = 2.0 * 6096.0 * (2.0 * 200.0 * 9.0 + 5.7 * 182.0)
            + 5.0 * 444.3 * 10.0 * 10.0
            + 2.0 * 350.0 * 180.0 * 10.0;
        assert_relative_eq!(assembly.total_volume(), expected_volume, max_relative = 1.0e-12);
        assert_relative_eq!(
            assembly.steel_mass(STEEL_DENSITY),
            expected_volume * STEEL_DENSITY,
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn bounding_box_spans_both_beams() {
        let assembly = build(&dimensions()).expect("built");
        let bounds = assembly.bounding_box().expect("non-empty");
        assert_relative_eq!(bounds.min.coords, vector(0.0, 0.0, 0.0));
        assert_relative_eq!(bounds.max.coords, vector(644.3, 6096.0, 200.0), epsilon = 1.0e-9);
    }

    #[test]
    fn empty_node_has_no_parts() {
        let node = AssemblyNode::new("empty");
        assert_eq!(node.part_count(), 0);
        assert!(node.child_node("anything").is_none());
    }
}
