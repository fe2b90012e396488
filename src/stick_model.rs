//! Line idealisation of the built-up member.
//!
//! Each beam becomes a chord along its web centre line, broken at every batten
//! and lacing station, and each connector becomes a member joining the two
//! chords. The model carries geometry only; no loads or stiffness.

use nalgebra::Point3;
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};

use crate::assembly::{Assembly, PartKind};
use crate::dimensions::LENGTH_TOLERANCE;
use crate::geometry::point;

/// Role of a member in the stick model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Segment of a beam between consecutive stations.
    Chord,
    /// Lacing bar between the chords.
    Lacing,
    /// Batten plate between the chords.
    Batten,
}

/// Internal representation of a stick model joint.
#[derive(Clone, Debug)]
struct Joint {
    /// Position in the assembly frame.
    position: Point3<f64>,
}

/// Internal representation of a stick model member.
#[derive(Clone, Debug)]
struct Member {
    /// Role of the member.
    kind: MemberKind,
}

/// Graph of joints on the web centre lines and the members joining them.
///
/// # Examples
/// ```
/// use lacingx::{build, DimensionSet, MemberKind, StickModel};
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
/// let model = StickModel::from_assembly(&build(&dimensions).expect("built"));
/// assert_eq!(model.members_of_kind(MemberKind::Lacing).len(), 5);
/// ```
#[derive(Debug, Default)]
pub struct StickModel {
    /// Underlying graph storage for joints and members.
    graph: Graph<Joint, Member>,
}

impl StickModel {
    /// Idealise an assembly as a line model.
    #[must_use]
    pub fn from_assembly(assembly: &Assembly) -> Self {
        let dimensions = assembly.dimensions();
        let half_depth = dimensions.flange_width() / 2.0;
        let beam_2_offset = assembly
            .beam(2)
            .map_or(0.0, |(transform, _)| transform.translation_vector().x);
        let chord_x = [half_depth, half_depth + beam_2_offset];

        let parts = assembly.world_parts();
        let connector_stations = |kind: PartKind| -> Vec<f64> {
            parts
                .iter()
                .filter(|p| p.kind == kind)
                .map(|p| {
                    let bounds = p.solid.bounding_box();
                    (bounds.min.y + bounds.max.y) / 2.0
                })
                .collect()
        };
        let lacing = connector_stations(PartKind::LacingBar);
        let battens = connector_stations(PartKind::BattenPlate);

        let mut stations: Vec<f64> = [0.0, dimensions.beam_length()]
            .into_iter()
            .chain(lacing.iter().copied())
            .chain(battens.iter().copied())
            .collect();
        stations.sort_by(f64::total_cmp);
        stations.dedup_by(|a, b| (*a - *b).abs() <= LENGTH_TOLERANCE);

        let mut model = Self::default();
        let mut chords: Vec<Vec<NodeIndex>> = Vec::with_capacity(chord_x.len());
        for x in chord_x {
            let joints = stations
                .iter()
                .map(|&y| {
                    model.graph.add_node(Joint {
                        position: point(x, y, half_depth),
                    })
                })
                .collect();
            chords.push(joints);
        }

        for chord in &chords {
            for pair in chord.windows(2) {
                model.add_member(pair[0], pair[1], MemberKind::Chord);
            }
        }
        let station_index = |y: f64| {
            stations
                .iter()
                .position(|s| (s - y).abs() <= LENGTH_TOLERANCE)
        };
        for (kind, positions) in [(MemberKind::Lacing, &lacing), (MemberKind::Batten, &battens)] {
            for &y in positions {
                if let Some(i) = station_index(y) {
                    model.add_member(chords[0][i], chords[1][i], kind);
                }
            }
        }
        model
    }

    /// Connect two joints.
    fn add_member(&mut self, start: NodeIndex, end: NodeIndex, kind: MemberKind) -> EdgeIndex {
        self.graph.add_edge(start, end, Member { kind })
    }

    /// Return the number of joints.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Position of a joint in the assembly frame.
    #[must_use]
    pub fn joint_position(&self, joint: NodeIndex) -> Option<Point3<f64>> {
        self.graph.node_weight(joint).map(|joint| joint.position)
    }

    /// Role of a member.
    #[must_use]
    pub fn member_kind(&self, member: EdgeIndex) -> Option<MemberKind> {
        self.graph.edge_weight(member).map(|member| member.kind)
    }

    /// End positions of a member.
    #[must_use]
    pub fn member_endpoints(&self, member: EdgeIndex) -> Option<(Point3<f64>, Point3<f64>)> {
        let (start, end) = self.graph.edge_endpoints(member)?;
        Some((self.graph[start].position, self.graph[end].position))
    }

    /// Distance between a member's end joints.
    #[must_use]
    pub fn member_length(&self, member: EdgeIndex) -> Option<f64> {
        self.member_endpoints(member)
            .map(|(start, end)| (end - start).norm())
    }

    /// All members with the given role, in insertion order.
    #[must_use]
    pub fn members_of_kind(&self, kind: MemberKind) -> Vec<EdgeIndex> {
        self.graph
            .edge_indices()
            .filter(|&edge| self.graph[edge].kind == kind)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::build;
    use crate::dimensions::{DimensionInput, DimensionSet, LacingLayout};
    use approx::assert_relative_eq;

    fn model() -> StickModel {
        let dimensions = DimensionSet::new(DimensionInput {
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
        .expect("valid dimensions");
        StickModel::from_assembly(&build(&dimensions).expect("built"))
    }

    #[test]
    fn builds_expected_topology() {
        let model = model();
        // Stations: both ends, two batten centres and five lacing centres.
        assert_eq!(model.joint_count(), 2 * 9);
        assert_eq!(model.members_of_kind(MemberKind::Chord).len(), 2 * 8);
        assert_eq!(model.members_of_kind(MemberKind::Lacing).len(), 5);
        assert_eq!(model.members_of_kind(MemberKind::Batten).len(), 2);
        assert_eq!(model.member_count(), 16 + 5 + 2);
    }

    #[test]
    fn connectors_span_the_clear_gap() {
        let model = model();
        for member in model.members_of_kind(MemberKind::Lacing) {
            let length = model.member_length(member).expect("member exists");
            assert_relative_eq!(length, 444.3, epsilon = 1.0e-9);
        }
        let first = model.members_of_kind(MemberKind::Lacing)[0];
        let (start, end) = model.member_endpoints(first).expect("member exists");
        assert_relative_eq!(start.y, 1021.0);
        assert_relative_eq!(end.y, 1021.0);
        assert_relative_eq!(start.z, 100.0);
    }

    #[test]
    fn chords_cover_the_beam_length() {
        let model = model();
        let total: f64 = model
            .members_of_kind(MemberKind::Chord)
            .into_iter()
            .filter_map(|m| model.member_length(m))
            .sum();
        assert_relative_eq!(total, 2.0 * 6096.0, epsilon = 1.0e-6);
    }

    #[test]
    fn unknown_indices_return_none() {
        let model = model();
        assert!(model.joint_position(NodeIndex::new(999)).is_none());
        assert!(model.member_kind(EdgeIndex::new(999)).is_none());
        assert!(model.member_length(EdgeIndex::new(999)).is_none());
    }
}
