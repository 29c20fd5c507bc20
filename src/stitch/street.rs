use glam::{Vec2, Vec3};

use crate::domain::{Category, NodeLookup, Way};
use crate::error::BuildError;
use crate::geometry::lift;

/// A resolved node of a street chain, relative to the bounds center
#[derive(Debug, Clone, PartialEq)]
pub struct StreetNode {
    pub id: u64,
    pub position: Vec3,
    pub category: Category,
    /// Name of the way this node came from
    pub name: String,
}

/// A way resolved into street nodes, waiting in the stitch worklist
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub way_id: u64,
    pub nodes: Vec<StreetNode>,
}

impl Fragment {
    pub fn from_way(
        way: &Way,
        category: Category,
        lookup: &NodeLookup,
        center: Vec2,
    ) -> Result<Self, BuildError> {
        let offset = lift(center, 0.0);
        let nodes = lookup
            .resolve_nodes(way.id, &way.node_refs)?
            .into_iter()
            .map(|node| StreetNode {
                id: node.id,
                position: node.position3() - offset,
                category,
                name: way.name.clone(),
            })
            .collect();

        Ok(Self {
            way_id: way.id,
            nodes,
        })
    }
}

/// A chain of ways joined at shared endpoint nodes
///
/// Consecutive nodes never share an id, and single-node category islands
/// are smoothed away after every merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Street {
    pub nodes: Vec<StreetNode>,
    pub looped: bool,
    /// Ways merged into this street, in merge order
    pub way_ids: Vec<u64>,
}

impl Street {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    /// Try to join `fragment` onto either end of the street
    ///
    /// Endpoint pairs are tried in a fixed order: head/head, head/tail,
    /// tail/head, tail/tail. Returns false if no endpoint is shared.
    pub fn stitch(&mut self, fragment: &Fragment) -> bool {
        let append = &fragment.nodes;
        let (Some(a_head), Some(a_tail)) = (append.first(), append.last()) else {
            return false;
        };

        match (self.nodes.first(), self.nodes.last()) {
            (None, _) | (_, None) => self.nodes = append.clone(),
            (Some(head), _) if head.id == a_head.id => {
                self.nodes.reverse();
                self.nodes.extend(append.iter().cloned());
            }
            (Some(head), _) if head.id == a_tail.id => {
                let mut joined = append.clone();
                joined.append(&mut self.nodes);
                self.nodes = joined;
            }
            (_, Some(tail)) if tail.id == a_head.id => {
                self.nodes.extend(append.iter().cloned());
            }
            (_, Some(tail)) if tail.id == a_tail.id => {
                self.nodes.extend(append.iter().rev().cloned());
            }
            _ => return false,
        }

        self.way_ids.push(fragment.way_id);
        self.cleanup();
        true
    }

    fn cleanup(&mut self) {
        // Keeps the first of each run of equal ids
        self.nodes.dedup_by(|next, prev| next.id == prev.id);
        self.smooth_categories();
        self.looped = self.nodes.len() > 2
            && self.nodes.first().map(|n| n.id) == self.nodes.last().map(|n| n.id);
    }

    /// Reassign nodes whose category differs from both neighbours
    ///
    /// A missing neighbour at either end counts as differing, so an end
    /// node that disagrees with its only neighbour adopts its category.
    /// Runs as a single forward pass over already-updated neighbours.
    fn smooth_categories(&mut self) {
        for i in 0..self.nodes.len() {
            let curr = self.nodes[i].category;
            let prev = i.checked_sub(1).map(|j| self.nodes[j].category);
            let next = self.nodes.get(i + 1).map(|n| n.category);

            if prev.is_none_or(|c| c != curr)
                && next.is_none_or(|c| c != curr)
                && let Some(replacement) = prev.or(next)
            {
                self.nodes[i].category = replacement;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(way_id: u64, ids: &[u64], category: Category) -> Fragment {
        Fragment {
            way_id,
            nodes: ids
                .iter()
                .map(|&id| StreetNode {
                    id,
                    position: Vec3::new(id as f32, 0.0, 0.0),
                    category,
                    name: format!("way {way_id}"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_stitch_into_empty_street() {
        let mut street = Street::default();
        assert!(street.stitch(&fragment(1, &[1, 2, 3], Category::Road)));
        assert_eq!(street.ids(), vec![1, 2, 3]);
        assert!(!street.looped);
    }

    #[test]
    fn test_stitch_endpoint_combinations() {
        // head/head: street reversed, candidate appended
        let mut street = Street::default();
        street.stitch(&fragment(1, &[3, 2, 1], Category::Road));
        assert!(street.stitch(&fragment(2, &[3, 4, 5], Category::Road)));
        assert_eq!(street.ids(), vec![1, 2, 3, 4, 5]);

        // head/tail: candidate prepended
        let mut street = Street::default();
        street.stitch(&fragment(1, &[3, 4, 5], Category::Road));
        assert!(street.stitch(&fragment(2, &[1, 2, 3], Category::Road)));
        assert_eq!(street.ids(), vec![1, 2, 3, 4, 5]);

        // tail/head: candidate appended
        let mut street = Street::default();
        street.stitch(&fragment(1, &[1, 2, 3], Category::Road));
        assert!(street.stitch(&fragment(2, &[3, 4, 5], Category::Road)));
        assert_eq!(street.ids(), vec![1, 2, 3, 4, 5]);

        // tail/tail: candidate reversed and appended
        let mut street = Street::default();
        street.stitch(&fragment(1, &[1, 2, 3], Category::Road));
        assert!(street.stitch(&fragment(2, &[5, 4, 3], Category::Road)));
        assert_eq!(street.ids(), vec![1, 2, 3, 4, 5]);
        assert_eq!(street.way_ids, vec![1, 2]);
    }

    #[test]
    fn test_stitch_rejects_unconnected() {
        let mut street = Street::default();
        street.stitch(&fragment(1, &[1, 2, 3], Category::Road));
        assert!(!street.stitch(&fragment(2, &[4, 5], Category::Road)));
        assert_eq!(street.ids(), vec![1, 2, 3]);
        assert_eq!(street.way_ids, vec![1]);
    }

    #[test]
    fn test_shared_node_not_duplicated() {
        let mut street = Street::default();
        street.stitch(&fragment(1, &[1, 2, 7], Category::Road));
        street.stitch(&fragment(2, &[7, 8, 9], Category::Road));

        let ids = street.ids();
        assert!(ids.windows(2).all(|w| w[0] != w[1]));
        assert_eq!(ids.iter().filter(|&&id| id == 7).count(), 1);
    }

    #[test]
    fn test_smooth_single_island() {
        let mut street = Street::default();
        street.stitch(&fragment(1, &[1, 2], Category::Road));
        street.stitch(&fragment(2, &[2, 3], Category::Footway));
        street.stitch(&fragment(3, &[3, 4, 5], Category::Road));

        // The footway's only unshared node sits alone at the chain end
        let categories: Vec<_> = street.nodes.iter().map(|n| n.category).collect();
        assert_eq!(categories, vec![Category::Road; 5]);
    }

    #[test]
    fn test_smooth_pattern_false_false_true_false_false() {
        let mut street = Street {
            nodes: fragment(1, &[1, 2, 3, 4, 5], Category::Road).nodes,
            ..Default::default()
        };
        street.nodes[2].category = Category::Footway;
        street.cleanup();

        assert!(street.nodes.iter().all(|n| n.category == Category::Road));
    }

    #[test]
    fn test_smooth_keeps_runs() {
        let mut street = Street {
            nodes: fragment(1, &[1, 2, 3, 4, 5, 6], Category::Road).nodes,
            ..Default::default()
        };
        street.nodes[3].category = Category::Footway;
        street.nodes[4].category = Category::Footway;
        street.nodes[5].category = Category::Footway;
        street.cleanup();

        let categories: Vec<_> = street.nodes.iter().map(|n| n.category).collect();
        assert_eq!(categories[..3], [Category::Road; 3]);
        assert_eq!(categories[3..], [Category::Footway; 3]);
    }

    #[test]
    fn test_loop_detection() {
        let mut street = Street::default();
        street.stitch(&fragment(1, &[1, 2, 3], Category::Road));
        street.stitch(&fragment(2, &[3, 4, 1], Category::Road));
        // Head/tail is tried before tail/head, so the second way is prepended
        assert!(street.looped);
        assert_eq!(street.ids(), vec![3, 4, 1, 2, 3]);
    }

    #[test]
    fn test_fragment_from_way() {
        let lookup: NodeLookup = [
            crate::domain::Node::new(1, 110.0, 220.0),
            crate::domain::Node::new(2, 120.0, 240.0),
        ]
        .into_iter()
        .collect();
        let way = Way {
            id: 9,
            name: "Main Street".to_string(),
            node_refs: vec![1, 2],
            height: 0.0,
            flags: Default::default(),
        };

        let frag = Fragment::from_way(&way, Category::Road, &lookup, Vec2::new(100.0, 200.0)).unwrap();
        assert_eq!(frag.nodes[0].position, Vec3::new(10.0, 0.0, 20.0));
        assert_eq!(frag.nodes[1].position, Vec3::new(20.0, 0.0, 40.0));
        assert_eq!(frag.nodes[1].id, 2);
        assert_eq!(frag.nodes[1].name, "Main Street");

        let mut dangling = way.clone();
        dangling.node_refs.push(3);
        assert!(Fragment::from_way(&dangling, Category::Road, &lookup, Vec2::ZERO).is_err());
    }
}
