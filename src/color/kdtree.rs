//! Balanced k-d tree over RGB space with insertion-order tie-breaking
//!
//! Nodes live in a flat arena and reference their children by index. Each
//! node remembers the position its color had in the input sequence, so a
//! query can prefer the earliest color among equally distant candidates and
//! agree exactly with a linear scan.

use crate::color::Color;
use crate::color::rgb::CHANNELS;

#[derive(Debug, Clone)]
struct Node {
    color: Color,
    order: usize,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Best candidate seen so far during a query
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: u32,
    order: usize,
    color: Color,
}

impl Candidate {
    const fn beats(&self, other: Option<&Self>) -> bool {
        match other {
            None => true,
            Some(best) => {
                self.distance < best.distance
                    || (self.distance == best.distance && self.order < best.order)
            }
        }
    }
}

/// Static 3-d tree answering nearest-color queries
#[derive(Debug, Clone, Default)]
pub struct KdTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl KdTree {
    /// Build a balanced tree from colors in insertion order
    ///
    /// Each level splits on the median of `(channel, insertion order)` for
    /// the axis cycling red, green, blue with depth.
    pub fn build(colors: &[Color]) -> Self {
        let mut points: Vec<(Color, usize)> = colors
            .iter()
            .enumerate()
            .map(|(order, &color)| (color, order))
            .collect();

        let mut tree = Self {
            nodes: Vec::with_capacity(points.len()),
            root: None,
        };
        tree.root = tree.build_subtree(&mut points, 0);
        tree
    }

    fn build_subtree(&mut self, points: &mut [(Color, usize)], depth: usize) -> Option<usize> {
        if points.is_empty() {
            return None;
        }

        let axis = depth % CHANNELS;
        points.sort_unstable_by_key(|&(color, order)| (color.channel(axis), order));

        let median = points.len() / 2;
        let (below, rest) = points.split_at_mut(median);
        let ((color, order), above) = rest.split_first_mut()?;

        let index = self.nodes.len();
        self.nodes.push(Node {
            color: *color,
            order: *order,
            axis,
            left: None,
            right: None,
        });

        let left = self.build_subtree(below, depth + 1);
        let right = self.build_subtree(above, depth + 1);
        if let Some(node) = self.nodes.get_mut(index) {
            node.left = left;
            node.right = right;
        }

        Some(index)
    }

    /// Number of colors stored in the tree
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no colors
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth of the deepest leaf (0 for an empty tree)
    pub fn depth(&self) -> usize {
        self.subtree_depth(self.root)
    }

    fn subtree_depth(&self, node: Option<usize>) -> usize {
        node.and_then(|index| self.nodes.get(index))
            .map_or(0, |node| {
                1 + self
                    .subtree_depth(node.left)
                    .max(self.subtree_depth(node.right))
            })
    }

    /// Color closest to `query`, or `None` for an empty tree
    ///
    /// Among equally distant colors the one earliest in the build input wins.
    pub fn nearest(&self, query: Color) -> Option<Color> {
        let mut best = None;
        self.search(self.root, query, &mut best);
        best.map(|candidate: Candidate| candidate.color)
    }

    fn search(&self, node: Option<usize>, query: Color, best: &mut Option<Candidate>) {
        let Some(node) = node.and_then(|index| self.nodes.get(index)) else {
            return;
        };

        let candidate = Candidate {
            distance: query.squared_distance(node.color),
            order: node.order,
            color: node.color,
        };
        if candidate.beats(best.as_ref()) {
            *best = Some(candidate);
        }

        let offset = i32::from(query.channel(node.axis)) - i32::from(node.color.channel(node.axis));
        let (near, far) = if offset < 0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.search(near, query, best);

        // Equal distance must still be explored: an earlier color may sit there
        let plane_distance = offset.unsigned_abs().pow(2);
        if best.is_none_or(|current| plane_distance <= current.distance) {
            self.search(far, query, best);
        }
    }
}
