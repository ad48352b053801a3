//! UCT tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. A node's only link upward is its
//! parent's index, so the tree has no ownership cycles.

use std::fmt::{Debug, Write};

use engine_core::Side;

use crate::node::{NodeId, UctNode};

/// Summary statistics about a built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total nodes allocated, root included
    pub nodes: usize,
    /// Deepest node's distance from the root
    pub max_depth: usize,
    /// Visits recorded at the root
    pub root_visits: u32,
}

/// UCT tree with arena-based node storage.
#[derive(Debug)]
pub struct UctTree<M> {
    /// Arena storing all nodes
    nodes: Vec<UctNode<M>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<M: Clone + PartialEq + Debug> UctTree<M> {
    /// Create a new tree whose root has `untried` moves and was produced by
    /// `mover`.
    pub fn new(untried: Vec<M>, mover: Side) -> Self {
        Self {
            nodes: vec![UctNode::new_root(untried, mover)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &UctNode<M> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut UctNode<M> {
        &mut self.nodes[id.index()]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[UctNode<M>] {
        &self.nodes
    }

    /// Select the child of `node_id` with the highest UCB1 score.
    /// Returns None if the node has no children.
    pub fn select_child(&self, node_id: NodeId, exploration: f32) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let parent_visits_ln = (node.visits.max(1) as f32).ln();

        node.children.iter().copied().max_by(|a, b| {
            let score_a = self.get(*a).ucb1(parent_visits_ln, exploration);
            let score_b = self.get(*b).ucb1(parent_visits_ln, exploration);
            score_a.total_cmp(&score_b)
        })
    }

    /// Add a child for `mv` under `parent_id`, removing `mv` from the
    /// parent's untried moves by value.
    /// Returns the new child's NodeId.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        mv: M,
        untried: Vec<M>,
        mover: Side,
    ) -> NodeId {
        let parent = self.get_mut(parent_id);
        let was_untried = parent.take_untried(&mv);
        debug_assert!(was_untried, "expanded move {mv:?} was not untried at its parent");

        let child_id = NodeId(self.nodes.len() as u32);
        self.get_mut(parent_id).children.push(child_id);
        self.nodes
            .push(UctNode::new_child(parent_id, mv, untried, mover));
        child_id
    }

    /// Backpropagate a finished rollout from `leaf_id` to the root.
    ///
    /// `result_for` maps a side to the terminal result from that side's point
    /// of view; each node is credited with the result for its own mover.
    pub fn backpropagate(&mut self, leaf_id: NodeId, result_for: impl Fn(Side) -> f32) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            let result = result_for(node.mover);
            node.update(result);
            current_id = node.parent;
        }
    }

    /// Node IDs from `node_id` up to and including the root.
    pub fn path_to_root(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = node_id;
        while current.is_some() {
            path.push(current);
            current = self.get(current).parent;
        }
        path
    }

    /// Distance from the root.
    pub fn depth(&self, node_id: NodeId) -> usize {
        self.path_to_root(node_id).len() - 1
    }

    /// Get the most visited root child.
    /// Returns (move, visits) or None if root has no children.
    /// Ties go to the child expanded last.
    pub fn best_move(&self) -> Option<(&M, u32)> {
        self.get(self.root)
            .children
            .iter()
            .map(|id| self.get(*id))
            .max_by_key(|child| child.visits)
            .and_then(|child| child.mv.as_ref().map(|mv| (mv, child.visits)))
    }

    /// (move, visits, mean score) for every root child, in expansion order.
    pub fn children_summary(&self) -> Vec<(M, u32, f32)> {
        self.get(self.root)
            .children
            .iter()
            .map(|id| self.get(*id))
            .filter_map(|child| {
                child
                    .mv
                    .clone()
                    .map(|mv| (mv, child.visits, child.mean_score()))
            })
            .collect()
    }

    /// Compute statistics over the whole arena.
    pub fn stats(&self) -> TreeStats {
        let mut depths = vec![0usize; self.nodes.len()];
        // Children are always allocated after their parent.
        for (idx, node) in self.nodes.iter().enumerate().skip(1) {
            depths[idx] = depths[node.parent.index()] + 1;
        }
        TreeStats {
            nodes: self.nodes.len(),
            max_depth: depths.iter().copied().max().unwrap_or(0),
            root_visits: self.get(self.root).visits,
        }
    }

    /// Render the tree as indented text, one node per line, down to
    /// `max_depth` levels below the root.
    pub fn render(&self, max_depth: usize) -> String {
        let mut out = String::new();
        self.render_node(self.root, 0, max_depth, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, indent: usize, max_depth: usize, out: &mut String) {
        let node = self.get(id);
        for _ in 0..indent {
            out.push_str("| ");
        }
        let mv = node
            .mv
            .as_ref()
            .map(|m| format!("{m:?}"))
            .unwrap_or_else(|| "root".to_string());
        let _ = writeln!(
            out,
            "[M:{} by {} W/V:{:.1}/{} U:{:?}]",
            mv, node.mover, node.score, node.visits, node.untried
        );
        if indent < max_depth {
            for &child in &node.children {
                self.render_node(child, indent + 1, max_depth, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_child_tree() -> (UctTree<u8>, NodeId, NodeId) {
        let mut tree = UctTree::new(vec![0, 1], Side::Blue);
        let root = tree.root();
        let a = tree.add_child(root, 0, vec![5], Side::Red);
        let b = tree.add_child(root, 1, vec![5], Side::Red);
        (tree, a, b)
    }

    #[test]
    fn test_tree_creation() {
        let tree: UctTree<u8> = UctTree::new(vec![1, 2, 3], Side::Red);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId(0));
        assert!(tree.get(tree.root()).is_root());
    }

    #[test]
    fn test_add_child_links_and_consumes_untried() {
        let (tree, a, b) = two_child_tree();
        let root = tree.get(tree.root());

        assert_eq!(tree.len(), 3);
        assert_eq!(root.children, vec![a, b]);
        assert!(root.is_fully_expanded());
        assert_eq!(tree.get(a).parent, tree.root());
        assert_eq!(tree.get(a).mv, Some(0));
        assert_eq!(tree.get(b).mv, Some(1));
    }

    #[test]
    fn test_select_child_prefers_unvisited() {
        let (mut tree, a, b) = two_child_tree();
        tree.get_mut(tree.root()).visits = 5;
        tree.get_mut(a).visits = 4;
        tree.get_mut(a).score = 4.0;

        assert_eq!(tree.select_child(tree.root(), 1.0), Some(b));
    }

    #[test]
    fn test_select_child_exploits_with_zero_exploration() {
        let (mut tree, a, b) = two_child_tree();
        tree.get_mut(tree.root()).visits = 20;
        tree.get_mut(a).visits = 10;
        tree.get_mut(a).score = 3.0;
        tree.get_mut(b).visits = 10;
        tree.get_mut(b).score = 7.0;

        assert_eq!(tree.select_child(tree.root(), 0.0), Some(b));
    }

    #[test]
    fn test_select_child_explores_rarely_visited() {
        let (mut tree, a, b) = two_child_tree();
        tree.get_mut(tree.root()).visits = 101;
        // a looks better but has far more visits
        tree.get_mut(a).visits = 99;
        tree.get_mut(a).score = 60.0;
        tree.get_mut(b).visits = 2;
        tree.get_mut(b).score = 0.5;

        assert_eq!(tree.select_child(tree.root(), 1.0), Some(b));
    }

    #[test]
    fn test_backpropagate_orients_result_per_mover() {
        let mut tree = UctTree::new(vec![0], Side::Blue);
        let root = tree.root();
        let red_node = tree.add_child(root, 0, vec![1], Side::Red);
        let blue_node = tree.add_child(red_node, 1, vec![], Side::Blue);

        // Red won the rollout
        tree.backpropagate(blue_node, |side| if side == Side::Red { 1.0 } else { 0.0 });

        assert_eq!(tree.get(blue_node).visits, 1);
        assert!(tree.get(blue_node).score.abs() < 1e-6);
        assert_eq!(tree.get(red_node).visits, 1);
        assert!((tree.get(red_node).score - 1.0).abs() < 1e-6);
        assert_eq!(tree.get(root).visits, 1);
        assert!(tree.get(root).score.abs() < 1e-6);
    }

    #[test]
    fn test_backpropagate_draw_credits_half() {
        let (mut tree, a, _) = two_child_tree();
        tree.backpropagate(a, |_| 0.5);
        assert!((tree.get(a).score - 0.5).abs() < 1e-6);
        assert!((tree.get(tree.root()).score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_best_move_by_visits_not_mean() {
        let (mut tree, a, b) = two_child_tree();
        tree.get_mut(a).visits = 30;
        tree.get_mut(a).score = 12.0;
        tree.get_mut(b).visits = 3;
        tree.get_mut(b).score = 3.0;

        assert_eq!(tree.best_move(), Some((&0, 30)));
    }

    #[test]
    fn test_best_move_empty_root() {
        let tree: UctTree<u8> = UctTree::new(vec![1], Side::Red);
        assert!(tree.best_move().is_none());
        assert!(tree.children_summary().is_empty());
    }

    #[test]
    fn test_path_depth_and_stats() {
        let mut tree = UctTree::new(vec![0, 1], Side::Blue);
        let root = tree.root();
        let a = tree.add_child(root, 0, vec![2], Side::Red);
        let aa = tree.add_child(a, 2, vec![], Side::Blue);
        tree.add_child(root, 1, vec![], Side::Red);
        tree.backpropagate(aa, |_| 1.0);

        assert_eq!(tree.path_to_root(aa), vec![aa, a, root]);
        assert_eq!(tree.depth(aa), 2);
        assert_eq!(tree.depth(root), 0);

        let stats = tree.stats();
        assert_eq!(stats.nodes, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.root_visits, 1);
    }

    #[test]
    fn test_render_respects_depth() {
        let mut tree = UctTree::new(vec![0], Side::Blue);
        let root = tree.root();
        let a = tree.add_child(root, 0, vec![9], Side::Red);
        tree.add_child(a, 9, vec![], Side::Blue);

        let shallow = tree.render(1);
        assert_eq!(shallow.lines().count(), 2);
        assert!(shallow.starts_with("[M:root by blue"));
        assert!(shallow.contains("| [M:0 by red"));

        let deep = tree.render(5);
        assert_eq!(deep.lines().count(), 3);
        assert!(deep.contains("| | [M:9 by blue"));
    }
}
