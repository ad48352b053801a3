//! UCT tree node representation.
//!
//! Each node represents a position reached by playing a move from the parent.
//! Nodes store visit statistics used for UCB1 selection and for the final
//! most-visited answer.

use engine_core::Side;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the UCT tree.
#[derive(Debug, Clone)]
pub struct UctNode<M> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led to this node from parent (None for root)
    pub mv: Option<M>,

    /// Children in expansion order.
    pub children: Vec<NodeId>,

    /// Number of times this node has been visited
    pub visits: u32,

    /// Sum of results backpropagated through this node, from the point of
    /// view of `mover`. Mean = score / visits. Kept in `f64` so half-point
    /// sums stay exact for any `u32` visit count.
    pub score: f64,

    /// Legal moves not yet expanded into children
    pub untried: Vec<M>,

    /// Side whose move produced this node (mover-of-record).
    pub mover: Side,
}

impl<M: PartialEq> UctNode<M> {
    /// Create a new root node.
    pub fn new_root(untried: Vec<M>, mover: Side) -> Self {
        Self {
            parent: NodeId::NONE,
            mv: None,
            children: Vec::new(),
            visits: 0,
            score: 0.0,
            untried,
            mover,
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, mv: M, untried: Vec<M>, mover: Side) -> Self {
        Self {
            parent,
            mv: Some(mv),
            children: Vec::new(),
            visits: 0,
            score: 0.0,
            untried,
            mover,
        }
    }

    /// Record one more visit carrying `result`, which must already be oriented
    /// to this node's mover.
    #[inline]
    pub fn update(&mut self, result: f32) {
        self.visits += 1;
        self.score += f64::from(result);
    }

    /// Mean result for the mover. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_score(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            (self.score / f64::from(self.visits)) as f32
        }
    }

    /// UCB1 score for child selection.
    ///
    /// `mean + c * sqrt(2 * ln(N_parent) / N)`, or `+inf` when unvisited so
    /// that every child is tried before any is revisited.
    ///
    /// The mean is from this node's mover's perspective, which is the side
    /// choosing among the parent's children. No sign flip is needed.
    ///
    /// Takes pre-computed `ln(parent_visits)` to avoid redundant logarithms
    /// when comparing siblings.
    #[inline]
    pub fn ucb1(&self, parent_visits_ln: f32, exploration: f32) -> f32 {
        if self.visits == 0 {
            return f32::INFINITY;
        }
        let n = self.visits as f32;
        self.mean_score() + exploration * (2.0 * parent_visits_ln / n).sqrt()
    }

    /// Remove `mv` from the untried set by value. Returns whether it was there.
    pub fn take_untried(&mut self, mv: &M) -> bool {
        match self.untried.iter().position(|m| m == mv) {
            Some(pos) => {
                self.untried.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Every legal move has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
