use cosmwasm_std::Uint256;

use crate::hash::{branch_hash, encode_boundary, leaf_hash, Hash};

/// Caller-supplied leaf input.
///
/// Elements are expected in strictly increasing `boundary` order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Digest of the chunk content, opaque to the tree.
    pub chunk_hash: Hash,
    /// Offset marking the end of this chunk's range.
    pub boundary: Uint256,
}

impl Element {
    pub fn new(chunk_hash: Hash, boundary: impl Into<Uint256>) -> Self {
        Element {
            chunk_hash,
            boundary: boundary.into(),
        }
    }
}

/// Inner vertex of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub id: Hash,
    pub left: Hash,
    pub right: Hash,
    /// Max of the left subtree, the split point between both children.
    pub note: Uint256,
    /// Max of the right subtree.
    pub max: Uint256,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf {
        id: Hash,
        chunk_hash: Hash,
        boundary: Uint256,
    },
    Branch(Branch),
    /// The topmost branch. Hashed exactly like any other branch.
    Root(Branch),
}

impl Node {
    pub(crate) fn leaf(element: &Element) -> Self {
        Node::Leaf {
            id: leaf_hash(&element.chunk_hash, &encode_boundary(&element.boundary)),
            chunk_hash: element.chunk_hash,
            boundary: element.boundary,
        }
    }

    pub(crate) fn pair(left: &Node, right: &Node) -> Self {
        let note = left.max();
        Node::Branch(Branch {
            id: branch_hash(left.id(), right.id(), &encode_boundary(&note)),
            left: *left.id(),
            right: *right.id(),
            note,
            max: right.max(),
        })
    }

    /// Retags a branch as the root. Leaves are left untouched, a single
    /// leaf is its own root.
    pub(crate) fn into_root(self) -> Self {
        match self {
            Node::Branch(branch) => Node::Root(branch),
            other => other,
        }
    }

    pub fn id(&self) -> &Hash {
        match self {
            Node::Leaf { id, .. } => id,
            Node::Branch(branch) | Node::Root(branch) => &branch.id,
        }
    }

    /// Largest boundary reachable under this node.
    pub fn max(&self) -> Uint256 {
        match self {
            Node::Leaf { boundary, .. } => *boundary,
            Node::Branch(branch) | Node::Root(branch) => branch.max,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}
