use std::collections::HashMap;

use cosmwasm_std::{Binary, Uint256};

use crate::error::TreeError;
use crate::hash::{encode_boundary, Hash, ZERO_HASH};
use crate::logging::{debug, trace};
use crate::msg::RangeProof;
use crate::node::{Element, Node};

/// Every node of a tree, keyed by identifier.
pub type NodeSet = HashMap<Hash, Node>;

/// A fully built tree. Immutable once constructed.
#[derive(Clone, Debug, Default)]
pub struct MerkleTree {
    root: Hash,
    nodes: NodeSet,
    /// Node identifiers per row, leaves first. Promoted nodes appear in
    /// every row they were carried through.
    rows: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Builds the tree over `elements`, which must already be sorted by
    /// strictly increasing boundary. The order is not checked; see
    /// [`MerkleTree::build_checked`].
    ///
    /// An empty input yields the zero root and no nodes.
    pub fn build(elements: &[Element]) -> Self {
        let (root, nodes, rows) = build_rows(elements);
        MerkleTree { root, nodes, rows }
    }

    /// Like [`MerkleTree::build`], but rejects elements whose boundary does
    /// not strictly exceed the previous one.
    pub fn build_checked(elements: &[Element]) -> Result<Self, TreeError> {
        if let Some(index) = elements
            .windows(2)
            .position(|pair| pair[1].boundary <= pair[0].boundary)
        {
            return Err(TreeError::UnorderedBoundaries { index: index + 1 });
        }
        Ok(Self::build(elements))
    }

    pub fn root(&self) -> &Hash {
        &self.root
    }

    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    pub fn rows(&self) -> &[Vec<Hash>] {
        &self.rows
    }

    pub fn node(&self, id: &Hash) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of branch levels above the leaves.
    pub fn depth(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Largest boundary in the tree, the natural right bound for validation.
    pub fn max_boundary(&self) -> Option<Uint256> {
        self.nodes.get(&self.root).map(Node::max)
    }

    /// Generates the proof path for `dest`. See [`generate_path`].
    pub fn generate_path(&self, dest: Uint256) -> Result<Vec<u8>, TreeError> {
        if self.is_empty() {
            return Err(TreeError::EmptyTree {});
        }
        generate_path(&self.root, dest, &self.nodes)
    }

    /// Packages the path for `dest` together with everything a verifier
    /// needs besides trust in the root.
    pub fn prove(&self, dest: Uint256, right_bound: Uint256) -> Result<RangeProof, TreeError> {
        let path = self.generate_path(dest)?;
        Ok(RangeProof {
            root: Binary::from(self.root.to_vec()),
            dest,
            right_bound,
            path: Binary::from(path),
        })
    }
}

/// Builds the tree over `elements`, returning its root and every node.
pub fn build(elements: &[Element]) -> (Hash, NodeSet) {
    let (root, nodes, _) = build_rows(elements);
    (root, nodes)
}

fn build_rows(elements: &[Element]) -> (Hash, NodeSet, Vec<Vec<Hash>>) {
    if elements.is_empty() {
        debug!("build: no elements, returning the empty tree");
        return (ZERO_HASH, NodeSet::new(), vec![]);
    }

    let mut nodes = NodeSet::with_capacity(2 * elements.len());
    let mut rows = vec![];

    let mut row: Vec<Node> = elements.iter().map(Node::leaf).collect();
    while row.len() > 1 {
        rows.push(row.iter().map(|node| *node.id()).collect());
        let next = reduce_row(&row);
        nodes.extend(row.into_iter().map(|node| (*node.id(), node)));
        row = next;
        trace!("build: reduced row to {} nodes", row.len());
    }

    // `row` holds exactly one node here
    let mut row = row.into_iter();
    let Some(top) = row.next() else {
        return (ZERO_HASH, nodes, rows);
    };
    let root = top.into_root();
    let root_id = *root.id();
    rows.push(vec![root_id]);
    nodes.insert(root_id, root);

    debug!(
        "build: {} elements, {} rows, root {}",
        elements.len(),
        rows.len(),
        hex::encode(root_id)
    );
    (root_id, nodes, rows)
}

/// Pairs adjacent nodes left to right. An odd trailing node is carried to
/// the next row as is.
fn reduce_row(row: &[Node]) -> Vec<Node> {
    row.chunks(2)
        .map(|pair| match pair {
            [left, right] => Node::pair(left, right),
            [single] => single.clone(),
            _ => unreachable!("chunks(2) yields one or two nodes"),
        })
        .collect()
}

/// Walks from `root` towards the leaf covering `dest` and serializes the
/// disclosures of every visited node.
///
/// At each branch the path goes left when `dest < note`, right otherwise,
/// emitting `left || right || note`. The leaf terminates the path with
/// `chunk_hash || boundary`. `dest` is not clamped.
pub fn generate_path(root: &Hash, dest: Uint256, nodes: &NodeSet) -> Result<Vec<u8>, TreeError> {
    let mut path = vec![];
    let mut id = *root;
    loop {
        let node = nodes
            .get(&id)
            .ok_or_else(|| TreeError::NodeNotFound(hex::encode(id)))?;
        match node {
            Node::Leaf {
                chunk_hash,
                boundary,
                ..
            } => {
                path.extend_from_slice(chunk_hash);
                path.extend_from_slice(&encode_boundary(boundary));
                return Ok(path);
            }
            Node::Branch(branch) | Node::Root(branch) => {
                path.extend_from_slice(&branch.left);
                path.extend_from_slice(&branch.right);
                path.extend_from_slice(&encode_boundary(&branch.note));
                id = if dest < branch.note {
                    branch.left
                } else {
                    branch.right
                };
                trace!(
                    "generate_path: note {}, dest {dest}, next {}",
                    branch.note,
                    hex::encode(id)
                );
            }
        }
    }
}
