//! Variable co-occurrence graphs
//!
//! Every variable of a data set is a node. Two variables are joined by an edge
//! whose weight is the number of minterms in which both appear in normal form.
//! The graphs feed the centrality measures used by the
//! [`Social`](crate::strategy::Social) strategy.
//!
//! Node ids come from an [`IdSequence`] owned by the caller, so building
//! graphs never touches shared state and several graphs can be built side by
//! side.

mod centrality;

pub use centrality::Centrality;

use std::collections::BTreeMap;

use crate::term::DataSet;

/// Edge density cap applied when building co-occurrence graphs
pub const DEFAULT_DENSITY_CAP: f64 = 0.25;

/// Identifier of a graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Generator of fresh node ids
#[derive(Debug, Default)]
pub struct IdSequence {
    next: usize,
}

impl IdSequence {
    /// Start a sequence at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a sequence at `first`
    pub fn starting_at(first: usize) -> Self {
        IdSequence { next: first }
    }

    /// Draw the next id
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// A weighted undirected graph
///
/// Nodes are addressed by position (`0..node_count()`); each position also
/// carries the [`NodeId`] it was created with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    ids: Vec<NodeId>,
    adjacency: Vec<BTreeMap<usize, f64>>,
}

impl Graph {
    /// An empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with `n` isolated nodes
    pub fn with_nodes(n: usize, ids: &mut IdSequence) -> Self {
        let mut graph = Graph::new();
        for _ in 0..n {
            graph.add_node(ids);
        }
        graph
    }

    /// Add an isolated node, returning its position
    pub fn add_node(&mut self, ids: &mut IdSequence) -> usize {
        self.ids.push(ids.next_id());
        self.adjacency.push(BTreeMap::new());
        self.ids.len() - 1
    }

    /// Add or replace the undirected edge `a`-`b`
    ///
    /// Returns `false` (and changes nothing) for self loops or unknown nodes.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) -> bool {
        if a == b || a >= self.node_count() || b >= self.node_count() {
            return false;
        }
        self.adjacency[a].insert(b, weight);
        self.adjacency[b].insert(a, weight);
        true
    }

    /// Build from the upper triangle of a square matrix; zero entries are not edges
    pub fn from_adjacency(matrix: &[Vec<f64>], ids: &mut IdSequence) -> Self {
        let n = matrix.len();
        let mut graph = Graph::with_nodes(n, ids);
        for (i, row) in matrix.iter().enumerate() {
            for (j, &weight) in row.iter().enumerate().skip(i + 1) {
                if weight != 0.0 {
                    graph.add_edge(i, j, weight);
                }
            }
        }
        graph
    }

    /// Co-occurrence graph of a data set
    ///
    /// With a density cap, only edges heavier than the cap's quantile of all
    /// pair weights are kept.
    pub fn from_data_set(set: &DataSet, density_cap: Option<f64>, ids: &mut IdSequence) -> Self {
        let mut matrix = co_occurrence(set);
        if let Some(cap) = density_cap {
            matrix = reduce_density(&matrix, cap);
        }
        Graph::from_adjacency(&matrix, ids)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Id of the node at `position`
    pub fn node_id(&self, position: usize) -> Option<NodeId> {
        self.ids.get(position).copied()
    }

    /// Weight of the edge `a`-`b`, if present
    pub fn weight(&self, a: usize, b: usize) -> Option<f64> {
        self.adjacency.get(a).and_then(|edges| edges.get(&b)).copied()
    }

    /// Neighbors of `node` with edge weights, in position order
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(&n, &w)| (n, w)))
    }

    /// Same nodes, with weights turned into distances
    ///
    /// Each weight `w` becomes `1 + max - w`, so the heaviest edges become the
    /// shortest.
    pub fn inverted(&self) -> Graph {
        let max = self
            .adjacency
            .iter()
            .flat_map(|edges| edges.values().copied())
            .fold(0.0, f64::max);
        Graph {
            ids: self.ids.clone(),
            adjacency: self
                .adjacency
                .iter()
                .map(|edges| edges.iter().map(|(&n, &w)| (n, 1.0 + max - w)).collect())
                .collect(),
        }
    }
}

/// Pairwise co-occurrence counts of normal literals
///
/// Only the upper triangle (`i < j`) is filled.
pub fn co_occurrence(set: &DataSet) -> Vec<Vec<f64>> {
    let n = set.n_variables();
    let mut matrix = vec![vec![0.0; n]; n];
    for minterm in set {
        let normal: Vec<usize> = minterm
            .iter()
            .filter(|literal| literal.is_normal())
            .map(|literal| literal.variable())
            .collect();
        for (k, &i) in normal.iter().enumerate() {
            for &j in &normal[k + 1..] {
                matrix[i][j] += 1.0;
            }
        }
    }
    matrix
}

/// Keep only entries strictly above the `density` quantile of the upper triangle
pub fn reduce_density(matrix: &[Vec<f64>], density: f64) -> Vec<Vec<f64>> {
    let n = matrix.len();
    let mut values: Vec<f64> = matrix
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row.iter().skip(i).copied())
        .collect();
    if values.is_empty() {
        return matrix.to_vec();
    }
    values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let cut = ((values.len() - 1) as f64 * density.clamp(0.0, 1.0)) as usize;
    let threshold = values[cut];

    let mut reduced = vec![vec![0.0; n]; n];
    for (i, row) in matrix.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if value > threshold {
                reduced[i][j] = value;
            }
        }
    }
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_sequence_is_caller_owned() {
        let mut ids = IdSequence::new();
        let a = Graph::with_nodes(2, &mut ids);
        let b = Graph::with_nodes(2, &mut ids);
        assert_eq!(a.node_id(1), Some(NodeId(1)));
        assert_eq!(b.node_id(0), Some(NodeId(2)));

        let mut other = IdSequence::starting_at(10);
        let c = Graph::with_nodes(1, &mut other);
        assert_eq!(c.node_id(0), Some(NodeId(10)));
    }

    #[test]
    fn test_add_edge_rejects_bad_nodes() {
        let mut graph = Graph::with_nodes(2, &mut IdSequence::new());
        assert!(graph.add_edge(0, 1, 2.0));
        assert!(!graph.add_edge(1, 1, 1.0));
        assert!(!graph.add_edge(0, 5, 1.0));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight(1, 0), Some(2.0));
    }

    #[test]
    fn test_co_occurrence() {
        let set = DataSet::from_rows(
            3,
            &[[true, true, false], [true, true, true], [false, true, true]],
        )
        .unwrap();
        let matrix = co_occurrence(&set);
        assert_eq!(matrix[0][1], 2.0);
        assert_eq!(matrix[0][2], 1.0);
        assert_eq!(matrix[1][2], 2.0);
        assert_eq!(matrix[1][0], 0.0);
    }

    #[test]
    fn test_reduce_density_keeps_heaviest() {
        let matrix = vec![
            vec![0.0, 5.0, 1.0, 0.0],
            vec![0.0, 0.0, 3.0, 0.0],
            vec![0.0, 0.0, 0.0, 2.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ];
        // 10 upper-triangle values, descending: 5 3 2 1 0 ... ; cut index 2 -> threshold 2
        let reduced = reduce_density(&matrix, 0.25);
        assert_eq!(reduced[0][1], 5.0);
        assert_eq!(reduced[1][2], 3.0);
        assert_eq!(reduced[2][3], 0.0);
        assert_eq!(reduced[0][2], 0.0);
    }

    #[test]
    fn test_inverted_weights() {
        let mut graph = Graph::with_nodes(3, &mut IdSequence::new());
        graph.add_edge(0, 1, 4.0);
        graph.add_edge(1, 2, 1.0);
        let inverted = graph.inverted();
        assert_eq!(inverted.weight(0, 1), Some(1.0));
        assert_eq!(inverted.weight(2, 1), Some(4.0));
        assert_eq!(inverted.node_id(2), graph.node_id(2));
    }

    #[test]
    fn test_from_data_set_without_cap() {
        let set = DataSet::from_rows(3, &[[true, true, false]]).unwrap();
        let graph = Graph::from_data_set(&set, None, &mut IdSequence::new());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![(1, 1.0)]);
    }
}
