//! Degree and betweenness centrality

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use super::Graph;

/// Which centrality measure drives the social score
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Centrality {
    /// Weighted degree over the co-occurrence graph
    #[default]
    Degree,
    /// Brandes betweenness over the inverted (distance) graph
    Betweenness,
    /// `w * degree + (1 - w) * betweenness`
    ///
    /// `w` is clamped to `[0, 1]` here; [`Social::new`](crate::Social::new)
    /// rejects weights outside that range.
    Blend(f64),
}

impl Centrality {
    /// Raw centrality of every node of `graph`
    pub fn scores(&self, graph: &Graph) -> Vec<f64> {
        match *self {
            Centrality::Degree => graph.degree_centrality(),
            Centrality::Betweenness => graph.inverted().betweenness_centrality(),
            Centrality::Blend(weight) => {
                let w = weight.clamp(0.0, 1.0);
                let degree = graph.degree_centrality();
                let betweenness = graph.inverted().betweenness_centrality();
                degree
                    .iter()
                    .zip(&betweenness)
                    .map(|(d, b)| w * d + (1.0 - w) * b)
                    .collect()
            }
        }
    }
}

impl fmt::Display for Centrality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Centrality::Degree => write!(f, "degree"),
            Centrality::Betweenness => write!(f, "betweenness"),
            Centrality::Blend(w) => write!(f, "blend({})", w),
        }
    }
}

/// Dijkstra queue entry, ordered so the max-heap pops the nearest node first
#[derive(Debug)]
struct Pending {
    distance: f64,
    node: usize,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Graph {
    /// Sum of incident edge weights per node
    pub fn degree_centrality(&self) -> Vec<f64> {
        (0..self.node_count())
            .map(|node| self.neighbors(node).map(|(_, w)| w).sum())
            .collect()
    }

    /// Weighted betweenness centrality (Brandes), treating weights as distances
    ///
    /// Every ordered source/target pair is counted, so on an undirected graph
    /// each unordered pair contributes twice.
    pub fn betweenness_centrality(&self) -> Vec<f64> {
        let n = self.node_count();
        let mut betweenness = vec![0.0; n];

        for source in 0..n {
            let mut order = Vec::with_capacity(n);
            let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
            let mut paths = vec![0.0; n];
            let mut best = vec![f64::INFINITY; n];
            let mut settled = vec![false; n];

            paths[source] = 1.0;
            best[source] = 0.0;
            let mut queue = BinaryHeap::new();
            queue.push(Pending {
                distance: 0.0,
                node: source,
            });

            while let Some(Pending { distance, node }) = queue.pop() {
                if settled[node] {
                    continue;
                }
                settled[node] = true;
                order.push(node);

                for (next, weight) in self.neighbors(node) {
                    if settled[next] {
                        continue;
                    }
                    let through = distance + weight;
                    if through < best[next] {
                        best[next] = through;
                        paths[next] = paths[node];
                        predecessors[next] = vec![node];
                        queue.push(Pending {
                            distance: through,
                            node: next,
                        });
                    } else if through == best[next] {
                        paths[next] += paths[node];
                        predecessors[next].push(node);
                    }
                }
            }

            let mut dependency = vec![0.0; n];
            while let Some(node) = order.pop() {
                for &prev in &predecessors[node] {
                    dependency[prev] += paths[prev] / paths[node] * (1.0 + dependency[node]);
                }
                if node != source {
                    betweenness[node] += dependency[node];
                }
            }
        }
        betweenness
    }
}
