use std::collections::BTreeSet;

use bit_set::BitSet;

use crate::error::{Error, Result};

/** Vertex Id (DIMACS convention: vertices are numbered from 1) */
pub type VertexId = usize;

/** unordered vertex pair, always stored as (i,j) with i < j */
pub type Pair = (VertexId, VertexId);

/// largest vertex count accepted (the adjacency matrix holds one bitset per vertex)
pub const MAX_VERTICES:usize = 1 << 20;

/// normalizes a pair so that the smallest endpoint comes first
pub fn normalize(u:VertexId, v:VertexId) -> Pair {
    if u <= v { (u,v) } else { (v,u) }
}

/// number of unordered pairs over n vertices: n(n-1)/2
pub fn nb_pairs(n:usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// all unordered pairs (i,j), 1 <= i < j <= n, in lexicographic order
pub fn all_pairs(n:usize) -> impl Iterator<Item=Pair> {
    (1..=n).flat_map(move |i| (i+1..=n).map(move |j| (i,j)))
}

/** models an undirected simple graph (vertices 1..=n) */
#[derive(Debug, Clone)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// edges of the graph, normalized and sorted
    edges: BTreeSet<Pair>,
    /// adj_matrix[i-1]: bitset of the neighbors of i
    adj_matrix: Vec<BitSet>,
}

impl PartialEq for Graph {
    fn eq(&self, other:&Self) -> bool {
        self.n == other.n && self.edges == other.edges
    }
}

impl Eq for Graph {}

impl Graph {

    /** builds a graph from its vertex count and an edge list.
    Repeated edges collapse into one.

    Fails if n is zero or above MAX_VERTICES, if an edge is a self-loop,
    or if an endpoint is outside [1,n].
    */
    pub fn new<I>(n:usize, edges:I) -> Result<Self>
    where I: IntoIterator<Item=Pair> {
        if n == 0 {
            return Err(Error::Format("the vertex count must be positive".to_string()));
        }
        if n > MAX_VERTICES {
            return Err(Error::Format(format!(
                "{} vertices declared, at most {} supported", n, MAX_VERTICES
            )));
        }
        let mut res = Self { n, edges:BTreeSet::new(), adj_matrix:vec![BitSet::default(); n] };
        for (u,v) in edges {
            res.add_edge(u, v)?;
        }
        Ok(res)
    }

    fn add_edge(&mut self, u:VertexId, v:VertexId) -> Result<()> {
        if u == v {
            return Err(Error::Format(format!("self-loop on vertex {}", u)));
        }
        for w in [u,v].iter() {
            if *w < 1 || *w > self.n {
                return Err(Error::Format(format!(
                    "vertex {} outside of [1,{}] in edge ({},{})", w, self.n, u, v
                )));
            }
        }
        self.adj_matrix[u-1].insert(v-1);
        self.adj_matrix[v-1].insert(u-1);
        self.edges.insert(normalize(u, v));
        Ok(())
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// edge set (pairs (u,v) with u < v, lexicographic order)
    pub fn edges(&self) -> &BTreeSet<Pair> { &self.edges }

    /// degree of vertex u
    pub fn degree(&self, u:VertexId) -> usize { self.adj_matrix[u-1].len() }

    /// true iff u and v share an edge. O(1)
    pub fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool {
        u >= 1 && u <= self.n && self.adj_matrix[u-1].contains(v.wrapping_sub(1))
    }

    /// number of unordered vertex pairs
    pub fn nb_pairs(&self) -> usize { nb_pairs(self.n) }

    /** pairs of distinct vertices without an edge, in lexicographic order
    (all pairs minus the edge set) */
    pub fn non_adjacent_pairs(&self) -> impl Iterator<Item=Pair> + '_ {
        all_pairs(self.n).filter(move |(i,j)| !self.are_adjacent(*i, *j))
    }

    /// logs statistics of the graph
    pub fn display_statistics(&self) {
        let degrees:Vec<usize> = (1..=self.n).map(|i| self.degree(i)).collect();
        log::info!("\t{} \t vertices", self.nb_vertices());
        log::info!("\t{} \t edges", self.nb_edges());
        log::info!("\t{} \t non-adjacent pairs", self.nb_pairs() - self.nb_edges());
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            log::info!("\t{} \t min degree", min);
            log::info!("\t{} \t max degree", max);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn grid2x2() -> Graph {
        Graph::new(4, vec![(1,2),(1,3),(2,4),(3,4)]).unwrap()
    }

    #[test]
    fn test_build_graph() {
        let g = grid2x2();
        assert_eq!(g.nb_vertices(), 4);
        assert_eq!(g.nb_edges(), 4);
        assert_eq!(g.degree(1), 2);
        assert!(g.are_adjacent(2, 1));
        assert!(!g.are_adjacent(1, 4));
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let g = Graph::new(3, vec![(1,2),(2,1),(1,2)]).unwrap();
        assert_eq!(g.nb_edges(), 1);
        assert_eq!(g.edges().iter().next(), Some(&(1,2)));
    }

    #[test]
    fn test_invalid_edges() {
        assert!(matches!(Graph::new(3, vec![(2,2)]), Err(Error::Format(_))));
        assert!(matches!(Graph::new(3, vec![(1,4)]), Err(Error::Format(_))));
        assert!(matches!(Graph::new(3, vec![(0,1)]), Err(Error::Format(_))));
        assert!(matches!(Graph::new(0, vec![]), Err(Error::Format(_))));
    }

    #[test]
    fn test_vertex_count_limit() {
        assert!(Graph::new(MAX_VERTICES, vec![(1,MAX_VERTICES)]).is_ok());
        assert!(matches!(Graph::new(MAX_VERTICES+1, vec![]), Err(Error::Format(_))));
        assert!(matches!(Graph::new(usize::MAX, vec![]), Err(Error::Format(_))));
    }

    #[test]
    fn test_non_adjacent_pairs_are_lazy() {
        let g = Graph::new(MAX_VERTICES, vec![(1,2)]).unwrap();
        let first:Vec<Pair> = g.non_adjacent_pairs().take(3).collect();
        assert_eq!(first, vec![(1,3),(1,4),(1,5)]);
    }

    #[test]
    fn test_nb_pairs() {
        for n in 1..12 {
            assert_eq!(all_pairs(n).count(), n*(n-1)/2);
            assert_eq!(nb_pairs(n), n*(n-1)/2);
        }
        assert_eq!(nb_pairs(0), 0);
    }

    #[test]
    fn test_non_adjacent_partition() {
        let g = grid2x2();
        let pairs:Vec<Pair> = g.non_adjacent_pairs().collect();
        assert_eq!(pairs, vec![(1,4),(2,3)]);
        assert!(pairs.iter().all(|p| !g.edges().contains(p)));
        assert_eq!(pairs.len() + g.nb_edges(), g.nb_pairs());
    }

    #[test]
    fn test_three_vertex_example() {
        let g = Graph::new(3, vec![(1,2)]).unwrap();
        assert_eq!(all_pairs(3).collect::<Vec<_>>(), vec![(1,2),(1,3),(2,3)]);
        assert_eq!(g.non_adjacent_pairs().collect::<Vec<_>>(), vec![(1,3),(2,3)]);
    }
}
