use crate::datastructures::BitSet;
use crate::graph::base_graph::Graph;
use fxhash::FxHashMap;

/// Immutable bit-set adjacency of a graph with dense vertex ids [0, n).
/// The exact engine runs entirely on this representation; the queries below
/// implement the saturation discipline of the node-search game.
#[derive(Clone, Debug)]
pub struct BitGraph {
    graph: Vec<BitSet>,
}

impl From<Vec<BitSet>> for BitGraph {
    fn from(graph: Vec<BitSet>) -> Self {
        Self { graph }
    }
}

impl BitGraph {
    pub fn from_graph<G: Graph>(og_graph: &G, og_to_self: &FxHashMap<u32, u32>) -> Self {
        let mut graph = vec![BitSet::new(og_graph.order()); og_graph.order()];

        for v in og_graph.vertices() {
            for u in og_graph.neighborhood(v) {
                let a = og_to_self[&(v as u32)] as usize;
                let b = og_to_self[&(u as u32)] as usize;
                graph[a].set_bit(b);
                graph[b].set_bit(a);
            }
        }
        Self { graph }
    }

    pub fn order(&self) -> usize {
        self.graph.len()
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.graph[u].at(v)
    }

    /// Open neighborhood of v.
    pub fn neighborhood_as_bitset(&self, v: usize) -> &BitSet {
        &self.graph[v]
    }

    /// N(S): the vertices outside S adjacent to S.
    pub fn exterior_border(&self, s: &BitSet) -> BitSet {
        let mut border = BitSet::new(s.len());
        for v in s.iter() {
            border.or(&self.graph[v]);
        }
        border.and_not(s);
        border
    }

    /// Connected component of v in the graph with `separator` removed.
    /// v must not be in the separator; the component excludes the separator.
    pub fn component_of(&self, v: usize, separator: &BitSet) -> BitSet {
        let mut component = self.graph[v].clone();
        component.and_not(separator);
        let mut to_be_scanned = component.clone();
        component.set_bit(v);

        while !to_be_scanned.empty() {
            let save = component.clone();
            for w in to_be_scanned.iter() {
                component.or(&self.graph[w]);
            }
            component.and_not(separator);
            to_be_scanned = component.clone();
            to_be_scanned.and_not(&save);
        }
        component
    }

    fn absorbable_component(&self, component: &BitSet, border: &BitSet) -> bool {
        // N(C) ⊆ N(S) holds for every exterior component, so a strictly
        // smaller nonempty border means C sees only part of N(S). Components
        // with an empty border belong to untouched parts of the graph and
        // stay out; they are joined at the synthetic root instead.
        let component_border = self.exterior_border(component);
        !component_border.empty() && component_border.cardinality() < border.cardinality()
    }

    /// Canonicalizes S in place: every component C of G[V \ (S ∪ N(S))] with
    /// ∅ ≠ N(C) ⊊ N(S) is absorbed into S. Such a component only touches
    /// border vertices, so absorbing it leaves N(S) unchanged and one sweep
    /// over the components reaches the fixpoint.
    pub fn saturate(&self, s: &mut BitSet) {
        let border = self.exterior_border(s);
        let mut separator = s.clone();
        separator.or(&border);
        let mut rest = separator.clone();
        rest.not();

        let mut v = rest.get_first_set();
        while let Some(x) = v {
            let component = self.component_of(x, &separator);
            if self.absorbable_component(&component, &border) {
                s.or(&component);
            }
            rest.and_not(&component);
            v = rest.get_next_set(x + 1);
        }
    }

    /// Smallest vertex of a component of G[V \ (T ∪ N(T))] that saturation
    /// would absorb. None if T is saturated.
    pub fn absorbable(&self, t: &BitSet) -> Option<usize> {
        let border = self.exterior_border(t);
        let mut separator = t.clone();
        separator.or(&border);
        let mut rest = separator.clone();
        rest.not();

        let mut v = rest.get_first_set();
        while let Some(x) = v {
            let component = self.component_of(x, &separator);
            if self.absorbable_component(&component, &border) {
                return Some(x);
            }
            rest.and_not(&component);
            v = rest.get_next_set(x + 1);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::datastructures::BitSet;
    use crate::graph::bit_graph::BitGraph;

    fn graph_from(n: usize, edges: &[(usize, usize)]) -> BitGraph {
        let mut adjacency = vec![BitSet::new(n); n];
        for &(u, v) in edges {
            adjacency[u].set_bit(v);
            adjacency[v].set_bit(u);
        }
        BitGraph::from(adjacency)
    }

    /// Spider with three legs of length two, center 0.
    fn spider() -> BitGraph {
        graph_from(7, &[(0, 1), (1, 2), (0, 3), (3, 4), (0, 5), (5, 6)])
    }

    #[test]
    fn exterior_border() {
        let graph = graph_from(4, &[(0, 1), (1, 2), (2, 3)]);
        let s = BitSet::from_slice(4, &[1usize]);
        let border: Vec<usize> = graph.exterior_border(&s).iter().collect();
        assert_eq!(border, vec![0, 2]);
    }

    #[test]
    fn component_sweep() {
        let graph = spider();
        let separator = BitSet::from_slice(7, &[0usize]);
        let component: Vec<usize> = graph.component_of(4, &separator).iter().collect();
        assert_eq!(component, vec![3, 4]);
    }

    #[test]
    fn saturate_absorbs_dominated_components() {
        let graph = spider();
        // {0, 1, 2} has border {3, 5}; the leaves 4 and 6 each see only one
        // border vertex and get absorbed
        let mut s = BitSet::from_slice(7, &[0usize, 1, 2]);
        graph.saturate(&mut s);
        let bits: Vec<usize> = s.iter().collect();
        assert_eq!(bits, vec![0, 1, 2, 4, 6]);
        let border: Vec<usize> = graph.exterior_border(&s).iter().collect();
        assert_eq!(border, vec![3, 5]);
    }

    #[test]
    fn saturate_keeps_full_border_components() {
        let graph = spider();
        // every component of the exterior of a leg sees the full border {0}
        let mut s = BitSet::from_slice(7, &[1usize, 2]);
        graph.saturate(&mut s);
        let bits: Vec<usize> = s.iter().collect();
        assert_eq!(bits, vec![1, 2]);
    }

    #[test]
    fn saturate_is_idempotent() {
        let graph = spider();
        for seed in &[vec![0usize], vec![2], vec![0, 1, 2], vec![2, 4]] {
            let mut s = BitSet::from_slice(7, seed);
            let border_before = graph.exterior_border(&s);
            graph.saturate(&mut s);
            let once = s.clone();
            graph.saturate(&mut s);
            assert_eq!(once, s);
            assert!(graph.exterior_border(&s).is_subset_of(&border_before));
        }
    }

    #[test]
    fn saturate_leaves_other_components_alone() {
        // two disjoint triangles
        let graph = graph_from(6, &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5)]);
        let mut s = BitSet::from_slice(6, &[0usize]);
        graph.saturate(&mut s);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0]);

        // a fully cleaned triangle has no border and stays saturated
        let mut s = BitSet::from_slice(6, &[0usize, 1, 2]);
        graph.saturate(&mut s);
        assert_eq!(s.cardinality(), 3);
        assert_eq!(graph.absorbable(&s), None);
    }

    #[test]
    fn absorbable_reports_smallest_vertex() {
        let graph = spider();
        let s = BitSet::from_slice(7, &[0usize, 1, 2]);
        // components {4} and {6} are both absorbable, 4 is reported
        assert_eq!(graph.absorbable(&s), Some(4));

        let saturated = BitSet::from_slice(7, &[1usize, 2]);
        assert_eq!(graph.absorbable(&saturated), None);
    }
}
