use crate::graph::base_graph::Graph;
use crate::graph::mutable_graph::MutableGraph;
use fnv::{FnvHashMap, FnvHashSet};

/// Mutable adjacency-set graph used for ingestion, tests, and the
/// lower-bound heuristic. Vertex ids are arbitrary (not necessarily dense);
/// the exact engine relabels them internally.
#[derive(Clone, Debug, Default)]
pub struct HashMapGraph {
    data: FnvHashMap<usize, FnvHashSet<usize>>,
}

impl HashMapGraph {
    pub fn has_vertex(&self, u: usize) -> bool {
        self.data.contains_key(&u)
    }

    pub fn neighborhood_set(&self, u: usize) -> &FnvHashSet<usize> {
        &self.data[&u]
    }
}

impl Graph for HashMapGraph {
    fn order(&self) -> usize {
        self.data.len()
    }

    fn degree(&self, u: usize) -> usize {
        self.data[&u].len()
    }

    fn has_edge(&self, u: usize, v: usize) -> bool {
        self.data.get(&u).map_or(false, |nb| nb.contains(&v))
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.data.keys().copied())
    }

    fn neighborhood(&self, u: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.data[&u].iter().copied())
    }
}

impl MutableGraph for HashMapGraph {
    fn new() -> Self {
        Self::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            data: FnvHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    fn add_vertex(&mut self, u: usize) {
        self.data.entry(u).or_default();
    }

    fn remove_vertex(&mut self, u: usize) {
        if let Some(neighbors) = self.data.remove(&u) {
            for v in neighbors {
                self.data.get_mut(&v).unwrap().remove(&u);
            }
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) {
        assert_ne!(u, v);
        self.data.entry(u).or_default().insert(v);
        self.data.entry(v).or_default().insert(u);
    }

    fn remove_edge(&mut self, u: usize, v: usize) {
        self.data.get_mut(&u).unwrap().remove(&v);
        self.data.get_mut(&v).unwrap().remove(&u);
    }

    fn contract(&mut self, u: usize, v: usize) {
        assert!(self.data[&u].contains(&v));
        let neighbors = self.data.remove(&v).unwrap();
        for w in neighbors {
            self.data.get_mut(&w).unwrap().remove(&v);
            if w != u {
                self.data.get_mut(&w).unwrap().insert(u);
                self.data.get_mut(&u).unwrap().insert(w);
            }
        }
    }
}
