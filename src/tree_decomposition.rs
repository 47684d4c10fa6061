use crate::datastructures::BitSet;
use crate::graph::Graph;
use fnv::FnvHashSet;
use std::cmp::max;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeDecompositionValidationError {
    HasCycle,
    NotConnected,
    MissingVertex(usize),
    MissingEdge((usize, usize)),
    NotInducingSubtree(usize),
}

impl Display for TreeDecompositionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            TreeDecompositionValidationError::HasCycle => write!(f, "Has Cycle"),
            TreeDecompositionValidationError::NotConnected => write!(f, "Not Connected"),
            TreeDecompositionValidationError::MissingVertex(v) => {
                write!(f, "Missing Vertex: {}", v)
            }
            TreeDecompositionValidationError::MissingEdge((u, v)) => {
                write!(f, "Missing Edge: ({}, {})", u, v)
            }
            TreeDecompositionValidationError::NotInducingSubtree(v) => {
                write!(f, "Not Inducing Subtree: {}", v)
            }
        }
    }
}

impl std::error::Error for TreeDecompositionValidationError {}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Bag {
    pub id: usize,
    pub vertex_set: FnvHashSet<usize>,
    pub neighbors: FnvHashSet<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeDecomposition {
    pub bags: Vec<Bag>,
    pub root: Option<usize>,
    pub max_bag_size: usize,
}

impl TreeDecomposition {
    pub fn bags(&self) -> &[Bag] {
        &self.bags
    }

    /// Width of the decomposition, one less than the largest bag.
    pub fn width(&self) -> usize {
        self.max_bag_size.saturating_sub(1)
    }

    pub fn add_bag(&mut self, vertex_set: FnvHashSet<usize>) -> usize {
        let id = self.bags.len();
        if id == 0 {
            self.root = Some(id);
        }
        self.max_bag_size = max(self.max_bag_size, vertex_set.len());
        self.bags.push(Bag {
            id,
            vertex_set,
            neighbors: FnvHashSet::default(),
        });
        id
    }

    pub fn add_edge(&mut self, b1: usize, b2: usize) {
        assert!(b1 < self.bags.len());
        assert!(b2 < self.bags.len());
        assert_ne!(b1, b2);
        self.bags[b1].neighbors.insert(b2);
        self.bags[b2].neighbors.insert(b1);
    }

    /// Contracts every tree edge whose child bag is contained in its
    /// neighbor, removing the redundant bags the glue extraction leaves
    /// behind.
    pub fn flatten(&mut self) {
        while let Some((keeper, redundant)) = self.find_combinable() {
            let moved: Vec<usize> = self.bags[redundant]
                .neighbors
                .iter()
                .copied()
                .filter(|n| *n != keeper)
                .collect();
            for n in moved {
                self.bags[n].neighbors.remove(&redundant);
                self.bags[n].neighbors.insert(keeper);
                self.bags[keeper].neighbors.insert(n);
            }
            self.bags[keeper].neighbors.remove(&redundant);
            self.bags[redundant].neighbors.clear();
            if self.root == Some(redundant) {
                self.root = Some(keeper);
            }
            self.remove_bag(redundant);
        }
    }

    fn find_combinable(&self) -> Option<(usize, usize)> {
        for bag in &self.bags {
            if let Some(n) = bag
                .neighbors
                .iter()
                .find(|n| self.bags[**n].vertex_set.is_subset(&bag.vertex_set))
            {
                return Some((bag.id, *n));
            }
        }
        None
    }

    fn remove_bag(&mut self, id: usize) {
        assert!(self.bags[id].neighbors.is_empty());
        let last = self.bags.len() - 1;
        self.bags.swap_remove(id);
        if id != last {
            // the former last bag moved into slot id, rewire references
            self.bags[id].id = id;
            let moved: Vec<usize> = self.bags[id].neighbors.iter().copied().collect();
            for n in moved {
                self.bags[n].neighbors.remove(&last);
                self.bags[n].neighbors.insert(id);
            }
            if self.root == Some(last) {
                self.root = Some(id);
            }
        }
    }

    pub fn dfs(&self) -> TreeDecompositionIterator<'_> {
        let mut visited = BitSet::new(self.bags.len());
        let stack = match self.root {
            Some(root) => {
                visited.set_bit(root);
                vec![root]
            }
            None => vec![],
        };
        TreeDecompositionIterator {
            td: self,
            stack,
            visited,
        }
    }

    pub fn verify<G: Graph>(&self, graph: &G) -> Result<(), TreeDecompositionValidationError> {
        if !self.is_connected() {
            return Err(TreeDecompositionValidationError::NotConnected);
        }
        if self.is_cyclic() {
            return Err(TreeDecompositionValidationError::HasCycle);
        }
        if let Some(v) = self.get_missing_vertex(graph) {
            return Err(TreeDecompositionValidationError::MissingVertex(v));
        }
        if let Some(e) = self.get_missing_edge(graph) {
            return Err(TreeDecompositionValidationError::MissingEdge(e));
        }
        if let Some(v) = self.get_vertex_not_inducing_subtree(graph) {
            return Err(TreeDecompositionValidationError::NotInducingSubtree(v));
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        if self.bags.is_empty() {
            return true;
        }
        self.dfs().count() == self.bags.len()
    }

    fn is_cyclic(&self) -> bool {
        if self.bags.is_empty() {
            return false;
        }
        let mut visited = BitSet::new(self.bags.len());
        self.is_cyclic_rec(&mut visited, self.root.unwrap(), None)
    }

    fn is_cyclic_rec(&self, visited: &mut BitSet, v: usize, parent: Option<usize>) -> bool {
        visited.set_bit(v);
        for n in self.bags[v].neighbors.iter().copied() {
            if !visited.at(n) {
                if self.is_cyclic_rec(visited, n, Some(v)) {
                    return true;
                }
            } else if parent != Some(n) {
                return true;
            }
        }
        false
    }

    fn get_missing_vertex<G: Graph>(&self, graph: &G) -> Option<usize> {
        let mut vertices: FnvHashSet<usize> = graph.vertices().collect();
        for bag in &self.bags {
            for v in &bag.vertex_set {
                vertices.remove(v);
            }
        }
        vertices.iter().next().copied()
    }

    fn get_missing_edge<G: Graph>(&self, graph: &G) -> Option<(usize, usize)> {
        for u in graph.vertices() {
            for v in graph.neighborhood(u).filter(|v| u < *v) {
                if !self
                    .bags
                    .iter()
                    .any(|b| b.vertex_set.contains(&u) && b.vertex_set.contains(&v))
                {
                    return Some((u, v));
                }
            }
        }
        None
    }

    fn get_vertex_not_inducing_subtree<G: Graph>(&self, graph: &G) -> Option<usize> {
        for u in graph.vertices() {
            let mut inducing_bags: FnvHashSet<usize> = self
                .bags
                .iter()
                .filter(|b| b.vertex_set.contains(&u))
                .map(|b| b.id)
                .collect();

            let first = match inducing_bags.iter().next() {
                Some(first) => *first,
                None => continue,
            };
            inducing_bags.remove(&first);
            let mut visited = BitSet::new(self.bags.len());
            visited.set_bit(first);
            let mut stack = vec![first];
            while let Some(c) = stack.pop() {
                for n in self.bags[c].neighbors.iter().copied() {
                    if !visited.at(n) && self.bags[n].vertex_set.contains(&u) {
                        inducing_bags.remove(&n);
                        visited.set_bit(n);
                        stack.push(n);
                    }
                }
            }
            if !inducing_bags.is_empty() {
                return Some(u);
            }
        }
        None
    }
}

pub struct TreeDecompositionIterator<'a> {
    td: &'a TreeDecomposition,
    stack: Vec<usize>,
    visited: BitSet,
}

impl<'a> Iterator for TreeDecompositionIterator<'a> {
    type Item = &'a Bag;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        for c in self.td.bags[current].neighbors.iter().copied() {
            if !self.visited.at(c) {
                self.stack.push(c);
                self.visited.set_bit(c);
            }
        }
        Some(&self.td.bags[current])
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{HashMapGraph, MutableGraph};
    use crate::tree_decomposition::{TreeDecomposition, TreeDecompositionValidationError};
    use fnv::FnvHashSet;

    fn bag(vertices: &[usize]) -> FnvHashSet<usize> {
        vertices.iter().copied().collect()
    }

    fn path_graph(n: usize) -> HashMapGraph {
        let mut graph = HashMapGraph::with_capacity(n);
        (0..n).for_each(|v| graph.add_vertex(v));
        (1..n).for_each(|v| graph.add_edge(v - 1, v));
        graph
    }

    #[test]
    fn valid_path_decomposition() {
        let graph = path_graph(4);
        let mut td = TreeDecomposition::default();
        let a = td.add_bag(bag(&[0, 1]));
        let b = td.add_bag(bag(&[1, 2]));
        let c = td.add_bag(bag(&[2, 3]));
        td.add_edge(a, b);
        td.add_edge(b, c);
        assert!(td.verify(&graph).is_ok());
        assert_eq!(td.width(), 1);
    }

    #[test]
    fn detects_missing_edge() {
        let graph = path_graph(3);
        let mut td = TreeDecomposition::default();
        let a = td.add_bag(bag(&[0, 1]));
        let b = td.add_bag(bag(&[2]));
        td.add_edge(a, b);
        assert_eq!(
            td.verify(&graph),
            Err(TreeDecompositionValidationError::MissingEdge((1, 2)))
        );
    }

    #[test]
    fn detects_broken_subtree() {
        let graph = path_graph(3);
        let mut td = TreeDecomposition::default();
        let a = td.add_bag(bag(&[0, 1]));
        let b = td.add_bag(bag(&[1, 2]));
        let c = td.add_bag(bag(&[0, 2]));
        td.add_edge(a, b);
        td.add_edge(b, c);
        // vertex 0 appears in the two end bags only
        assert_eq!(
            td.verify(&graph),
            Err(TreeDecompositionValidationError::NotInducingSubtree(0))
        );
    }

    #[test]
    fn detects_disconnected_tree() {
        let graph = path_graph(2);
        let mut td = TreeDecomposition::default();
        td.add_bag(bag(&[0, 1]));
        td.add_bag(bag(&[0, 1]));
        assert_eq!(
            td.verify(&graph),
            Err(TreeDecompositionValidationError::NotConnected)
        );
    }

    #[test]
    fn flatten_contracts_subset_bags() {
        let graph = path_graph(4);
        let mut td = TreeDecomposition::default();
        let a = td.add_bag(bag(&[0, 1]));
        let b = td.add_bag(bag(&[1]));
        let c = td.add_bag(bag(&[1, 2]));
        let d = td.add_bag(bag(&[2, 3]));
        td.add_edge(a, b);
        td.add_edge(b, c);
        td.add_edge(c, d);
        td.flatten();
        assert_eq!(td.bags.len(), 3);
        assert!(td.verify(&graph).is_ok());
        assert_eq!(td.width(), 1);
    }

    #[test]
    fn flatten_keeps_root_valid() {
        let graph = path_graph(2);
        let mut td = TreeDecomposition::default();
        let root = td.add_bag(bag(&[0]));
        let child = td.add_bag(bag(&[0, 1]));
        td.add_edge(root, child);
        td.flatten();
        assert_eq!(td.bags.len(), 1);
        assert_eq!(td.root, Some(0));
        assert!(td.verify(&graph).is_ok());
    }
}
