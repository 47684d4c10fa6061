use crate::datastructures::{BitSet, BitSetTrie};
use crate::exact::{CleanAndGlueError, ExactSolver};
use crate::graph::{BitGraph, Graph};
use crate::tree_decomposition::TreeDecomposition;
use fnv::{FnvHashMap, FnvHashSet};
use fxhash::FxHashMap;
use log::info;
use std::cmp::{max, Ordering};
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering as MemoryOrdering};
use std::sync::Arc;

/// Frontier entry. The queue hands out the largest cleaned set first; ties
/// fall back to insertion order so that runs are reproducible.
#[derive(Clone, Debug, Eq, PartialEq)]
struct RankedConfiguration {
    configuration: BitSet,
    sequence: usize,
}

impl Ord for RankedConfiguration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.configuration
            .cardinality()
            .cmp(&other.configuration.cardinality())
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for RankedConfiguration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Exact tree-decomposition solver based on the helicopter cops-and-robber
/// node-search game. A priority queue of win-configurations (cleaned vertex
/// sets S that the searchers can hold with searchers on N(S)) is seeded with
/// saturated singletons and grown bottom-up: either a searcher is lifted from
/// a border vertex (fly), or two disjoint win-configurations sharing a border
/// vertex are fused (split-glue). Once a win-configuration covers all but at
/// most k + 1 vertices, a decomposition of width k is extracted from the glue
/// records.
///
/// The glue part follows Tamaki's bottom-up reconstruction idea; pruning is
/// done against a trie of every configuration seen so far.
pub struct CleanAndGlue {
    self_to_og: Vec<u32>,
    graph: BitGraph,
    n: usize,
    lowerbound: usize,
    upper_bound: Option<usize>,
    glue_budget: usize,
    cancelled: Option<Arc<AtomicBool>>,

    queue: BinaryHeap<RankedConfiguration>,
    memory: BitSetTrie,
    tries: Vec<BitSetTrie>,
    glue: FnvHashMap<BitSet, Vec<BitSet>>,
    sequence: usize,
    configurations: usize,
}

impl CleanAndGlue {
    pub fn new<G: Graph>(og_graph: &G) -> Self {
        let mut og_to_self: FxHashMap<u32, u32> = FxHashMap::default();
        let mut self_to_og = Vec::with_capacity(og_graph.order());

        let mut labels: Vec<usize> = og_graph.vertices().collect();
        labels.sort_unstable();
        for (idx, v) in labels.iter().enumerate() {
            og_to_self.insert(*v as u32, idx as u32);
            self_to_og.push(*v as u32);
        }

        let graph = BitGraph::from_graph(og_graph, &og_to_self);
        let n = graph.order();
        Self {
            self_to_og,
            graph,
            n,
            lowerbound: 1,
            upper_bound: None,
            glue_budget: usize::MAX,
            cancelled: None,
            queue: BinaryHeap::new(),
            memory: BitSetTrie::new(n),
            tries: (0..n).map(|_| BitSetTrie::new(n)).collect(),
            glue: FnvHashMap::default(),
            sequence: 0,
            configurations: 0,
        }
    }

    impl_setter!(self, lowerbound, usize);
    impl_setter!(self, upper_bound, Option<usize>);

    // glue_budget caps the number of transitive glue re-pushes per popped
    // configuration. The default leaves the expansion unbounded; embedders
    // under memory pressure can lower it.
    impl_setter!(self, glue_budget, usize);

    pub fn cancellation_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .map_or(false, |flag| flag.load(MemoryOrdering::SeqCst))
    }

    pub fn compute(mut self) -> Result<TreeDecomposition, CleanAndGlueError> {
        if self.n <= 2 {
            let mut td = TreeDecomposition::default();
            let vertex_set: FnvHashSet<usize> =
                self.self_to_og.iter().map(|v| *v as usize).collect();
            td.add_bag(vertex_set);
            return Ok(td);
        }

        let mut k = max(self.lowerbound, 1);
        loop {
            if let Some(upper) = self.upper_bound {
                if k >= upper {
                    return Err(CleanAndGlueError::UpperboundReached(k));
                }
            }
            if self.is_cancelled() {
                return Err(CleanAndGlueError::Interrupted);
            }
            if self.decompose(k)? {
                info!(
                    "tree width == {:2} ({:4} configurations)",
                    k, self.configurations
                );
                return Ok(self.extract_tree_decomposition());
            }
            info!(
                "tree width >= {:2} ({:4} configurations)",
                k, self.configurations
            );
            k += 1;
        }
    }

    /// Searches for a winning strategy of k + 1 searchers. Ok(true) means the
    /// glue records now describe a decomposition of width k; Ok(false) means
    /// the frontier drained and the tree width exceeds k.
    fn decompose(&mut self, k: usize) -> Result<bool, CleanAndGlueError> {
        self.queue.clear();
        self.memory.clear();
        self.glue.clear();
        for trie in self.tries.iter_mut() {
            trie.clear();
        }
        self.sequence = 0;
        self.configurations = 0;

        // trivial win-configurations
        for v in 0..self.n {
            let mut s = BitSet::new(self.n);
            s.set_bit(v);
            self.graph.saturate(&mut s);
            if self.offer(s, k, &[]) {
                return Ok(true);
            }
        }

        while let Some(entry) = self.queue.pop() {
            if self.is_cancelled() {
                return Err(CleanAndGlueError::Interrupted);
            }
            self.configurations += 1;
            let s = entry.configuration;
            let delta = self.graph.exterior_border(&s);
            let mut glue_budget = self.glue_budget;

            let mut border_vertex = delta.get_first_set();
            while let Some(v) = border_vertex {
                // make S available for future glue steps through v
                self.tries[v].insert(&s);

                // fly predecessor: lift the searcher standing on v
                let mut extended = s.clone();
                extended.set_bit(v);
                self.graph.saturate(&mut extended);
                if self.offer(extended, k, &[&s]) {
                    return Ok(true);
                }

                // split-glue predecessors: fuse S transitively with disjoint
                // win-configurations that also have v on their border
                let mut stack = vec![s.clone()];
                while let Some(current) = stack.pop() {
                    let current_border = self.graph.exterior_border(&current);
                    let mut mask = current.clone();
                    mask.or(&current_border);
                    mask.not();
                    let candidates: Vec<BitSet> =
                        self.tries[v].subsets_of(&mask).collect();
                    for to_glue in candidates {
                        let mut guards = self.graph.exterior_border(&to_glue);
                        guards.or(&current_border);
                        if guards.cardinality() > k + 1 {
                            continue; // not enough searchers
                        }
                        let mut glued = current.clone();
                        glued.or(&to_glue);

                        let absorbable = self.graph.absorbable(&glued);
                        if absorbable.is_none() || absorbable == Some(v) {
                            let mut offered = glued.clone();
                            offered.set_bit(v);
                            self.graph.saturate(&mut offered);
                            if self.offer(offered, k, &[&current, &to_glue]) {
                                return Ok(true);
                            }
                        }
                        if absorbable.is_none() {
                            self.glue
                                .entry(glued.clone())
                                .or_insert_with(|| vec![current.clone(), to_glue.clone()]);
                            if glue_budget > 0 {
                                glue_budget -= 1;
                                stack.push(glued);
                            }
                        }
                    }
                }
                border_vertex = delta.get_next_set(v + 1);
            }
        }

        // frontier drained without cleaning the whole graph
        Ok(false)
    }

    /// Checks whether S is a win-configuration worth keeping, assuming its
    /// parents are win-configurations. Returns true iff S certifies a winning
    /// strategy for the whole graph, in which case the glue records are
    /// complete and decompose is done.
    fn offer(&mut self, s: BitSet, k: usize, parents: &[&BitSet]) -> bool {
        // each configuration is handled at most once
        if self.memory.contains(&s) {
            return false;
        }

        // searchers must hold N(S) and the vertices cleaned in this step
        // simultaneously
        let border = self.graph.exterior_border(&s);
        let mut delta = s.clone();
        for parent in parents {
            delta.and_not(parent);
        }
        if border.cardinality() + delta.cardinality() > k + 1 {
            return false;
        }

        // dominance: a handled superset of S ∪ N(S) reaches everything S can
        let mut mask = s.clone();
        mask.or(&border);
        if self.memory.supersets_of(&mask).next().is_some() {
            self.memory.insert(&s);
            return false;
        }

        // dominance: a handled S' ⊇ S whose border fits inside N(S)
        let dominated = self
            .memory
            .supersets_of(&s)
            .any(|witness| self.graph.exterior_border(&witness).is_subset_of(&border));
        if dominated {
            self.memory.insert(&s);
            return false;
        }

        self.glue
            .entry(s.clone())
            .or_insert_with(|| parents.iter().map(|p| (*p).clone()).collect());

        // the remaining k + 1 vertices can be guarded directly: S starts a
        // winning strategy for the whole graph
        if s.cardinality() + k + 1 >= self.n {
            if s.cardinality() < self.n {
                let all = BitSet::new_all_set(self.n);
                self.glue.insert(all, vec![s]);
            }
            return true;
        }

        self.sequence += 1;
        self.queue.push(RankedConfiguration {
            configuration: s.clone(),
            sequence: self.sequence,
        });
        self.memory.insert(&s);
        false
    }

    fn extract_tree_decomposition(&self) -> TreeDecomposition {
        let mut td = TreeDecomposition::default();
        let all = BitSet::new_all_set(self.n);
        self.extract_bag(&all, None, &mut td);
        td
    }

    fn extract_bag(&self, s: &BitSet, parent: Option<usize>, td: &mut TreeDecomposition) {
        let predecessors = &self.glue[s];
        let mut vertices = s.clone();
        for p in predecessors {
            vertices.and_not(p);
        }
        vertices.or(&self.graph.exterior_border(s));

        let bag = td.add_bag(self.translate_vertex_set(&vertices));
        if let Some(parent) = parent {
            td.add_edge(parent, bag);
        }
        for child in predecessors {
            self.extract_bag(child, Some(bag), td);
        }
    }

    fn translate_vertex_set(&self, vertex_set: &BitSet) -> FnvHashSet<usize> {
        vertex_set
            .iter()
            .map(|v| self.self_to_og[v] as usize)
            .collect()
    }
}

impl<G: Graph> ExactSolver<G> for CleanAndGlue {
    fn with_graph(graph: &G) -> Self {
        Self::new(graph)
    }

    fn with_bounds(graph: &G, lowerbound: usize, upperbound: usize) -> Self {
        Self::new(graph)
            .lowerbound(lowerbound)
            .upper_bound(Some(upperbound))
    }

    fn compute_exact(self) -> Result<TreeDecomposition, CleanAndGlueError> {
        self.compute()
    }
}
