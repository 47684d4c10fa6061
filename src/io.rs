use crate::graph::{Graph, HashMapGraph, MutableGraph};
use crate::tree_decomposition::TreeDecomposition;
use std::convert::TryFrom;
use std::io::{BufRead, Error, ErrorKind, Write};

/// Reader for PACE 2017 `.gr` files: a `p tw <n> <m>` header followed by one
/// `<u> <v>` line per edge, with 1-based vertex labels.
pub struct PaceReader<T: BufRead>(pub T);

impl<T: BufRead> TryFrom<PaceReader<T>> for HashMapGraph {
    type Error = Error;

    fn try_from(reader: PaceReader<T>) -> Result<Self, Self::Error> {
        let mut graph: Option<HashMapGraph> = None;
        let mut order: Option<usize> = None;
        for line in reader.0.lines() {
            let line = line?;
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("c") | None => {}
                Some("p") => {
                    if graph.is_some() {
                        return Err(invalid_input("duplicate problem line"));
                    }
                    let n = parse_order(tokens)?;
                    order = Some(n);
                    let mut g = HashMapGraph::with_capacity(n);
                    (0..n).for_each(|v| g.add_vertex(v));
                    graph = Some(g);
                }
                Some(token) => match (graph.as_mut(), order) {
                    (Some(graph), Some(order)) => {
                        let u = parse_vertex(token, order)?;
                        let v = parse_vertex(
                            tokens
                                .next()
                                .ok_or_else(|| invalid_input("edge line with one endpoint"))?,
                            order,
                        )?;
                        if u == v {
                            return Err(invalid_input("self loop"));
                        }
                        graph.add_edge(u, v);
                    }
                    _ => {
                        return Err(invalid_input("edge encountered before problem line"));
                    }
                },
            }
        }
        graph.ok_or_else(|| invalid_input("no problem line"))
    }
}

fn invalid_input(message: &str) -> Error {
    Error::new(ErrorKind::InvalidInput, message)
}

fn parse_vertex(token: &str, order: usize) -> Result<usize, Error> {
    match token.parse::<usize>() {
        Ok(u) if u >= 1 && u <= order => Ok(u - 1),
        _ => Err(invalid_input("invalid vertex label")),
    }
}

fn parse_order<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<usize, Error> {
    match tokens.next() {
        Some("tw") => {}
        _ => return Err(invalid_input("expected problem descriptor tw")),
    }
    tokens
        .next()
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(|| invalid_input("invalid order"))
}

/// Writer for PACE 2017 `.td` files.
pub struct PaceWriter<'a, 'b: 'a, T: Write> {
    tree_decomposition: &'a TreeDecomposition,
    graph: &'b HashMapGraph,
    writer: T,
}

impl<'a, 'b: 'a, T: Write> PaceWriter<'a, 'b, T> {
    pub fn new(
        tree_decomposition: &'a TreeDecomposition,
        graph: &'b HashMapGraph,
        writer: T,
    ) -> Self {
        Self {
            tree_decomposition,
            graph,
            writer,
        }
    }

    pub fn output(mut self) -> Result<(), Error> {
        writeln!(
            self.writer,
            "s td {} {} {}",
            self.tree_decomposition.bags.len(),
            self.tree_decomposition.max_bag_size,
            self.graph.order()
        )?;
        for bag in self.tree_decomposition.bags() {
            let mut vertices: Vec<_> = bag.vertex_set.iter().copied().collect();
            vertices.sort_unstable();
            let line = vertices
                .iter()
                .map(|v| (v + 1).to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer, "b {} {}", bag.id + 1, line)?;
        }
        for bag in self.tree_decomposition.bags() {
            for other in bag.neighbors.iter().copied().filter(|o| *o > bag.id) {
                writeln!(self.writer, "{} {}", bag.id + 1, other + 1)?;
            }
        }
        Ok(())
    }
}
