use coppice::graph::HashMapGraph;
use coppice::io::{PaceReader, PaceWriter};
use coppice::log::build_pace_logger;
use coppice::signals;
use coppice::solver::SolverBuilder;
use log::info;
use std::convert::TryFrom;
use std::io;
use std::io::stdin;
use std::process::exit;

fn main() -> io::Result<()> {
    build_pace_logger();
    let cancelled = signals::initialize();

    let graph: HashMapGraph = {
        let buffer = stdin();
        let reader = PaceReader(buffer.lock());
        HashMapGraph::try_from(reader)?
    };

    let solver = SolverBuilder::new().cancellation_flag(cancelled).build();
    match solver.solve(&graph) {
        Ok(td) => {
            info!(
                "width {} ({})",
                td.width(),
                solver.decomposition_quality()
            );
            let stdout = io::stdout();
            PaceWriter::new(&td, &graph, stdout.lock()).output()
        }
        Err(e) => {
            eprintln!("c {}", e);
            exit(1);
        }
    }
}
