use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Logger whose every line is a PACE comment (`c `-prefixed), so diagnostics
/// can share a stream with solver output.
pub fn build_pace_logger_for_level(level: LevelFilter) {
    pace_builder().filter(None, level).init();
}

/// Like [`build_pace_logger_for_level`], with the level taken from the
/// environment (`RUST_LOG`).
pub fn build_pace_logger() {
    pace_builder().init();
}

fn pace_builder() -> Builder {
    let mut builder = Builder::from_default_env();
    builder.format(|buf, record| writeln!(buf, "c {} - {}", record.level(), record.args()));
    builder
}
