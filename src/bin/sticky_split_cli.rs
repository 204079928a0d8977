//! Replays a scroll scenario and reports what the layout produced at each offset.
//!
//! Usage:
//!   sticky_split_cli <scenario.json>                 # frames as JSON on stdout
//!   sticky_split_cli <scenario.json> -o frames.json  # frames written to a file
//!   sticky_split_cli <scenario.json> --summary       # one line per offset
//!
//! Set `RUST_LOG=sticky_split=debug` to see invalidation and prepare logs.

#![allow(clippy::exit)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use sticky_split::{ElementKind, FrameSnapshot, Scenario};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: sticky_split_cli <scenario.json> [-o frames.json | --summary]";

enum Output {
    Stdout,
    File(String),
    Summary,
}

fn summary_line(snapshot: &FrameSnapshot) -> String {
    let count = |kind| {
        snapshot
            .attributes
            .iter()
            .filter(|a| a.kind == kind)
            .count()
    };
    let main = snapshot
        .attributes
        .iter()
        .find(|a| a.kind == ElementKind::MainHeader)
        .map_or_else(
            || "none".to_string(),
            |a| {
                format!(
                    "{}x{} at ({}, {}) z={}",
                    a.frame.width, a.frame.height, a.frame.x, a.frame.y, a.z_index
                )
            },
        );
    format!(
        "offset ({}, {}) {} content {}x{}: {} cells, {} headers, {} footers, main header {}",
        snapshot.offset.x,
        snapshot.offset.y,
        snapshot.mode,
        snapshot.content_size.width,
        snapshot.content_size.height,
        count(ElementKind::Cell),
        count(ElementKind::SectionHeader),
        count(ElementKind::SectionFooter),
        main
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let scenario_path = &args[1];
    let output = match args.get(2).map(String::as_str) {
        None => Output::Stdout,
        Some("--summary") => Output::Summary,
        Some("-o") if args.len() > 3 => Output::File(args[3].clone()),
        Some(_) => {
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    let scenario = match Scenario::from_path(scenario_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading scenario {scenario_path}: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        offsets = scenario.offsets.len(),
        sections = scenario.sections.0.len(),
        "replaying scenario"
    );
    let snapshots = scenario.run();

    if let Output::Summary = output {
        for snapshot in &snapshots {
            println!("{}", summary_line(snapshot));
        }
        return;
    }

    let json = match serde_json::to_string_pretty(&snapshots) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing frames: {e}");
            std::process::exit(1);
        }
    };

    match output {
        Output::File(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing frames to {path}: {e}");
                std::process::exit(1);
            }
            let mut modes: Vec<String> = snapshots.iter().map(|s| s.mode.to_string()).collect();
            modes.dedup();
            eprintln!(
                "Replayed {} offsets ({}) -> {path}",
                snapshots.len(),
                modes.join(", ")
            );
        }
        Output::Stdout | Output::Summary => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{json}") {
                eprintln!("Error writing frames: {e}");
                std::process::exit(1);
            }
        }
    }
}
