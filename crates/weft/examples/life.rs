//! Conway's Game of Life on a 4-connected grid, printed as ASCII.
//!
//! Run with `cargo run --example life -- [WIDTHxHEIGHT[:topology]] [generations] [seed]`.
//! Engine diagnostics go through `tracing`; set `RUST_LOG=weft_core=debug`
//! to see every committed transition.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use weft::prelude::*;
use weft_test_utils::run_generation;

fn render(grid: &Grid<CellState>) -> String {
    let mut out = String::with_capacity(grid.len() + grid.height());
    for row in grid.rows() {
        out.extend(row.iter().map(|s| if s.is_alive() { '#' } else { '.' }));
        out.push('\n');
    }
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config: GridConfig = match args.next() {
        Some(shape) => shape.parse::<GridConfig>()?,
        None => GridConfig::new(32, 16, Topology::Torus),
    };
    let generations: usize = args.next().map(|g| g.parse::<usize>()).transpose()?.unwrap_or(8);
    let seed: u64 = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(42);

    let mut grid = config
        .builder::<CellState>()?
        .behavior(conway_factory())
        .sink(Arc::new(TracingSink))
        .build()?;
    let alive = Soup::new(0.4, seed)?.fill(&mut grid)?;
    tracing::info!(%config, seed, alive, "seeded");

    for generation in 0..=generations {
        if generation > 0 {
            run_generation(&mut grid)?;
        }
        let alive = grid.snapshot().iter().filter(|s| s.is_alive()).count();
        println!("generation {generation} ({alive} alive)");
        print!("{}", render(&grid));
    }
    Ok(())
}
