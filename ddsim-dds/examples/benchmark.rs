use ddsim_core::{DealGenerator, Position};
use ddsim_dds::{BridgeSolverBackend, SolveScope, SolverAdapter, DEFAULT_MAX_BATCH};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

fn main() {
    let mut gen = DealGenerator::new(StdRng::seed_from_u64(42));
    let deals = gen.generate_many(10);

    println!("Benchmarking North's five denominations over 10 deals...");
    let adapter = SolverAdapter::new(
        BridgeSolverBackend::new(SolveScope::Declarers(vec![Position::North])),
        DEFAULT_MAX_BATCH,
    );
    let start = Instant::now();
    match adapter.evaluate_batch(&deals) {
        Ok(tables) => {
            let elapsed = start.elapsed();
            println!("{} tables in {:?}", tables.len(), elapsed);
            println!("Per deal: {:?}", elapsed / tables.len() as u32);
        }
        Err(e) => println!("solver failed: {}", e),
    }

    println!("\nBenchmarking full table (20 solves) for one deal...");
    let adapter = SolverAdapter::new(BridgeSolverBackend::default(), DEFAULT_MAX_BATCH);
    let start = Instant::now();
    if let Err(e) = adapter.evaluate_batch(&deals[..1]) {
        println!("solver failed: {}", e);
    }
    let elapsed = start.elapsed();
    println!("solve_all: {:?}", elapsed);
    println!("Per solve: {:?}", elapsed / 20);
}
