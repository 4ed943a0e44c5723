use relaywire_core::{KeyPair, SearchConfig, SearchTarget, search};
use std::time::Instant;

fn benchmark_key_generation() -> anyhow::Result<()> {
    println!("\n=== Benchmark: Key Pair Generation ===");

    let iterations = 20_000;
    let start = Instant::now();
    for _ in 0..iterations {
        KeyPair::generate()?;
    }

    let duration = start.elapsed();
    println!("  Keys generated: {}", iterations);
    println!("  Time taken: {:.2}s", duration.as_secs_f64());
    println!("  Keys/sec: {:.0}", iterations as f64 / duration.as_secs_f64());
    Ok(())
}

async fn benchmark_search(target: SearchTarget, config: &SearchConfig) -> anyhow::Result<()> {
    println!(
        "\n=== Benchmark: Search for {} ({} workers) ===",
        target,
        config.worker_count()
    );

    let rounds = 5;
    let start = Instant::now();
    for _ in 0..rounds {
        search(&target, config).await?;
    }

    let duration = start.elapsed();
    println!("  Searches: {}", rounds);
    println!("  Time taken: {:.2}s", duration.as_secs_f64());
    println!(
        "  Avg time per search: {:.2}ms",
        duration.as_millis() as f64 / rounds as f64
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    println!("╔════════════════════════════════════════════════╗");
    println!("║     Relaywire Key Search Performance Tests     ║");
    println!("╚════════════════════════════════════════════════╝");

    benchmark_key_generation()?;

    let single = SearchConfig::with_workers(1);
    let parallel = SearchConfig::default();

    benchmark_search(SearchTarget::HexPrefix("abc".to_string()), &single).await?;
    benchmark_search(SearchTarget::HexPrefix("abc".to_string()), &parallel).await?;
    benchmark_search(SearchTarget::Bech32Prefix("xy".to_string()), &parallel).await?;
    benchmark_search(SearchTarget::LeadingZeroBits(12), &parallel).await?;

    println!("\n✅ Key search benchmarks complete!");
    Ok(())
}
