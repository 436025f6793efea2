// Suggestion CLI Entry Point
//
// Purpose: Load the species catalog, score one soil sample, run a batch over
//          mock zones, and print everything as JSON.
// Usage:   cargo run --bin suggest_cli -- [acidity humidity moisture [sort]]
//          CATALOG_PATH=data/trees_data.json MOCK_SEED=42 cargo run --bin suggest_cli

use rand::rngs::StdRng;
use rand::SeedableRng;
use soil_scorer_rust::sampling::mock_zones;
use soil_scorer_rust::{
    Catalog, EngineConfig, QueryOptions, SoilReading, SortKey, SuggestionEngine,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soil_scorer_rust=info,suggest_cli=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  CATALOG_PATH: {:?}", config.catalog_path);
    tracing::info!("  MOCK_ZONES: {}", config.mock_zones);
    tracing::info!("  MOCK_SEED: {:?}", config.mock_seed);

    let catalog = Catalog::load_or_empty(&config.catalog_path);
    let engine = SuggestionEngine::new(catalog);
    println!("{}", serde_json::to_string_pretty(&engine.catalog().health())?);

    // Single sample: from args, or a neutral default
    let args: Vec<String> = std::env::args().skip(1).collect();
    let reading = match args.as_slice() {
        [] => SoilReading::new(Some(6.5), Some(50.0), Some(35.0)),
        [a, h, m, ..] => SoilReading::new(Some(a.parse()?), Some(h.parse()?), Some(m.parse()?)),
        _ => anyhow::bail!("usage: suggest_cli [acidity humidity moisture [score|name|lifespan]]"),
    };
    let sort_key = args.get(3).map(|s| SortKey::parse(s)).unwrap_or_default();
    let options = QueryOptions::default().with_max_results(5).with_sort_key(sort_key);

    match engine.suggest(&reading, &options) {
        Ok(result) => {
            tracing::info!(
                "Found {} compatible species, top: {}",
                result.total_found,
                result.suggestions.first().map(|s| s.name.as_str()).unwrap_or("none")
            );
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Err(e) => tracing::error!("Invalid sample: {}", e),
    }

    // Batch over mock zones
    let mut rng = match config.mock_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let zones = mock_zones(config.mock_zones, &mut rng);
    let batch = engine.suggest_for_zones(&zones);
    tracing::info!("Processed zones: {} / {}", batch.processed_zones, batch.total_zones);
    println!("{}", serde_json::to_string_pretty(&batch)?);

    match engine.summarize(&zones) {
        Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
        None => tracing::warn!("No valid soil data found in zones"),
    }

    Ok(())
}
