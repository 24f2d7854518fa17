use chrono::Utc;
use clap::Parser;
use latency_globe::api::{cloud_regions, exchanges};
use latency_globe::processing::{calculate_stats, load_probes};
use latency_globe::{
    build_overlays, CircleCache, ConfigurationManager, LatencySimulator, LocationFilter, TimeRange,
};
use tracing::{info, warn, Level};

/// Compute globe overlays for the exchange latency dashboard
#[derive(Parser, Debug)]
#[command(name = "latency-globe", version)]
struct Args {
    /// Dashboard configuration (JSON)
    #[arg(long)]
    config: Option<String>,

    /// Probe snapshot (JSON probe list)
    #[arg(long)]
    probes: Option<String>,

    /// Case-insensitive location name filter
    #[arg(long, default_value = "")]
    search: String,

    /// Simulate history for a FROM and TO location id pair
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    history: Option<Vec<String>>,

    /// History window: 1h, 24h, 7d or 30d
    #[arg(long, default_value = "24h")]
    range: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let manager = match &args.config {
        Some(path) => ConfigurationManager::from_file(path)?,
        None => ConfigurationManager::new(),
    };
    let config = manager.config().clone();

    tracing_subscriber::fmt()
        .with_max_level(if config.debug_logging { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let probes = match &args.probes {
        Some(path) => {
            let snapshot = load_probes(path)?;
            if snapshot.skipped > 0 {
                warn!(skipped = snapshot.skipped, "some probe entries could not be decoded");
            }
            info!(probes = snapshot.probes.len(), usable = snapshot.usable().count(), "loaded probe snapshot");
            snapshot.probes
        }
        None => {
            info!("no probe snapshot given, latency arcs are disabled");
            Vec::new()
        }
    };

    let regions = cloud_regions();
    let exchanges = exchanges();
    let filter = LocationFilter::new().with_search(&args.search);
    let mut cache = CircleCache::new();

    let overlays = build_overlays(&config, &filter, &regions, &exchanges, &probes, &mut cache)?;
    info!(
        points = overlays.points.len(),
        arcs = overlays.arcs.len(),
        polygons = overlays.polygons.features.len(),
        heatmap = overlays.heatmap.len(),
        rings = overlays.rings.len(),
        "overlays ready"
    );

    for arc in overlays.arcs.iter().filter(|a| a.latency_ms.is_some()) {
        info!("{}", arc.label);
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(&overlays)?
    } else {
        serde_json::to_string(&overlays)?
    };
    println!("{}", output);

    if let Some(pair) = &args.history {
        let (from, to) = (&pair[0], &pair[1]);
        let range = TimeRange::from_label(&args.range);
        let mut simulator = LatencySimulator::new().with_thresholds(config.latency_thresholds);
        let series = simulator.historical_data(from, to, range, Utc::now());
        let stats = calculate_stats(&series);
        info!(
            from = %from,
            to = %to,
            range = range.label(),
            samples = series.len(),
            min = stats.min,
            max = stats.max,
            avg = stats.avg,
            "simulated latency history"
        );
    }

    Ok(())
}
