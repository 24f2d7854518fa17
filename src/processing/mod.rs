//! Probe snapshot decoding, caching and latency simulation

pub mod parser;
pub mod cache;
pub mod simulator;

pub use parser::{load_probes, parse_probes, ProbeSnapshot};
pub use cache::{BaseLatencyCache, CircleCache};
pub use simulator::{calculate_stats, HistoricalDataPoint, LatencySimulator, LatencyStats, MockLatency, TimeRange};
