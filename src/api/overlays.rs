//! Render-ready overlay records for the globe
//!
//! Everything here is derived from the location catalog, the current probe
//! snapshot and the dashboard configuration. Records are rebuilt wholesale
//! whenever any of those change.

use crate::algorithms::aggregator::ProbeLatencyAggregator;
use crate::api::geojson::{FeatureCollection, PolygonFeature};
use crate::core::{GeoPoint, LatencyBand, LatencyThresholds, LocationPoint, Probe, Provider};
use crate::processing::cache::CircleCache;
use crate::utils::config::DashboardConfig;
use crate::validation::error::GeoResult;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

const TOPOLOGY_COLOR: &str = "rgba(136, 132, 216, 0.4)";
const RING_OPACITY: f64 = 0.6;

/// Connection drawn between two locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcData {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub color: String,
    pub label: String,
    /// Mean endpoint latency; absent for topology arcs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
    /// False when either endpoint fell back to the no-data latency
    pub measured: bool,
}

impl ArcData {
    fn between(start: GeoPoint, end: GeoPoint, color: String, label: String) -> Self {
        Self {
            start_lat: start.latitude,
            start_lng: start.longitude,
            end_lat: end.latitude,
            end_lng: end.longitude,
            color,
            label,
            latency_ms: None,
            measured: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    /// Round-trip time in hundreds of milliseconds
    pub val: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingData {
    pub lat: f64,
    pub lng: f64,
    pub color: String,
}

/// Provider toggles plus a case-insensitive name search
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFilter {
    providers: HashSet<Provider>,
    search: String,
}

impl Default for LocationFilter {
    fn default() -> Self {
        Self {
            providers: Provider::ALL.iter().copied().collect(),
            search: String::new(),
        }
    }
}

impl LocationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_lowercase();
        self
    }

    pub fn set_provider(&mut self, provider: Provider, enabled: bool) {
        if enabled {
            self.providers.insert(provider);
        } else {
            self.providers.remove(&provider);
        }
    }

    pub fn without_provider(mut self, provider: Provider) -> Self {
        self.set_provider(provider, false);
        self
    }

    pub fn matches_name(&self, provider: Provider, name: &str) -> bool {
        self.providers.contains(&provider) && name.to_lowercase().contains(&self.search)
    }

    pub fn matches(&self, location: &LocationPoint) -> bool {
        self.matches_name(location.provider, &location.name)
    }

    pub fn apply(&self, locations: &[LocationPoint]) -> Vec<LocationPoint> {
        locations.iter().filter(|l| self.matches(l)).cloned().collect()
    }
}

/// Boundary polygons for each region, circles served from `cache`
pub fn region_polygons(
    regions: &[LocationPoint],
    radius_km: f64,
    point_count: usize,
    cache: &mut CircleCache,
) -> GeoResult<Vec<PolygonFeature>> {
    regions
        .iter()
        .map(|region| -> GeoResult<PolygonFeature> {
            let circle = cache.get_or_generate(region.position, radius_km, point_count)?;
            Ok(PolygonFeature::from_circle(region, circle))
        })
        .collect()
}

/// Arc from every region to every exchange with a distinct id.
///
/// The arc latency is the mean of both endpoint estimates.
pub fn latency_arcs(
    regions: &[LocationPoint],
    exchanges: &[LocationPoint],
    probes: &[Probe],
    aggregator: &ProbeLatencyAggregator,
    thresholds: &LatencyThresholds,
) -> Vec<ArcData> {
    let mut arcs = Vec::with_capacity(regions.len() * exchanges.len());

    for region in regions {
        let region_estimate = aggregator.estimate_detailed(region.position, probes);
        for exchange in exchanges {
            if region.id == exchange.id {
                continue;
            }
            let exchange_estimate = aggregator.estimate_detailed(exchange.position, probes);

            let fallback = aggregator.fallback_ms();
            let latency = (region_estimate.or_fallback(fallback) + exchange_estimate.or_fallback(fallback)) / 2.0;
            let measured = region_estimate.is_measured() && exchange_estimate.is_measured();
            let band = LatencyBand::classify(latency, thresholds);

            let label = if measured {
                format!("{} to {}: {:.1} ms", region.name, exchange.name, latency)
            } else {
                format!("{} to {}: {:.1} ms (no probe data)", region.name, exchange.name, latency)
            };

            let mut arc = ArcData::between(region.position, exchange.position, band.color().to_string(), label);
            arc.latency_ms = Some(latency);
            arc.measured = measured;
            arcs.push(arc);
        }
    }
    arcs
}

/// Arc between every unordered pair of exchanges
pub fn topology_arcs(exchanges: &[LocationPoint]) -> Vec<ArcData> {
    let mut arcs = Vec::new();
    for (i, first) in exchanges.iter().enumerate() {
        for second in &exchanges[i + 1..] {
            arcs.push(ArcData::between(
                first.position,
                second.position,
                TOPOLOGY_COLOR.to_string(),
                format!("{} <-> {} (Topology)", first.name, second.name),
            ));
        }
    }
    arcs
}

/// One heatmap sample per usable probe
pub fn heatmap_points(probes: &[Probe]) -> Vec<HeatmapPoint> {
    probes
        .iter()
        .filter(|p| p.is_usable())
        .map(|p| HeatmapPoint {
            lat: p.location.latitude,
            lng: p.location.longitude,
            val: p.round_trip_time_ms / 100.0,
        })
        .collect()
}

/// Pulsing rings marking exchange sites
pub fn volume_rings(exchanges: &[LocationPoint]) -> Vec<RingData> {
    exchanges
        .iter()
        .map(|e| RingData {
            lat: e.position.latitude,
            lng: e.position.longitude,
            color: e.provider.color(RING_OPACITY),
        })
        .collect()
}

/// Full overlay set for one render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobeOverlays {
    pub points: Vec<LocationPoint>,
    pub arcs: Vec<ArcData>,
    pub polygons: FeatureCollection,
    pub heatmap: Vec<HeatmapPoint>,
    pub rings: Vec<RingData>,
}

/// Build every overlay enabled in `config` for the filtered catalog.
///
/// Latency arcs are only drawn once a probe snapshot is available. Region
/// markers are hidden while their boundary polygons are shown.
pub fn build_overlays(
    config: &DashboardConfig,
    filter: &LocationFilter,
    regions: &[LocationPoint],
    exchanges: &[LocationPoint],
    probes: &[Probe],
    cache: &mut CircleCache,
) -> GeoResult<GlobeOverlays> {
    let visible_regions = filter.apply(regions);
    let visible_exchanges = filter.apply(exchanges);

    let polygons = if config.show_region_boundaries {
        region_polygons(&visible_regions, config.region_radius_km, config.circle_points, cache)?
    } else {
        Vec::new()
    };

    let mut arcs = if probes.is_empty() {
        Vec::new()
    } else {
        let aggregator = ProbeLatencyAggregator::new(config.probe_sample_size, config.fallback_latency_ms);
        latency_arcs(&visible_regions, &visible_exchanges, probes, &aggregator, &config.latency_thresholds)
    };
    if config.show_topology {
        arcs.extend(topology_arcs(&visible_exchanges));
    }

    let heatmap = if config.show_heatmap { heatmap_points(probes) } else { Vec::new() };
    let rings = if config.show_volume { volume_rings(&visible_exchanges) } else { Vec::new() };

    let mut points = if config.show_region_boundaries { Vec::new() } else { visible_regions.clone() };
    points.extend(visible_exchanges.iter().cloned());

    debug!(
        regions = visible_regions.len(),
        exchanges = visible_exchanges.len(),
        arcs = arcs.len(),
        polygons = polygons.len(),
        "built globe overlays"
    );

    Ok(GlobeOverlays {
        points,
        arcs,
        polygons: FeatureCollection::new(polygons),
        heatmap,
        rings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::catalog::{cloud_regions, exchanges};
    use crate::core::ProbeStatus;

    fn probe(id: &str, lat: f64, lng: f64, rtt: f64) -> Probe {
        Probe::new(id, ProbeStatus::Ready, GeoPoint::new(lat, lng), rtt)
    }

    #[test]
    fn test_filter_by_provider_and_search() {
        let regions = cloud_regions();
        let filter = LocationFilter::new().with_search("LONDON");
        let visible = filter.apply(&regions);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "aws-eu-west-2");

        let no_aws = LocationFilter::new().without_provider(Provider::Aws);
        assert!(no_aws.apply(&regions).iter().all(|r| r.provider != Provider::Aws));
        assert_eq!(no_aws.apply(&regions).len(), 4);
    }

    #[test]
    fn test_latency_arcs_skip_identical_ids_and_average_endpoints() {
        let region = LocationPoint {
            id: "shared".to_string(),
            name: "Region".to_string(),
            provider: Provider::Aws,
            site: None,
            position: GeoPoint::new(0.0, 0.0),
        };
        let same_id = LocationPoint { name: "Twin".to_string(), ..region.clone() };
        let exchange = LocationPoint {
            id: "ex".to_string(),
            name: "Exchange".to_string(),
            provider: Provider::Colo,
            site: Some("Somewhere".to_string()),
            position: GeoPoint::new(0.0, 90.0),
        };
        let probes = vec![probe("a", 0.0, 0.5, 20.0), probe("b", 0.0, 89.5, 200.0)];
        let aggregator = ProbeLatencyAggregator::new(1, 100.0);

        let arcs = latency_arcs(
            &[region],
            &[same_id, exchange],
            &probes,
            &aggregator,
            &LatencyThresholds::default(),
        );
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].latency_ms, Some(110.0));
        assert!(arcs[0].measured);
        assert_eq!(arcs[0].color, LatencyBand::Medium.color());
        assert_eq!(arcs[0].label, "Region to Exchange: 110.0 ms");
    }

    #[test]
    fn test_arcs_flag_fallback_latency() {
        let regions = cloud_regions();
        let exchanges = exchanges();
        let offline = vec![Probe::new("x", ProbeStatus::Other("offline".into()), GeoPoint::new(0.0, 0.0), 5.0)];
        let arcs = latency_arcs(
            &regions[..1],
            &exchanges[..1],
            &offline,
            &ProbeLatencyAggregator::default(),
            &LatencyThresholds::default(),
        );
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].latency_ms, Some(100.0));
        assert!(!arcs[0].measured);
        assert!(arcs[0].label.ends_with("(no probe data)"));
    }

    #[test]
    fn test_topology_arcs_cover_each_pair_once() {
        let exchanges = exchanges();
        let arcs = topology_arcs(&exchanges);
        let n = exchanges.len();
        assert_eq!(arcs.len(), n * (n - 1) / 2);
        assert_eq!(arcs[0].label, "Deribit <-> Binance (APAC) (Topology)");
        assert!(arcs.iter().all(|a| a.latency_ms.is_none()));
    }

    #[test]
    fn test_heatmap_uses_usable_probes() {
        let probes = vec![
            probe("a", 1.0, 2.0, 150.0),
            probe("b", 3.0, 4.0, 0.0),
            Probe::new("c", ProbeStatus::Other("offline".into()), GeoPoint::new(5.0, 6.0), 10.0),
        ];
        let points = heatmap_points(&probes);
        assert_eq!(points, vec![HeatmapPoint { lat: 1.0, lng: 2.0, val: 1.5 }]);
    }

    #[test]
    fn test_build_overlays_respects_toggles() {
        let regions = cloud_regions();
        let exchanges = exchanges();
        let probes = vec![probe("london", 51.5, -0.1, 8.0), probe("tokyo", 35.7, 139.7, 15.0)];
        let mut cache = CircleCache::new();

        let config = DashboardConfig::default();
        let overlays = build_overlays(&config, &LocationFilter::new(), &regions, &exchanges, &probes, &mut cache).unwrap();
        assert_eq!(overlays.polygons.features.len(), regions.len());
        // Regions are drawn as polygons, so only exchanges are points
        assert_eq!(overlays.points.len(), exchanges.len());
        assert_eq!(overlays.arcs.len(), regions.len() * exchanges.len());
        assert_eq!(overlays.heatmap.len(), 2);
        assert!(overlays.rings.is_empty());

        let config = DashboardConfig {
            show_region_boundaries: false,
            show_heatmap: false,
            show_topology: true,
            show_volume: true,
            ..DashboardConfig::default()
        };
        let overlays = build_overlays(&config, &LocationFilter::new(), &regions, &exchanges, &[], &mut cache).unwrap();
        assert!(overlays.polygons.features.is_empty());
        assert_eq!(overlays.points.len(), regions.len() + exchanges.len());
        // No probes yet: only topology arcs
        assert_eq!(overlays.arcs.len(), exchanges.len() * (exchanges.len() - 1) / 2);
        assert!(overlays.heatmap.is_empty());
        assert_eq!(overlays.rings.len(), exchanges.len());
    }

    #[test]
    fn test_region_polygons_reuse_cache() {
        let regions = cloud_regions();
        let mut cache = CircleCache::new();
        region_polygons(&regions, 250.0, 32, &mut cache).unwrap();
        region_polygons(&regions, 250.0, 32, &mut cache).unwrap();
        let (hits, misses, _) = cache.get_statistics();
        assert_eq!(misses, regions.len());
        assert_eq!(hits, regions.len());
    }
}
