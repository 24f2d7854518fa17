//! Dashboard-facing data: location catalog, overlays and GeoJSON output

pub mod catalog;
pub mod geojson;
pub mod overlays;

pub use catalog::{cloud_regions, exchanges};
pub use geojson::{FeatureCollection, PolygonFeature};
pub use overlays::{
    build_overlays, heatmap_points, latency_arcs, region_polygons, topology_arcs, volume_rings, ArcData,
    GlobeOverlays, HeatmapPoint, LocationFilter, RingData,
};
