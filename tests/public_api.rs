use latency_globe::api::{cloud_regions, exchanges};
use latency_globe::{
    build_overlays, estimate_latency, generate_circle, haversine_km, parse_probes, CircleCache, DashboardConfig,
    GeoError, GeoPoint, LocationFilter, Probe, ProbeStatus, Winding,
};

#[test]
fn circle_around_every_region_is_closed_and_on_radius() {
    for region in cloud_regions() {
        let circle = generate_circle(region.position, 250.0, 32).unwrap();
        assert_eq!(circle.len(), 33);
        assert_eq!(circle.points().first(), circle.points().last());
        assert_eq!(circle.winding(), Winding::Clockwise);
        for vertex in circle.points() {
            let d = haversine_km(region.position, *vertex);
            assert!((d - 250.0).abs() <= 2.5, "{} is {} km from {}", vertex, d, region.id);
        }
    }
}

#[test]
fn invalid_circle_arguments_are_rejected() {
    let center = GeoPoint::new(10.0, 10.0);
    assert!(matches!(generate_circle(center, 0.0, 32), Err(GeoError::InvalidArgument { .. })));
    assert!(matches!(generate_circle(center, 50.0, 0), Err(GeoError::InvalidArgument { .. })));
}

#[test]
fn snapshot_drives_latency_estimates() {
    let snapshot = parse_probes(
        r#"[
            {"status": "ready", "location": {"latitude": 51.51, "longitude": -0.13}, "stats": {"rtt": 4.0}},
            {"status": "ready", "location": {"latitude": 50.85, "longitude": 4.35}, "stats": {"rtt": 8.0}},
            {"status": "ready", "location": {"latitude": 48.85, "longitude": 2.35}, "stats": {"rtt": 12.0}},
            {"status": "ready", "location": {"latitude": 35.69, "longitude": 139.69}, "stats": {"rtt": 900.0}},
            {"status": "disconnected", "location": {"latitude": 51.5074, "longitude": -0.1278}, "stats": {"rtt": 1.0}}
        ]"#,
    )
    .unwrap();

    let london = GeoPoint::new(51.5074, -0.1278);
    assert_eq!(estimate_latency(london, &snapshot.probes, 3), 8.0);
    assert_eq!(estimate_latency(london, &[], 3), 100.0);
}

#[test]
fn overlays_for_filtered_catalog() {
    let probes = vec![
        Probe::new("ny", ProbeStatus::Ready, GeoPoint::new(40.71, -74.0), 20.0),
        Probe::new("sg", ProbeStatus::Ready, GeoPoint::new(1.35, 103.82), 180.0),
    ];
    let filter = LocationFilter::new().with_search("hong kong");
    let mut cache = CircleCache::new();

    let overlays = build_overlays(
        &DashboardConfig::default(),
        &filter,
        &cloud_regions(),
        &exchanges(),
        &probes,
        &mut cache,
    )
    .unwrap();

    // Azure (Hong Kong) matches the search, but no exchange name does
    assert_eq!(overlays.polygons.features.len(), 1);
    assert_eq!(overlays.polygons.features[0].properties.id, "azure-eastasia");
    assert!(overlays.arcs.is_empty());
    assert!(overlays.points.is_empty());

    let json = serde_json::to_value(&overlays).unwrap();
    assert_eq!(json["polygons"]["type"], "FeatureCollection");
    assert_eq!(json["heatmap"].as_array().unwrap().len(), 2);
}
