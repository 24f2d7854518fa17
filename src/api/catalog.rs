//! Built-in cloud regions and exchange sites

use crate::core::{GeoPoint, LocationPoint, Provider};

fn location(id: &str, name: &str, provider: Provider, site: Option<&str>, lat: f64, lng: f64) -> LocationPoint {
    LocationPoint {
        id: id.to_string(),
        name: name.to_string(),
        provider,
        site: site.map(str::to_string),
        position: GeoPoint::new(lat, lng),
    }
}

/// Cloud provider regions
pub fn cloud_regions() -> Vec<LocationPoint> {
    vec![
        location("aws-us-east-1", "AWS (N. Virginia)", Provider::Aws, None, 38.9072, -77.0369),
        location("aws-eu-west-2", "AWS (London)", Provider::Aws, None, 51.5074, -0.1278),
        location("aws-ap-northeast-1", "AWS (Tokyo)", Provider::Aws, None, 35.6895, 139.6917),
        location("gcp-us-central1", "GCP (Iowa)", Provider::Gcp, None, 41.8863, -93.6231),
        location("gcp-europe-west1", "GCP (Belgium)", Provider::Gcp, None, 50.8503, 4.3517),
        location("azure-westus2", "Azure (Washington)", Provider::Azure, None, 47.7511, -120.7401),
        location("azure-eastasia", "Azure (Hong Kong)", Provider::Azure, None, 22.3193, 114.1694),
    ]
}

/// Exchange matching engines and where they are hosted
pub fn exchanges() -> Vec<LocationPoint> {
    vec![
        location("deribit", "Deribit", Provider::Colo, Some("Equinix LD4, London, UK"), 51.5074, -0.1278),
        location("binance", "Binance (APAC)", Provider::Aws, Some("AWS ap-northeast-1, Tokyo"), 35.6895, 139.6917),
        location("bybit", "Bybit", Provider::Aws, Some("AWS ap-southeast-1, Singapore"), 1.3521, 103.8198),
        location("okx", "OKX", Provider::Gcp, Some("GCP asia-east2, Hong Kong"), 22.3193, 114.1694),
        location("coinbase", "Coinbase", Provider::Aws, Some("AWS us-east-1, N. Virginia"), 38.9072, -77.0369),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_coordinates_valid() {
        let all: Vec<_> = cloud_regions().into_iter().chain(exchanges()).collect();
        let ids: HashSet<_> = all.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), all.len());
        for loc in &all {
            assert!(GeoPoint::try_new(loc.position.latitude, loc.position.longitude).is_ok());
        }
    }

    #[test]
    fn test_regions_are_cloud_hosted() {
        assert!(cloud_regions().iter().all(|r| r.provider != Provider::Colo && r.site.is_none()));
        assert!(exchanges().iter().all(|e| e.site.is_some()));
    }
}
