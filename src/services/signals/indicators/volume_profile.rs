//! Volume profile: point of control, value area, surge and accumulation.

use std::collections::BTreeMap;

use super::{mean, Indicator, IndicatorCategory};
use crate::types::{MarketSeries, VolumeProfileData};

/// Bars in each of the two windows compared for a volume surge.
const SURGE_WINDOW: usize = 10;
/// Recent volume must exceed the prior window by this factor.
const SURGE_FACTOR: f64 = 1.2;

/// Volume profile over the whole series.
///
/// Prices are bucketed to the nearest 0.5. The point of control is the
/// bucket with the most volume (ties go to the lower price) and the value
/// area is approximated as POC +/- 1%.
#[derive(Default)]
pub struct VolumeProfile;

impl VolumeProfile {
    /// Point of control. Zero when no bucket carries volume.
    fn point_of_control(closes: &[f64], volumes: &[f64]) -> f64 {
        // Bucket key is price * 2 rounded, so bucket `k` is price `k / 2`.
        let mut buckets: BTreeMap<i64, f64> = BTreeMap::new();
        for (price, volume) in closes.iter().zip(volumes) {
            *buckets.entry((price * 2.0).round() as i64).or_default() += volume;
        }

        let mut poc = 0.0;
        let mut max_volume = 0.0;
        for (bucket, volume) in buckets {
            if volume > max_volume {
                max_volume = volume;
                poc = bucket as f64 / 2.0;
            }
        }
        poc
    }

    fn volume_surge(volumes: &[f64]) -> bool {
        if volumes.len() < SURGE_WINDOW * 2 {
            return false;
        }
        let split = volumes.len() - SURGE_WINDOW;
        let recent = mean(&volumes[split..]).unwrap_or(0.0);
        let older = mean(&volumes[split - SURGE_WINDOW..split]).unwrap_or(0.0);
        recent > older * SURGE_FACTOR
    }

    /// Last-bar return weighted by its share of total volume, in percent.
    fn accumulation_distribution(closes: &[f64], volumes: &[f64]) -> f64 {
        let total: f64 = volumes.iter().sum();
        match (closes, volumes.last()) {
            ([.., prev, last], Some(last_volume)) if *prev > 0.0 && total > 0.0 => {
                (last - prev) / prev * last_volume / total * 100.0
            }
            _ => 0.0,
        }
    }
}

impl Indicator for VolumeProfile {
    type Output = VolumeProfileData;

    fn id(&self) -> &str {
        "volume_profile"
    }

    fn name(&self) -> &str {
        "Volume Profile"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volume
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, series: &MarketSeries) -> Option<VolumeProfileData> {
        if !series.volumes_aligned() {
            return None;
        }

        let (closes, volumes) = (series.closes(), series.volumes());
        let poc = Self::point_of_control(closes, volumes);

        Some(VolumeProfileData {
            poc,
            value_area_high: poc * 1.01,
            value_area_low: poc * 0.99,
            volume_surge: Self::volume_surge(volumes),
            accumulation_distribution: Self::accumulation_distribution(closes, volumes),
        })
    }
}
