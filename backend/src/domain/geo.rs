//! Geo-ranking engine: distance-ordered, paginated store listings.
//!
//! Distances are an integer-truncated planar (equirectangular) metric in
//! metres. At city scale the approximation error against great-circle
//! distance is far below the 1 m truncation granularity.

use crate::domain::models::store::Store;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Integer-truncated planar distance in metres between two `(longitude,
/// latitude)` points in degrees.
pub fn planar_distance_m(origin: (f64, f64), target: (f64, f64)) -> i64 {
    let (lon1, lat1) = origin;
    let (lon2, lat2) = target;
    let mean_lat = ((lat1 + lat2) / 2.0).to_radians();
    let x = (lon2 - lon1).to_radians() * mean_lat.cos();
    let y = (lat2 - lat1).to_radians();
    (EARTH_RADIUS_M * (x * x + y * y).sqrt()) as i64
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedStore {
    pub store: Store,
    pub distance_m: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedPage {
    pub stores: Vec<RankedStore>,
    /// Size of the candidate set the page was cut from.
    pub total: usize,
    pub has_more: bool,
}

/// Rank `candidates` by ascending distance from `origin` and slice out the
/// requested page.
///
/// Ties are broken by store id so equidistant stores are kept and ordered
/// deterministically. A page past the end of the candidate set is an empty
/// slice, not an error, and an empty candidate set is a valid empty result.
pub fn rank(origin: (f64, f64), candidates: Vec<Store>, page: usize, size: usize) -> RankedPage {
    let total = candidates.len();

    let mut ranked: Vec<RankedStore> = candidates
        .into_iter()
        .map(|store| RankedStore {
            distance_m: planar_distance_m(origin, (store.longitude, store.latitude)),
            store,
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.distance_m
            .cmp(&b.distance_m)
            .then_with(|| a.store.id.cmp(&b.store.id))
    });

    let start = page.saturating_mul(size);
    let stores: Vec<RankedStore> = if start >= total {
        Vec::new()
    } else {
        ranked.into_iter().skip(start).take(size).collect()
    };
    let has_more = start + stores.len() < total;

    RankedPage {
        stores,
        total,
        has_more,
    }
}
