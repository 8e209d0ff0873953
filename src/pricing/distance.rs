use rand::Rng;

use crate::utils::location::normalize_location;

/// Lower bound of the fallback estimate (inclusive)
pub const FALLBACK_MIN_KM: u32 = 50;
/// Width of the fallback range, so estimates fall in [50, 550)
pub const FALLBACK_SPAN_KM: u32 = 500;

/// Known road distances between city pairs, keyed by normalized name.
/// Pairs are ordered; a missing reverse entry falls through to the estimate.
const KNOWN_DISTANCES: &[(&str, &str, u32)] = &[
    ("mumbai", "pune", 150),
    ("mumbai", "delhi", 1400),
    ("mumbai", "bangalore", 980),
    ("delhi", "mumbai", 1400),
    ("delhi", "bangalore", 2150),
    ("delhi", "kolkata", 1470),
    ("bangalore", "mumbai", 980),
    ("bangalore", "delhi", 2150),
    ("bangalore", "chennai", 350),
    ("pune", "mumbai", 150),
    ("pune", "delhi", 1350),
    ("pune", "bangalore", 840),
];

/// Look up the tabulated distance between two locations, if any
pub fn known_distance(pickup: &str, drop: &str) -> Option<u32> {
    let pickup_key = normalize_location(pickup);
    let drop_key = normalize_location(drop);

    KNOWN_DISTANCES
        .iter()
        .find(|(from, to, _)| *from == pickup_key && *to == drop_key)
        .map(|(_, _, km)| *km)
}

/// Estimate the distance in km between two locations.
/// Uses the lookup table when the pair is known, otherwise draws a value
/// uniformly from [50, 550) using `rng`.
pub fn estimate_distance_with<R: Rng>(pickup: &str, drop: &str, rng: &mut R) -> u32 {
    if let Some(km) = known_distance(pickup, drop) {
        return km;
    }

    let km = FALLBACK_MIN_KM + rng.gen_range(0..FALLBACK_SPAN_KM);
    tracing::debug!(pickup, drop, km, "No known distance, using estimate");
    km
}

/// Estimate the distance using the thread-local generator
pub fn estimate_distance(pickup: &str, drop: &str) -> u32 {
    estimate_distance_with(pickup, drop, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_known_pair_with_regions() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            estimate_distance_with("Mumbai, India", "Pune, Maharashtra", &mut rng),
            150
        );
    }

    #[test]
    fn test_every_table_entry_resolves() {
        let mut rng = StdRng::seed_from_u64(1);
        for (from, to, km) in KNOWN_DISTANCES {
            let pickup = format!("{}, India", from.to_uppercase());
            assert_eq!(estimate_distance_with(&pickup, to, &mut rng), *km);
        }
    }

    #[test]
    fn test_table_is_not_symmetric_completed() {
        // kolkata -> delhi and chennai -> bangalore have no entries
        assert_eq!(known_distance("Delhi", "Kolkata"), Some(1470));
        assert_eq!(known_distance("Kolkata", "Delhi"), None);
        assert_eq!(known_distance("Chennai", "Bangalore"), None);
    }

    #[test]
    fn test_fallback_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let km = estimate_distance_with("Jaipur", "Surat", &mut rng);
            assert!((50..550).contains(&km), "{} out of range", km);
        }
    }

    #[test]
    fn test_fallback_lower_bound_with_zero_rng() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(estimate_distance_with("Nowhere", "Elsewhere", &mut rng), 50);
    }

    #[test]
    fn test_fallback_is_reproducible_with_seed() {
        let a = estimate_distance_with("Goa", "Nagpur", &mut StdRng::seed_from_u64(9));
        let b = estimate_distance_with("Goa", "Nagpur", &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_thread_rng_entry_point() {
        assert_eq!(estimate_distance("bangalore", "chennai"), 350);
        let km = estimate_distance("Indore", "Bhopal");
        assert!((50..550).contains(&km));
    }
}
