// Static named-location table and great-circle distance math.
// Theaters sit at one of these fixed city locations; proximity sorting is a
// haversine computation over this table, not a geocoding call.

/// A named location with known coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedLocation {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// The fixed set of locations theaters (and users) can be placed at
pub const LOCATIONS: &[NamedLocation] = &[
    NamedLocation { name: "ANNA NAGAR", latitude: 13.0878, longitude: 80.2174 },
    NamedLocation { name: "T. NAGAR", latitude: 13.0394, longitude: 80.2337 },
    NamedLocation { name: "ADYAR", latitude: 13.0064, longitude: 80.2575 },
    NamedLocation { name: "MYLAPORE", latitude: 13.0316, longitude: 80.2670 },
    NamedLocation { name: "NUNGAMBAKKAM", latitude: 13.0620, longitude: 80.2405 },
    NamedLocation { name: "ALWARPET", latitude: 13.0334, longitude: 80.2546 },
    NamedLocation { name: "EGMORE", latitude: 13.0827, longitude: 80.2707 },
    NamedLocation { name: "KILPAUK", latitude: 13.0827, longitude: 80.2437 },
    NamedLocation { name: "SAIDAPET", latitude: 13.0203, longitude: 80.2224 },
    NamedLocation { name: "VELACHERY", latitude: 12.9802, longitude: 80.2228 },
    NamedLocation { name: "GUINDY", latitude: 13.0067, longitude: 80.2206 },
    NamedLocation { name: "THIRUVANMIYUR", latitude: 12.9869, longitude: 80.2615 },
    NamedLocation { name: "PORUR", latitude: 13.0324, longitude: 80.1679 },
    NamedLocation { name: "MOGAPPAIR", latitude: 13.0832, longitude: 80.1674 },
    NamedLocation { name: "ANNA SALAI", latitude: 13.0572, longitude: 80.2668 },
    NamedLocation { name: "MAMBALAM", latitude: 13.0355, longitude: 80.2274 },
    NamedLocation { name: "KODAMBAKKAM", latitude: 13.0512, longitude: 80.2206 },
    NamedLocation { name: "MOUNT ROAD", latitude: 13.0626, longitude: 80.2696 },
    NamedLocation { name: "PALLIKARANAI", latitude: 12.9329, longitude: 80.2135 },
    NamedLocation { name: "ASHOK NAGAR", latitude: 13.0402, longitude: 80.2123 },
    NamedLocation { name: "CHROMPET", latitude: 12.9517, longitude: 80.1401 },
    NamedLocation { name: "AMBATTUR", latitude: 13.1075, longitude: 80.1648 },
    NamedLocation { name: "TAMBARAM", latitude: 12.9246, longitude: 80.1479 },
    NamedLocation { name: "VADAPALANI", latitude: 13.0501, longitude: 80.2120 },
    NamedLocation { name: "ROYAPETTAH", latitude: 13.0581, longitude: 80.2641 },
    NamedLocation { name: "SHOLINGANALLUR", latitude: 12.8990, longitude: 80.2279 },
    NamedLocation { name: "AVADI", latitude: 13.1167, longitude: 80.1010 },
    NamedLocation { name: "ENNORE", latitude: 13.2161, longitude: 80.3231 },
    NamedLocation { name: "PALLAVARAM", latitude: 12.9686, longitude: 80.1504 },
    NamedLocation { name: "VANAGARAM", latitude: 13.0733, longitude: 80.2090 },
];

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Look up a named location, case-insensitively
pub fn find(name: &str) -> Option<&'static NamedLocation> {
    let wanted = name.trim();
    LOCATIONS
        .iter()
        .find(|loc| loc.name.eq_ignore_ascii_case(wanted))
}

/// Great-circle distance between two locations in kilometers (haversine)
pub fn distance_km(a: &NamedLocation, b: &NamedLocation) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert!(find("ANNA NAGAR").is_some());
        assert!(find("anna nagar").is_some());
        assert!(find("  Velachery ").is_some());
    }

    #[test]
    fn test_find_unknown_location() {
        assert!(find("ATLANTIS").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let adyar = find("ADYAR").unwrap();
        assert_eq!(distance_km(adyar, adyar), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = find("ANNA NAGAR").unwrap();
        let b = find("TAMBARAM").unwrap();
        let d1 = distance_km(a, b);
        let d2 = distance_km(b, a);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_known_pair_distance_sanity() {
        // Anna Nagar and T. Nagar are roughly 5-6 km apart
        let a = find("ANNA NAGAR").unwrap();
        let b = find("T. NAGAR").unwrap();
        let d = distance_km(a, b);
        assert!(d > 4.0 && d < 7.0, "unexpected distance: {}", d);
    }

    #[test]
    fn test_farther_location_has_larger_distance() {
        let origin = find("T. NAGAR").unwrap();
        let near = find("MAMBALAM").unwrap(); // adjacent neighborhood
        let far = find("ENNORE").unwrap(); // far north

        assert!(distance_km(origin, near) < distance_km(origin, far));
    }

    #[test]
    fn test_all_locations_have_distinct_names() {
        for (i, a) in LOCATIONS.iter().enumerate() {
            for b in LOCATIONS.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
