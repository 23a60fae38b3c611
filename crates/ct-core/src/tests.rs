//! Unit tests for ct-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, LinkKey, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(LinkKey::INVALID.0, u16::MAX);
        assert!(!NodeId::default().is_valid());
        assert!(NodeId(0).is_valid());
    }

    #[test]
    fn link_key_overflow_rejected() {
        assert!(LinkKey::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn euclidean_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(300.0, 400.0);
        assert!((a.distance_m(b) - 500.0).abs() < 1e-9);
        assert_eq!(a.distance_m(a), 0.0);
    }

    #[test]
    fn lon_lat_projection_near_cairo() {
        // 0.01° of latitude ≈ 1.11 km regardless of longitude.
        let origin = (31.23, 30.04);
        let north = Position::from_lon_lat(31.23, 30.05, origin.0, origin.1);
        assert!(north.x.abs() < 1e-9);
        assert!((north.y - 1_111.95).abs() < 1.0, "got {}", north.y);

        // 0.01° of longitude shrinks by cos(30°) ≈ 0.866.
        let east = Position::from_lon_lat(31.24, 30.04, origin.0, origin.1);
        assert!((east.x - 962.9).abs() < 1.0, "got {}", east.x);
    }
}

#[cfg(test)]
mod time {
    use crate::TimePeriod;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Morning".parse::<TimePeriod>().unwrap(), TimePeriod::Morning);
        assert_eq!(" NIGHT ".parse::<TimePeriod>().unwrap(), TimePeriod::Night);
        assert!("noon".parse::<TimePeriod>().is_err());
    }

    #[test]
    fn from_hour_boundaries() {
        assert_eq!(TimePeriod::from_hour(5), TimePeriod::Night);
        assert_eq!(TimePeriod::from_hour(6), TimePeriod::Morning);
        assert_eq!(TimePeriod::from_hour(12), TimePeriod::Afternoon);
        assert_eq!(TimePeriod::from_hour(17), TimePeriod::Evening);
        assert_eq!(TimePeriod::from_hour(22), TimePeriod::Night);
        assert_eq!(TimePeriod::from_hour(30), TimePeriod::Morning); // wraps to 06
    }

    #[test]
    fn display_roundtrip() {
        for p in TimePeriod::ALL {
            assert_eq!(p.to_string().parse::<TimePeriod>().unwrap(), p);
        }
    }
}

#[cfg(test)]
mod transport {
    use crate::{RoadCategory, TransportMode};

    #[test]
    fn car_and_bus_never_use_metro() {
        assert!(!TransportMode::Car.can_use(RoadCategory::Metro));
        assert!(!TransportMode::Bus.can_use(RoadCategory::Metro));
    }

    #[test]
    fn metro_only_uses_metro() {
        for cat in RoadCategory::ALL {
            assert_eq!(TransportMode::Metro.can_use(cat), cat == RoadCategory::Metro);
        }
    }

    #[test]
    fn emergency_uses_everything() {
        for cat in RoadCategory::ALL {
            assert!(TransportMode::Emergency.can_use(cat));
        }
    }

    #[test]
    fn bus_uses_roads_and_bus_lanes() {
        assert!(TransportMode::Bus.can_use(RoadCategory::Bus));
        assert!(TransportMode::Bus.can_use(RoadCategory::Existing));
        assert!(!TransportMode::Car.can_use(RoadCategory::Bus));
    }

    #[test]
    fn only_emergency_ignores_congestion() {
        assert!(!TransportMode::Emergency.feels_congestion());
        assert!(TransportMode::Car.feels_congestion());
        assert!(TransportMode::Metro.feels_congestion());
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Bus".parse::<TransportMode>().unwrap(), TransportMode::Bus);
        assert_eq!(TransportMode::Metro.to_string(), "metro");
        assert_eq!(
            "virtual_link".parse::<RoadCategory>().unwrap(),
            RoadCategory::VirtualLink
        );
        assert!("tram".parse::<TransportMode>().is_err());
    }

    #[test]
    fn mode_index_is_dense() {
        let mut seen = [false; 4];
        for m in TransportMode::ALL {
            seen[m.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}

#[cfg(test)]
mod config {
    use crate::{RoutingConfig, TransportMode};

    #[test]
    fn defaults_validate() {
        let cfg = RoutingConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.base_speed_kmh[TransportMode::Car], 120.0);
        assert_eq!(cfg.base_speed_kmh[TransportMode::Metro], 90.0);
        assert_eq!(cfg.mode_switch_penalty_min, 2.0);
        assert_eq!(cfg.emergency_delay_fraction, 0.03);
    }

    #[test]
    fn rejects_zero_speed() {
        let mut cfg = RoutingConfig::default();
        cfg.base_speed_kmh[TransportMode::Bus] = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_congestion_bounds() {
        let cfg = RoutingConfig {
            congestion_min_factor: 0.9,
            congestion_max_factor: 0.5,
            ..RoutingConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_slowdown_that_stops_traffic() {
        let cfg = RoutingConfig { congestion_slowdown: 1.0, ..RoutingConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_connection_radius_rejected() {
        let mut cfg = RoutingConfig::default();
        cfg.max_connection_radius_m = -500.0;
        assert!(cfg.validate().is_err());
        cfg.max_connection_radius_m = f64::NAN;
        assert!(cfg.validate().is_err());
        cfg.max_connection_radius_m = 0.0;
        cfg.validate().unwrap();
    }
}
