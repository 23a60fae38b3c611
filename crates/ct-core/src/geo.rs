//! Planar node positions.
//!
//! Positions are stored in a local projected frame measured in metres, so the
//! straight-line distances used by the A* heuristic and by connection scoring
//! are plain Euclidean norms.  Geographic inputs are projected once with
//! [`Position::from_lon_lat`] (equirectangular around a reference latitude),
//! which stays within a fraction of a percent over a single city.

/// Metres per degree of latitude (mean Earth radius).
pub const METRES_PER_DEGREE: f64 = 111_195.0;

/// A point in the network's projected plane, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Project a WGS-84 `(lon, lat)` pair into metres relative to
    /// `(origin_lon, origin_lat)`.
    pub fn from_lon_lat(lon: f64, lat: f64, origin_lon: f64, origin_lat: f64) -> Self {
        let cos_ref = origin_lat.to_radians().cos();
        Self {
            x: (lon - origin_lon) * METRES_PER_DEGREE * cos_ref,
            y: (lat - origin_lat) * METRES_PER_DEGREE,
        }
    }

    /// Straight-line distance in metres.
    #[inline]
    pub fn distance_m(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn as_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
