//! Transport modes, road categories, and the traversability table between them.
//!
//! The `(mode, category)` table is an exhaustive `match`, so adding a variant
//! to either enum is a compile error until the table is extended.

use std::str::FromStr;

use crate::CoreError;

// ── TransportMode ─────────────────────────────────────────────────────────────

/// The vehicle class a search is computed for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransportMode {
    Car,
    Bus,
    Metro,
    /// Ambulance / fire / police: may use every link and ignores congestion.
    Emergency,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Metro,
        TransportMode::Emergency,
    ];

    /// Modes a regular traveller can switch between mid-journey.
    pub const PASSENGER: [TransportMode; 3] =
        [TransportMode::Car, TransportMode::Bus, TransportMode::Metro];

    /// Dense index for per-mode lookup tables.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            TransportMode::Car       => 0,
            TransportMode::Bus       => 1,
            TransportMode::Metro     => 2,
            TransportMode::Emergency => 3,
        }
    }

    /// `true` for modes whose speed is derated by traffic flow.
    #[inline]
    pub fn feels_congestion(self) -> bool {
        !matches!(self, TransportMode::Emergency)
    }

    /// May this mode traverse a link of `category`?
    pub fn can_use(self, category: RoadCategory) -> bool {
        use RoadCategory as C;
        use TransportMode as M;
        match (self, category) {
            (M::Emergency, _) => true,

            (M::Car, C::Existing | C::Potential | C::VirtualConnection | C::VirtualLink) => true,
            (M::Car, C::Bus | C::Metro) => false,

            (M::Bus, C::Existing | C::Potential | C::VirtualConnection | C::VirtualLink | C::Bus) => true,
            (M::Bus, C::Metro) => false,

            (M::Metro, C::Metro) => true,
            (M::Metro, C::Existing | C::Potential | C::Bus | C::VirtualConnection | C::VirtualLink) => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car       => "car",
            TransportMode::Bus       => "bus",
            TransportMode::Metro     => "metro",
            TransportMode::Emergency => "emergency",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car"       => Ok(TransportMode::Car),
            "bus"       => Ok(TransportMode::Bus),
            "metro"     => Ok(TransportMode::Metro),
            "emergency" => Ok(TransportMode::Emergency),
            other       => Err(CoreError::UnknownMode(other.to_string())),
        }
    }
}

// ── RoadCategory ──────────────────────────────────────────────────────────────

/// Classification of a network link.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoadCategory {
    /// Road that exists today.
    Existing,
    /// Proposed road under evaluation.
    Potential,
    /// Bus route segment.
    Bus,
    /// Metro line segment.
    Metro,
    /// Link added to join an otherwise isolated node.
    VirtualConnection,
    /// Link added to give a position-less node a neighbour.
    VirtualLink,
}

impl RoadCategory {
    pub const ALL: [RoadCategory; 6] = [
        RoadCategory::Existing,
        RoadCategory::Potential,
        RoadCategory::Bus,
        RoadCategory::Metro,
        RoadCategory::VirtualConnection,
        RoadCategory::VirtualLink,
    ];

    /// Categories that represent physical infrastructure; used to pick a
    /// representative distance among parallel links.
    #[inline]
    pub fn is_physical(self) -> bool {
        matches!(
            self,
            RoadCategory::Existing | RoadCategory::Potential | RoadCategory::Bus | RoadCategory::Metro
        )
    }

    #[inline]
    pub fn is_road(self) -> bool {
        matches!(
            self,
            RoadCategory::Existing
                | RoadCategory::Potential
                | RoadCategory::VirtualConnection
                | RoadCategory::VirtualLink
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoadCategory::Existing          => "existing",
            RoadCategory::Potential         => "potential",
            RoadCategory::Bus               => "bus",
            RoadCategory::Metro             => "metro",
            RoadCategory::VirtualConnection => "virtual_connection",
            RoadCategory::VirtualLink       => "virtual_link",
        }
    }
}

impl std::fmt::Display for RoadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoadCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "existing"           => Ok(RoadCategory::Existing),
            "potential"          => Ok(RoadCategory::Potential),
            "bus"                => Ok(RoadCategory::Bus),
            "metro"              => Ok(RoadCategory::Metro),
            "virtual_connection" => Ok(RoadCategory::VirtualConnection),
            "virtual_link"       => Ok(RoadCategory::VirtualLink),
            other                => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}

// ── ModeTable ─────────────────────────────────────────────────────────────────

/// A fixed-size value per [`TransportMode`], indexed with `table[mode]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeTable<T> {
    pub car:       T,
    pub bus:       T,
    pub metro:     T,
    pub emergency: T,
}

impl<T> std::ops::Index<TransportMode> for ModeTable<T> {
    type Output = T;

    fn index(&self, mode: TransportMode) -> &T {
        match mode {
            TransportMode::Car       => &self.car,
            TransportMode::Bus       => &self.bus,
            TransportMode::Metro     => &self.metro,
            TransportMode::Emergency => &self.emergency,
        }
    }
}

impl<T> std::ops::IndexMut<TransportMode> for ModeTable<T> {
    fn index_mut(&mut self, mode: TransportMode) -> &mut T {
        match mode {
            TransportMode::Car       => &mut self.car,
            TransportMode::Bus       => &mut self.bus,
            TransportMode::Metro     => &mut self.metro,
            TransportMode::Emergency => &mut self.emergency,
        }
    }
}
