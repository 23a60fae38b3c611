//! Time-of-day discretization.
//!
//! Traffic and demand are tabulated per coarse period rather than per clock
//! time.  [`TimePeriod::from_hour`] maps a 24-hour clock onto the periods so
//! callers holding a timestamp do not have to repeat the boundaries.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// A coarse slice of the day used to select traffic context.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimePeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::Morning,
        TimePeriod::Afternoon,
        TimePeriod::Evening,
        TimePeriod::Night,
    ];

    /// Period containing `hour` (0–23; larger values wrap).
    ///
    /// | Hours   | Period    |
    /// |---------|-----------|
    /// | 06–11   | Morning   |
    /// | 12–16   | Afternoon |
    /// | 17–21   | Evening   |
    /// | 22–05   | Night     |
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            6..=11  => TimePeriod::Morning,
            12..=16 => TimePeriod::Afternoon,
            17..=21 => TimePeriod::Evening,
            _       => TimePeriod::Night,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimePeriod::Morning   => "morning",
            TimePeriod::Afternoon => "afternoon",
            TimePeriod::Evening   => "evening",
            TimePeriod::Night     => "night",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning"   => Ok(TimePeriod::Morning),
            "afternoon" => Ok(TimePeriod::Afternoon),
            "evening"   => Ok(TimePeriod::Evening),
            "night"     => Ok(TimePeriod::Night),
            other       => Err(CoreError::UnknownTimePeriod(other.to_string())),
        }
    }
}
