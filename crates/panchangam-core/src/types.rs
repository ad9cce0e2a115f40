//! Shared value types for the Panchangam astronomical core.
//!
//! Every type here is immutable once constructed; calculators return fresh
//! values rather than mutating shared state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PanchangamError, PanchangamResult};

/// Continuous Julian Day count. JD 2451545.0 == 2000-01-01 12:00 UTC.
pub const J2000_EPOCH: f64 = 2451545.0;

/// Geographic location. Immutable; constructed only through `Location::new`
/// so an out-of-range latitude/longitude can never exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> PanchangamResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PanchangamError::validation(
                "panchangam-core",
                "Location::new",
                format!("latitude {latitude} out of range [-90, 90]"),
            )
            .with_extra("field", "latitude"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(PanchangamError::validation(
                "panchangam-core",
                "Location::new",
                format!("longitude {longitude} out of range [-180, 180]"),
            )
            .with_extra("field", "longitude"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether this location sits inside a polar circle, where sunrise/
    /// sunset can fail to occur around the solstices.
    pub fn is_polar(&self) -> bool {
        self.latitude.abs() > 66.5
    }
}

/// Normalise a degree value into `[0, 360)`.
pub fn normalize_degrees(value: f64) -> f64 {
    let wrapped = value % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// The ten bodies an ephemeris provider reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    pub const ALL: [Planet; 10] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }
}

/// Ecliptic position of a single body at a single instant.
///
/// Invariant: `longitude` is always normalised to `[0, 360)` on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
    /// Units are planet-dependent (AU for outer planets, Earth radii for
    /// the Moon) — callers comparing distances must compare like with like.
    pub distance: f64,
    /// Degrees per day, signed (negative during apparent retrograde motion).
    pub speed: f64,
}

impl Position {
    pub fn new(longitude: f64, latitude: f64, distance: f64, speed: f64) -> Self {
        Self {
            longitude: normalize_degrees(longitude),
            latitude,
            distance,
            speed,
        }
    }
}

/// All ten planetary positions computed for a single Julian Day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryPositions {
    pub jd: f64,
    pub positions: BTreeMap<Planet, Position>,
}

impl PlanetaryPositions {
    pub fn get(&self, planet: Planet) -> Option<Position> {
        self.positions.get(&planet).copied()
    }

    pub fn sun(&self) -> Option<Position> {
        self.get(Planet::Sun)
    }

    pub fn moon(&self) -> Option<Position> {
        self.get(Planet::Moon)
    }
}

/// Detailed solar position, extending `Position` with quantities the
/// rise/set and phase calculators need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    pub position: Position,
    pub right_ascension: f64,
    pub declination: f64,
    /// Minutes; `EqT = 4 * (L - alpha)`.
    pub equation_of_time: f64,
    pub angular_diameter: f64,
}

/// Detailed lunar position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarPosition {
    pub position: Position,
    pub right_ascension: f64,
    pub declination: f64,
    pub phase_angle: f64,
    pub illumination_fraction: f64,
    pub angular_diameter: f64,
}

/// Discriminant for `SunTimes`: does the Sun behave normally today?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayKind {
    Normal,
    PolarDay,
    PolarNight,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub kind: DayKind,
}

/// Moonrise/moonset for one civil day. Either may be absent (the Moon can
/// fail to rise or fail to set within a given civil day); when both are
/// present, `moonrise`/`moonset` are NOT reordered relative to each other —
/// the Moon legitimately rises after it sets on some days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarTimes {
    pub moonrise: Option<DateTime<Utc>>,
    pub moonset: Option<DateTime<Utc>>,
    pub is_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseName {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    pub fn label(&self) -> &'static str {
        match self {
            PhaseName::New => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::Full => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarPhase {
    /// Fraction of the synodic month elapsed, in `[0, 1)`.
    pub phase: f64,
    /// Illuminated fraction of the disc, in `[0, 100]`.
    pub illumination: f64,
    pub name: PhaseName,
    pub age_days: f64,
    pub next_principal_phase: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paksha {
    Shukla,
    Krishna,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TithiCategory {
    Nanda,
    Bhadra,
    Jaya,
    Rikta,
    Purna,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarSystem {
    Purnimanta,
    Amanta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tithi {
    /// 1..=30
    pub number: u8,
    pub name: &'static str,
    pub category: TithiCategory,
    pub paksha: Paksha,
    /// 1..=15
    pub paksha_day: u8,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub moon_sun_separation: f64,
    pub calendar_system: CalendarSystem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nakshatra {
    /// 1..=27
    pub number: u8,
    pub name: &'static str,
    pub deity: &'static str,
    pub lord: &'static str,
    pub symbol: &'static str,
    /// 1..=4
    pub pada: u8,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub moon_longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YogaQuality {
    Auspicious,
    Inauspicious,
    Mixed,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Yoga {
    /// 1..=27
    pub number: u8,
    pub name: &'static str,
    pub quality: YogaQuality,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub combined_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KaranaKind {
    Movable,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Karana {
    /// 1..=11
    pub number: u8,
    pub name: &'static str,
    pub kind: KaranaKind,
    pub is_vishti: bool,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub parent_tithi: u8,
    /// 1 or 2
    pub half: u8,
    pub duration_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hora {
    /// 1..=24
    pub number: u8,
    pub planet: &'static str,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vara {
    /// 1..=7, Sunday == 1
    pub number: u8,
    pub name: &'static str,
    pub lord: &'static str,
    pub gregorian_day: String,
    pub is_auspicious: bool,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub current_hora: Hora,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: f64,
    pub is_auspicious: bool,
}

/// Which provider answered a position request, and whether interpolation or
/// the cache was involved. Attached by the Ephemeris Manager; providers
/// themselves never construct this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderTag {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub provider: ProviderTag,
    pub cache_hit: bool,
    pub interpolated: bool,
}
