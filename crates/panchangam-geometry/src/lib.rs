//! Solar/Lunar Geometry (component C5).
//!
//! Sunrise, sunset, moonrise, moonset, and lunar phase, each a pure function
//! of a civil date and a [`Location`]. Rise/set reduce to the same
//! hour-angle solver in [`riseset`]; the Sun uses a self-contained
//! mean-element series, the Moon reuses `panchangam-ephemeris`'s computed
//! right ascension and declination.

pub mod moon;
pub mod phase;
pub mod riseset;
pub mod sun;

pub use moon::lunar_times;
pub use phase::lunar_phase;
pub use riseset::{solve_hour_angle, HourAngleResult};
pub use sun::sun_times;

use chrono::NaiveDate;
use panchangam_core::types::{Location, LunarTimes, SunTimes};

/// Compute both Sun and Moon rise/set for `date` at `location` in one call,
/// the shape the Aggregation Facade (C8) needs before handing longitudes to
/// the element calculators (C6).
pub fn rise_set_for(date: NaiveDate, location: Location) -> (SunTimes, LunarTimes) {
    (sun_times(date, location), lunar_times(date, location))
}
