//! Aggregation Facade (component C8).
//!
//! Orchestrates the Ephemeris Manager (C3), Solar/Lunar Geometry (C5),
//! Element Calculators (C6), and Day-Period Partitioner (C7) into one
//! immutable day record for a `(date, location)` pair. Never caches its own
//! output — it relies entirely on the Manager's cache. Either a full day
//! record comes back, or an error; there is no partial success.

use chrono::{DateTime, Datelike, Duration as ChronoDuration, FixedOffset, NaiveDate, TimeZone, Utc};

use panchangam_core::jd::civil_to_jd;
use panchangam_core::observer::Observer;
use panchangam_core::types::{
    CalendarSystem, DayPeriod, Karana, Location, LunarPhase, LunarTimes, Nakshatra, Planet,
    PlanetaryPositions, SunTimes, Tithi, Vara, Yoga,
};
use panchangam_core::{PanchangamError, PanchangamResult};
use panchangam_manager::EphemerisManager;

const COMPONENT: &str = "panchangam-aggregate";

/// A complete, immutable Panchangam day record for one civil date at one
/// location.
#[derive(Debug, Clone)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub location: Location,
    pub positions: PlanetaryPositions,
    pub sun_times_today: SunTimes,
    pub sun_times_tomorrow: SunTimes,
    pub lunar_times: LunarTimes,
    pub lunar_phase: LunarPhase,
    pub tithi: Tithi,
    pub nakshatra: Nakshatra,
    pub yoga: Yoga,
    pub karana: Karana,
    pub vara: Vara,
    pub rahu_kalam: DayPeriod,
    pub yamagandam: DayPeriod,
    pub gulika_kalam: DayPeriod,
    pub abhijit_muhurta: DayPeriod,
}

fn local_instant(date: NaiveDate, hour: u32, minute: u32, zone: FixedOffset) -> PanchangamResult<DateTime<Utc>> {
    let naive = date
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| PanchangamError::validation(COMPONENT, "local_instant", "invalid civil time"))?;
    match zone.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        chrono::LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        chrono::LocalResult::None => Err(PanchangamError::validation(
            COMPONENT,
            "local_instant",
            "civil date/zone combination does not resolve to an instant",
        )),
    }
}

/// Step 1: parse the civil date in `zone` into the two reference instants
/// the rest of the facade needs — local noon (Tithi/Nakshatra/Yoga/Karana)
/// and start-of-day (rise/set, bounding the civil day in UTC terms).
fn reference_instants(date: NaiveDate, zone: FixedOffset) -> PanchangamResult<(DateTime<Utc>, NaiveDate, NaiveDate)> {
    let local_noon = local_instant(date, 12, 0, zone)?;
    let start_of_day = local_instant(date, 0, 0, zone)?;
    let today_utc_date = start_of_day.date_naive();
    let tomorrow_utc_date = today_utc_date + ChronoDuration::days(1);
    Ok((local_noon, today_utc_date, tomorrow_utc_date))
}

/// Orchestrate the full six-step day calculation described in the
/// component's contract.
pub fn compute_day_record(
    date: NaiveDate,
    zone: FixedOffset,
    location: Location,
    calendar_system: CalendarSystem,
    manager: &EphemerisManager,
    observer: &dyn Observer,
) -> PanchangamResult<DayRecord> {
    let mut span = observer.span(COMPONENT, "compute_day_record");
    span.set_attribute("date", &date.to_string());
    span.set_attribute("zone_offset_seconds", &zone.local_minus_utc().to_string());

    let result = compute_day_record_inner(date, zone, location, calendar_system, manager);

    match &result {
        Ok(_) => span.add_event("day_record_assembled", &[]),
        Err(err) => observer.record_error(err),
    }

    result
}

fn compute_day_record_inner(
    date: NaiveDate,
    zone: FixedOffset,
    location: Location,
    calendar_system: CalendarSystem,
    manager: &EphemerisManager,
) -> PanchangamResult<DayRecord> {
    // Step 1: local noon + start-of-day reference instants.
    let (local_noon, today_date, tomorrow_date) = reference_instants(date, zone)?;

    // Step 2: SunTimes for today and tomorrow (tomorrow's sunrise bounds Vara/Hora).
    let (sun_times_today, sun_times_tomorrow) = rayon::join(
        || panchangam_geometry::sun_times(today_date, location),
        || panchangam_geometry::sun_times(tomorrow_date, location),
    );

    // Step 3: PlanetaryPositions at local-noon JD, through the Manager.
    let jd_noon = civil_to_jd(local_noon);
    let positions = manager.positions(jd_noon)?.value;

    let sun_longitude = positions
        .get(Planet::Sun)
        .ok_or_else(|| PanchangamError::internal(COMPONENT, "compute_day_record", "Sun missing from positions"))?
        .longitude;
    let moon_longitude = positions
        .get(Planet::Moon)
        .ok_or_else(|| PanchangamError::internal(COMPONENT, "compute_day_record", "Moon missing from positions"))?
        .longitude;

    // Step 4: C6 calculators, fanned out with rayon where independent.
    // Karana depends on Tithi's number, so it runs after.
    let (tithi, (nakshatra, yoga)) = rayon::join(
        || panchangam_elements::tithi(moon_longitude, sun_longitude, local_noon, calendar_system),
        || {
            rayon::join(
                || panchangam_elements::nakshatra(moon_longitude, local_noon),
                || panchangam_elements::yoga(sun_longitude, moon_longitude, local_noon),
            )
        },
    );
    let separation = panchangam_elements::moon_sun_separation(moon_longitude, sun_longitude);
    let karana = panchangam_elements::karana(tithi.number, separation, local_noon);
    let vara = panchangam_elements::vara(sun_times_today.sunrise, sun_times_tomorrow.sunrise, local_noon);

    // Step 5: LunarTimes, LunarPhase, DayPeriods.
    let ((lunar_times, lunar_phase), (inauspicious, abhijit_muhurta)) = rayon::join(
        || {
            rayon::join(
                || panchangam_geometry::lunar_times(today_date, location),
                || panchangam_geometry::lunar_phase(local_noon),
            )
        },
        || {
            rayon::join(
                || {
                    panchangam_dayperiods::inauspicious_periods(
                        sun_times_today.sunrise,
                        sun_times_today.sunset,
                        sun_times_today.sunrise.weekday(),
                    )
                },
                || panchangam_dayperiods::abhijit_muhurta(sun_times_today.sunrise, sun_times_today.sunset),
            )
        },
    );
    let (rahu_kalam, yamagandam, gulika_kalam) = inauspicious;

    // Step 6: assemble the immutable day record.
    Ok(DayRecord {
        date,
        location,
        positions,
        sun_times_today,
        sun_times_tomorrow,
        lunar_times,
        lunar_phase,
        tithi,
        nakshatra,
        yoga,
        karana,
        vara,
        rahu_kalam,
        yamagandam,
        gulika_kalam,
        abhijit_muhurta,
    })
}
