//! The availability calculator.
//!
//! Computes the bookable slots for one day at a fixed 30-minute granularity:
//!
//! 1. resolve which opening windows apply (special-day override beats the
//!    recurring weekly schedule, all-or-nothing);
//! 2. expand the windows into candidate slot times;
//! 3. mark the slot steps occupied by existing active bookings, each blocking
//!    its own service duration;
//! 4. when a service duration is requested, keep only slots where the whole
//!    span fits inside the open windows and is unoccupied.
//!
//! The functions here are total over well-formed input: a day with no windows
//! yields an empty slot list, never an error.

use std::collections::HashSet;

use crate::api::{BookingInterval, Slot, TimeWindow};
use crate::models::{TimeOfDay, SLOT_MINUTES};

const STEP: u32 = SLOT_MINUTES as u32;

/// Pick the windows that govern a date.
///
/// Any special-day window fully suppresses the recurring schedule for that
/// date; the two are never merged. The result is ordered by start time.
pub fn resolve_windows(
    special: Vec<TimeWindow>,
    recurring: Vec<TimeWindow>,
) -> Vec<TimeWindow> {
    let mut windows = if special.is_empty() { recurring } else { special };
    windows.sort_by_key(|w| w.start);
    windows
}

/// Expand opening windows into slot start times, one every 30 minutes while
/// the slot start is strictly before the window's end.
///
/// Overlapping windows are tolerated: duplicate slot times share identical
/// occupancy state downstream, so they are simply emitted as produced.
pub fn expand_windows(windows: &[TimeWindow]) -> Vec<TimeOfDay> {
    let mut slots = Vec::new();
    for window in windows {
        let end = window.end.minutes() as u32;
        let mut t = window.start.minutes() as u32;
        while t < end {
            // t < end <= minutes-per-day, so the offset is always in range
            if let Some(time) = TimeOfDay::from_minutes(t as u16) {
                slots.push(time);
            }
            t += STEP;
        }
    }
    slots
}

/// Minute marks blocked by existing bookings.
///
/// Each booking blocks `ceil(duration / 30)` consecutive steps from its start
/// time, with a minimum of one step when its duration is zero or unknown.
/// Spans may run past window boundaries (and even past midnight); occupancy
/// is tracked on raw minute marks independently of the windows.
pub fn occupied_steps(bookings: &[BookingInterval]) -> HashSet<u32> {
    let mut occupied = HashSet::new();
    for booking in bookings {
        let steps = booking.duration_min.div_ceil(STEP).max(1);
        let mut t = booking.start.minutes() as u32;
        for _ in 0..steps {
            occupied.insert(t);
            t += STEP;
        }
    }
    occupied
}

/// Compute the ordered slot list for one day.
///
/// `windows` are the day's opening windows (already resolved via
/// [`resolve_windows`]), `bookings` its active bookings, and
/// `requested_duration_min` the duration of the service being scheduled.
/// With no requested duration (or zero), a slot is available iff it is not
/// occupied. With a requested duration, a slot is available iff every one of
/// the `ceil(duration / 30)` steps starting at it lies inside the expanded
/// window set and is unoccupied — a span may not cross a gap between windows
/// or run past closing time.
pub fn compute_availability(
    windows: &[TimeWindow],
    bookings: &[BookingInterval],
    requested_duration_min: Option<u32>,
) -> Vec<Slot> {
    let slot_times = expand_windows(windows);
    let occupied = occupied_steps(bookings);
    let open: HashSet<u32> = slot_times.iter().map(|t| t.minutes() as u32).collect();

    let requested_steps = requested_duration_min
        .filter(|d| *d > 0)
        .map(|d| d.div_ceil(STEP));

    slot_times
        .into_iter()
        .map(|time| {
            let start = time.minutes() as u32;
            let available = match requested_steps {
                None => !occupied.contains(&start),
                Some(steps) => (0..steps).all(|i| {
                    let t = start + i * STEP;
                    open.contains(&t) && !occupied.contains(&t)
                }),
            };
            Slot { time, available }
        })
        .collect()
}
