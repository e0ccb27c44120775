//! Unit tests for the availability calculator.

use crate::api::{BookingInterval, TimeWindow};
use crate::models::TimeOfDay;

use super::availability::{compute_availability, expand_windows, occupied_steps, resolve_windows};

fn tod(s: &str) -> TimeOfDay {
    s.parse().expect("test time literal")
}

fn window(start: &str, end: &str) -> TimeWindow {
    TimeWindow::new(tod(start), tod(end)).expect("test window literal")
}

fn booking(start: &str, duration_min: u32) -> BookingInterval {
    BookingInterval {
        start: tod(start),
        duration_min,
    }
}

fn times(slots: &[crate::api::Slot]) -> Vec<String> {
    slots.iter().map(|s| s.time.to_string()).collect()
}

fn available(slots: &[crate::api::Slot]) -> Vec<(String, bool)> {
    slots
        .iter()
        .map(|s| (s.time.to_string(), s.available))
        .collect()
}

#[test]
fn morning_window_with_no_bookings_is_fully_open() {
    let slots = compute_availability(&[window("09:00", "12:00")], &[], None);

    assert_eq!(
        times(&slots),
        vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"]
    );
    assert!(slots.iter().all(|s| s.available));
}

#[test]
fn ninety_minute_booking_blocks_three_slots() {
    // A 90-minute booking at 10:00 blocks 10:00/10:30/11:00 and leaves 11:30 open.
    let slots = compute_availability(
        &[window("09:00", "12:00")],
        &[booking("10:00", 90)],
        None,
    );

    assert_eq!(
        available(&slots),
        vec![
            ("09:00".into(), true),
            ("09:30".into(), true),
            ("10:00".into(), false),
            ("10:30".into(), false),
            ("11:00".into(), false),
            ("11:30".into(), true),
        ]
    );
}

#[test]
fn occupancy_blocks_exactly_its_span() {
    let occupied = occupied_steps(&[booking("10:00", 90)]);
    assert_eq!(occupied.len(), 3);
    for mark in [600, 630, 660] {
        assert!(occupied.contains(&mark));
    }
    assert!(!occupied.contains(&570));
    assert!(!occupied.contains(&690));
}

#[test]
fn zero_duration_booking_still_blocks_one_slot() {
    let occupied = occupied_steps(&[booking("14:00", 0)]);
    assert_eq!(occupied.len(), 1);
    assert!(occupied.contains(&(14 * 60)));
}

#[test]
fn unaligned_duration_rounds_up_to_whole_slots() {
    // 45 minutes spans two 30-minute steps.
    let occupied = occupied_steps(&[booking("09:00", 45)]);
    assert_eq!(occupied.len(), 2);
    assert!(occupied.contains(&540));
    assert!(occupied.contains(&570));
}

#[test]
fn booking_may_run_past_closing_without_panicking() {
    // 23:30 + 120 minutes walks past midnight; the overflow marks simply
    // never match any window slot.
    let slots = compute_availability(
        &[window("22:00", "23:59")],
        &[booking("23:30", 120)],
        None,
    );
    assert_eq!(times(&slots), vec!["22:00", "22:30", "23:00", "23:30"]);
    let open: Vec<bool> = slots.iter().map(|s| s.available).collect();
    assert_eq!(open, vec![true, true, true, false]);
}

#[test]
fn special_day_fully_replaces_recurring_schedule() {
    let special = vec![window("14:00", "15:00")];
    let recurring = vec![window("09:00", "17:00")];

    let resolved = resolve_windows(special, recurring);
    assert_eq!(resolved, vec![window("14:00", "15:00")]);

    let slots = compute_availability(&resolved, &[], None);
    assert_eq!(times(&slots), vec!["14:00", "14:30"]);
}

#[test]
fn no_special_day_falls_back_to_recurring() {
    let resolved = resolve_windows(vec![], vec![window("09:00", "10:00")]);
    assert_eq!(resolved, vec![window("09:00", "10:00")]);
}

#[test]
fn resolve_orders_windows_by_start() {
    let resolved = resolve_windows(
        vec![window("15:00", "18:00"), window("09:00", "12:00")],
        vec![],
    );
    assert_eq!(
        resolved,
        vec![window("09:00", "12:00"), window("15:00", "18:00")]
    );
}

#[test]
fn no_windows_yields_empty_list_regardless_of_bookings() {
    let slots = compute_availability(&[], &[booking("10:00", 60)], Some(60));
    assert!(slots.is_empty());
}

#[test]
fn requested_duration_must_fit_before_closing() {
    // 60-minute window, 90-minute request: neither slot can host the span.
    let slots = compute_availability(&[window("09:00", "10:00")], &[], Some(90));

    assert_eq!(
        available(&slots),
        vec![("09:00".into(), false), ("09:30".into(), false)]
    );
}

#[test]
fn requested_span_may_not_cross_a_gap_between_windows() {
    // 11:30 + 60 minutes would need 12:00, which falls in the lunch gap.
    let windows = [window("09:00", "12:00"), window("13:00", "17:00")];
    let slots = compute_availability(&windows, &[], Some(60));

    let lookup: std::collections::HashMap<String, bool> = slots
        .iter()
        .map(|s| (s.time.to_string(), s.available))
        .collect();
    assert!(lookup["11:00"]);
    assert!(!lookup["11:30"]);
    assert!(lookup["13:00"]);
}

#[test]
fn requested_duration_accounts_for_existing_bookings() {
    // 60-minute request at 09:30 needs 09:30 and 10:00; 10:00 is taken.
    let slots = compute_availability(
        &[window("09:00", "12:00")],
        &[booking("10:00", 30)],
        Some(60),
    );

    let lookup: std::collections::HashMap<String, bool> = slots
        .iter()
        .map(|s| (s.time.to_string(), s.available))
        .collect();
    assert!(lookup["09:00"]);
    assert!(!lookup["09:30"]);
    assert!(!lookup["10:00"]);
    assert!(lookup["10:30"]);
}

#[test]
fn zero_requested_duration_behaves_like_occupancy_only() {
    let windows = [window("09:00", "10:00")];
    let bookings = [booking("09:00", 30)];

    let implicit = compute_availability(&windows, &bookings, None);
    let explicit = compute_availability(&windows, &bookings, Some(0));
    assert_eq!(implicit, explicit);
}

#[test]
fn shorter_requests_never_fail_where_longer_ones_succeed() {
    // Feasibility is monotone in the requested duration.
    let windows = [window("09:00", "12:00"), window("13:00", "15:00")];
    let bookings = [booking("10:00", 60), booking("13:30", 30)];

    for longer in [30u32, 60, 90, 120] {
        for shorter in (30..=longer).step_by(30) {
            let long_slots = compute_availability(&windows, &bookings, Some(longer));
            let short_slots = compute_availability(&windows, &bookings, Some(shorter));
            for (l, s) in long_slots.iter().zip(short_slots.iter()) {
                assert_eq!(l.time, s.time);
                if l.available {
                    assert!(
                        s.available,
                        "slot {} open for {} min but closed for {} min",
                        l.time, longer, shorter
                    );
                }
            }
        }
    }
}

#[test]
fn computation_is_deterministic() {
    let windows = [window("09:00", "12:00"), window("14:00", "18:00")];
    let bookings = [booking("09:30", 45), booking("15:00", 90)];

    let first = compute_availability(&windows, &bookings, Some(60));
    for _ in 0..5 {
        assert_eq!(compute_availability(&windows, &bookings, Some(60)), first);
    }
}

#[test]
fn overlapping_windows_are_tolerated() {
    // The admin UI prevents overlap, but the calculator must not choke on it:
    // duplicate slot times share identical availability.
    let windows = [window("09:00", "11:00"), window("10:00", "12:00")];
    let slots = compute_availability(&windows, &[booking("10:30", 30)], None);

    for slot in &slots {
        let expected = slot.time != tod("10:30");
        assert_eq!(slot.available, expected, "slot {}", slot.time);
    }
    // Both emissions of the overlapping region are present.
    assert_eq!(times(&slots).iter().filter(|t| *t == "10:00").count(), 2);
}

#[test]
fn expansion_emits_nothing_for_empty_input() {
    assert!(expand_windows(&[]).is_empty());
}
