//! Slot availability computation.
//!
//! This module is the scheduling core of the backend: given a day's opening
//! windows and its active bookings, it decides which 30-minute slots can
//! still accommodate a service of a requested duration. It is pure and
//! synchronous; fetching the inputs (working hours, special days, bookings)
//! is the job of the service layer.

pub mod availability;

pub use availability::{compute_availability, expand_windows, occupied_steps, resolve_windows};

#[cfg(test)]
mod tests;
