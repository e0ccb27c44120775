//! # Salon Rust Backend
//!
//! Booking and scheduling backend for a nail salon.
//!
//! This crate provides the REST API consumed by the client-facing booking UI
//! and the admin dashboard: service catalog, user accounts, bookings, working
//! hours and special-day overrides, plus the slot availability computation
//! used to decide which times are bookable for a given date and service.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Domain types shared across layers (IDs, enums, records)
//! - [`models`]: Time-of-day representation and ID newtype machinery
//! - [`scheduler`]: Pure slot availability calculator
//! - [`db`]: Database operations, repository pattern, and persistence layer
//! - [`services`]: Business logic on top of the repositories
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod scheduler;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
