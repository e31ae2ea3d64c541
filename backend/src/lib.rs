//! Booking platform backend for peer-to-peer skill-sharing sessions.
//!
//! Instructors list sessions, users browse and book them, and completed
//! bookings can be reviewed. The domain core lives in [`services`]
//! (capacity calculator, booking lifecycle manager, review eligibility
//! gate, facade); [`handlers`] is the HTTP boundary.

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod types;
pub mod utils;
pub mod validation;
