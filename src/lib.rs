//! Hotel administration service: rooms, guests and bookings behind a small
//! REST surface. Every request goes through one API facade backed either by
//! a JSON key-value store or by a remote upstream API.

pub mod api;
pub mod error;
pub mod models;
pub mod pricing;
pub mod repo;
pub mod routes;
pub mod stats;
pub mod state;
pub mod store;
