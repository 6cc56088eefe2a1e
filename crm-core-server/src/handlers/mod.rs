//! Axum handlers
//!
//! A handler opens one session, runs its service call and commits when the
//! call changed state. Read-only handlers drop the session, which rolls back.

pub mod auth;
pub mod business;
pub mod campaigns;
pub mod deal_stages;
pub mod files;
pub mod leads;
pub mod users;
