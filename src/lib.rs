//! Symposium server core modules.
//!
//! Registration and workflow platform for a regional high-school science
//! research competition. This crate contains the HTTP routing, session-based
//! authentication, approval lifecycle, token-gated multi-party signature
//! workflow, file submission handling, and email notification dispatch.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
