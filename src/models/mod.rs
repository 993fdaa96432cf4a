//! Data models for the Control API.
//!
//! This module contains the typed responses of the inventory endpoints.

mod server;

pub use server::*;
