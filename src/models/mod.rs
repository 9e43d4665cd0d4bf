//! Session and configuration models.

pub mod auth;
pub mod config;
