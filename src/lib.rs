//! Deterministic hostname and IP cloaking for chat networks.
//!
//! [`cloak`] is the pure transform library; [`server`] is the HTTP surface
//! that exposes it; [`config`] holds the service settings.

pub mod cloak;
pub mod config;
pub mod server;
