//! Shared utilities for the Maru server and client binaries.

pub mod logger;
pub mod time;
