//! Route definitions for the DotPulse API.

pub mod health;
pub mod stats;
