//! Query execution services.

pub mod dispatcher;
