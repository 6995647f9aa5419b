//! Query descriptors for the statistics views.

pub mod view_query;
