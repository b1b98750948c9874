//! Network layer: wire DTOs and the credentialed request helpers.

pub mod api;
pub mod types;
