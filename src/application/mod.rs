// Application layer - Use cases over the feed source
pub mod dashboard_service;
pub mod feed_source;
pub mod normalizer;
pub mod telemetry_service;
