// Domain layer - Channel, feed and dashboard models
pub mod channel;
pub mod dashboard;
pub mod feed;
pub mod telemetry;
