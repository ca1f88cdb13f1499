// Channel telemetry - fetch and normalize ThingSpeak channel feeds
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
