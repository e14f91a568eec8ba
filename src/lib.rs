pub mod api_client;
pub mod authentication;
pub mod configuration;
pub mod domain;
pub mod probe;
pub mod recommendation;
pub mod report;
pub mod telemetry;
