// Client module structure
pub mod errors;
mod config;
mod gateway;
mod http;

// Re-export commonly used types
pub use config::UpstreamConfig;
pub use errors::UpstreamError;
pub use gateway::PredictionGateway;
pub use http::HttpPredictionClient;

// Re-export the generated mock for tests and when the mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use gateway::MockPredictionGateway;
