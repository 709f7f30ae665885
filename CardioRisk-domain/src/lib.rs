// CardioRisk Domain
// This crate contains the intake validation and risk presentation logic

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the upstream client module from cardio_risk_data for convenience
pub use cardio_risk_data::client;

// Testing utilities - only available with mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
