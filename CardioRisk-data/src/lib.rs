// CardioRisk Data
// This crate handles access to the remote prediction service

// Upstream client, configuration and errors
pub mod client;

// Wire models exchanged with the prediction service
pub mod models;

// In-memory cache for dashboard payloads
pub mod cache;
