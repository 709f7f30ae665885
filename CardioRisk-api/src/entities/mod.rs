// Public entities for the CardioRisk API
// This module contains data structures that are shared across the application boundary

// Intake and assessment request/response bodies
pub mod assessment;

// Common entities for error handling
pub mod common;
