// CardioRisk-api lib.rs
//
// This is the main library file for the CardioRisk API.
// It re-exports the APIs from the various modules.

// Public modules
pub mod api;
pub mod entities;
pub mod openapi;

pub use api::routes::{create_app, create_app_with};
