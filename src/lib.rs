//! Agam vault API: request gates (CORS policy + bearer authentication) in front
//! of the vault handlers.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
