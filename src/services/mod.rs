//! Service layer: game operations, autosave, health, and API docs.

pub mod documentation;
pub mod game_service;
pub mod health_service;
pub mod persistence;
