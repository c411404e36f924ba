//! HTTP handlers

pub mod health;
pub mod advisory;
pub mod model;
pub mod weather;
pub mod system;
