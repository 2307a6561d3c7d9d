//! Handler modules for tasklist-api.

pub mod health;
pub mod tasks;
