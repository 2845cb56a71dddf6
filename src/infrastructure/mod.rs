//! Infrastructure layer - Backend access and logging

pub mod backend;
pub mod logging;
