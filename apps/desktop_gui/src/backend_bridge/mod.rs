//! Worker thread that runs remote calls off the UI thread.

pub mod commands;
pub mod runtime;
