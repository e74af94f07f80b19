pub mod config;
pub mod event_builder;
pub mod ids;
pub mod logging;
pub mod result;
