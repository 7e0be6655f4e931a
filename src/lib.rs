pub mod config;
pub mod constants;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod geo;
pub mod logging;
pub mod pipeline;
pub mod tables;
