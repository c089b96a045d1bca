pub mod analyze;
pub mod collate;
pub mod config;
pub mod error;
pub mod feed;
pub mod geo;
pub mod output;
pub mod pipeline;
pub mod station;
pub mod stats;
