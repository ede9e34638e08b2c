pub mod aggregate;
pub mod charts;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layouts;
pub mod loader;
pub mod metrics;
pub mod stats;
pub mod trial;
// reports is a binary module (in main.rs); the table it prints is rendered
// from the same rows export::csv_rows produces.
