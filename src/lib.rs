// Command model and validation
pub mod command;

// Command dispatch queue
pub mod queue;

// Snapshot store and player state model
pub mod state;

// HTTP API
pub mod api;

// Configuration
pub mod config;
