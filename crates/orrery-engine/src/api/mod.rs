pub mod config;
pub mod readout;
pub mod types;
pub mod viewer;
