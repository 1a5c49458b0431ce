//! Razer Chroma HDK userspace driver
//!
//! The protocol lives in the `razer-transport` and `razer-chroma` crates.
//! This crate adds what the command-line tool needs on top: persistent
//! configuration and argument parsing helpers.

pub mod color;
pub mod config;

pub use config::DriverConfig;
