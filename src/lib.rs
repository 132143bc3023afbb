//! Notevault configuration resolver
//!
//! This module exports the configuration pipeline for embedding and testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod facade;
pub mod host;
pub mod paths;
pub mod search;
