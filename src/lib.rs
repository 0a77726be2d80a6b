//! stockbench — stock indicator & position-risk toolkit.
//!
//! Hexagonal architecture: deterministic engine in [`domain`], port traits
//! in [`ports`], concrete implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
