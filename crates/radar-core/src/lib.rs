//! Core types and definitions for the pseudo-3D radar.
//!
//! This crate defines the vocabulary shared across all other crates:
//! value types, enums, constants, sprite ids, settings, the read-only
//! world interface and the backend-neutral draw list.
//! It has no dependency on any graphics API or game runtime.

pub mod config;
pub mod constants;
pub mod draw;
pub mod enums;
pub mod sprites;
pub mod types;
pub mod view;
pub mod world;
