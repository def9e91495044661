//! Core types and identifiers for the queueing simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: UUID-based run identifiers
//! - **Enums**: distribution families, Normal scaling policy, output formats
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use queueing_simulator::types::*;
//!
//! let config = SimulationConfig {
//!     arrival_distribution: DistributionFamily::Exponential,
//!     arrival_mean: 5.0,
//!     num_servers: 2,
//!     num_observations: 20,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//!
//! let unknown = DistributionFamily::parse_lenient("xyz");
//! assert!(unknown.is_unrecognized());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
