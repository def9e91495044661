//! Random variates and the interarrival lookup table
//!
//! - **VariateGenerator**: one sample for a named distribution family
//! - **InterArrivalTable**: stratified interarrival samples indexed by cumulative probability
//!
//! # Usage Example
//!
//! ```rust
//! use queueing_simulator::distributions::*;
//! use queueing_simulator::types::DistributionFamily;
//!
//! let mut generator = VariateGenerator::from_seed(Some(42));
//! let spec = DistributionSpec::new(DistributionFamily::Exponential, 5.0);
//!
//! let table = InterArrivalTable::build(&spec, 10, &mut generator)?;
//! let inter_arrival = table.resolve(generator.draw_uniform());
//! assert!(inter_arrival >= 0.0);
//! # Ok::<(), queueing_simulator::simulation::SimulationError>(())
//! ```

pub mod lookup;
pub mod variate;

// Re-export all public types for convenience
pub use lookup::*;
pub use variate::*;
