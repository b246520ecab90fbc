//! Observability subsystem.
//!
//! Log output is a side channel: levels and fields may change, the exit
//! status is the contract.

pub mod logging;

pub use logging::init_logging;
