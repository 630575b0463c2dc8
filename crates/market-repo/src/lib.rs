//! In-memory stand-in for the remote marketplace service.

#[cfg(not(feature = "memory"))]
compile_error!("Enable the `memory` feature.");

#[cfg(feature = "memory")]
pub mod fixtures;
#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "memory")]
pub use memory::InMemoryMarket;
