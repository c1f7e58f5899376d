//! signet-server – read-only query layer over registered signatures and
//! verification attempts.
//!
//! The binary in `main.rs` wires these modules together; they are exposed as
//! a library so the store can be driven directly by whatever writes the rows.

pub mod config;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schemas;
pub mod state;

#[cfg(test)]
mod testing;
