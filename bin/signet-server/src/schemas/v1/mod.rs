//! Conversions from database rows to the `/api/v1` wire types.

pub mod signature;
pub mod verification;
