//! Network layer: wire types and REST plumbing.

pub mod http;
pub mod types;
