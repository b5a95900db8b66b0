//! The mission financial cascade and the commission distribution
//! resolver.

pub mod cascade;
pub mod distribution;
