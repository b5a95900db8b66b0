//! Random dataset generation for stress-testing the aggregation
//! pipeline and seeding CLI demos.

pub mod dataset;
