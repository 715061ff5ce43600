//! Plant Benchgen: synthetic manufacturing scenarios for planner benchmarks.
//!
//! Builds a bill-of-materials tree of a requested size, turns its inner
//! nodes into workstations and its leaves into stocked items, lays the
//! workstations out on a grid, and writes the same scenario as a PDDL
//! problem, an N3 state document and a JSON-LD graph.

pub mod config;
pub mod core;
pub mod logging;
pub mod schema;
