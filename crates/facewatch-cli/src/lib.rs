//! Shared pieces of the facewatch binaries: configuration, the per-cycle
//! identification policy, and rebuild naming rules.

pub mod config;
pub mod cycle;
pub mod naming;
