//! Flat shapes derived from a parsed FluxML document, as consumed by flux analysis script
//! generators
pub mod dataset;
pub mod reaction_network;
pub mod tracer;
