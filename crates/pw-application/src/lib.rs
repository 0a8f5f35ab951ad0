//! Application layer for Persona Weaver.
//!
//! This crate provides the use case that coordinates the domain model,
//! storage, and the generation provider for one persona editing surface.

pub mod workshop;

pub use workshop::{PersonaWorkshop, RevisionProposal};
