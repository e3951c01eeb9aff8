//! Endpoint use-cases.
//!
//! # Responsibility
//! - Orchestrate store calls into CRUD and related-list use-cases.
//! - Keep transport layers decoupled from storage details; stores are passed
//!   in at construction.

pub mod crud_endpoint;
pub mod related_endpoint;
