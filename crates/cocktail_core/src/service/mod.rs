//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Translate repository outcomes into NotFound / in-use / validation errors.
//!
//! # Invariants
//! - Services receive their store handle at construction; none of them reach
//!   for a global connection.

pub mod catalog_service;
pub mod cocktail_service;
pub mod ingredient_service;
