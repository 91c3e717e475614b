//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and pure rules into use-case level APIs.
//! - Keep transport layers decoupled from storage and rule details.
//!
//! # Invariants
//! - Every operation takes the authenticated user and, where time matters,
//!   an explicit `now`; no ambient clock reads.

pub mod category_service;
pub mod stats_service;
pub mod task_service;
