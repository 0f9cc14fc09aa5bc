//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: a single in-process store implementing every repository
//! - **ai**: OpenAI-compatible chat completions for question augmentation
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod ai;
pub mod memory;
pub mod persistence;
