//! # hg-core
//!
//! Core types, ID generation, and error types for HealthGuard.
//!
//! This crate provides the foundational types shared across all HealthGuard crates:
//! - Entity structs for health records, sensors, and alerts
//! - Vocabulary and status enums with state machine transitions
//! - ID prefix constants and generation helpers
//! - Cross-cutting error types
//! - Journal entry envelope for JSONL persistence
//! - Analytics response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod journal;
pub mod responses;
