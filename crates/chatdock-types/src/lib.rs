//! Shared domain types for chatdock.
//!
//! This crate contains the domain types used across the chatdock workspace:
//! Bot, Company, KnowledgeItem, PollingRecord, client configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod bot;
pub mod company;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod polling;
