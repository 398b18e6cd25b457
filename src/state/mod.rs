//! State management module
//!
//! This module holds the per-user attribute record and its durable storage

pub mod attributes;
pub mod storage;

pub use attributes::{SessionAttributes, SkillState};
pub use storage::{AttributeStore, InMemoryAttributeStore, RedisAttributeStore, SharedAttributeStore};
