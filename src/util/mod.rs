//! Utility helpers shared across widget modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and pure rule tables
//! from component logic to improve reuse and testability.

pub mod chat_rules;
pub mod dom;
pub mod storage;
pub mod validate;
