//! Syllabus: exam countdown and persisted syllabus checklist
//!
//! Normalizes an external subject document into a canonical forest, tracks
//! checked leaves and expanded nodes per tree position, and mirrors that state
//! into a primary and a secondary durable store.

pub mod checklist;
pub mod config;
pub mod countdown;
pub mod document;
pub mod error;
pub mod logging;
pub mod page;
pub mod session;
pub mod store;
pub mod tooling;
pub mod types;
