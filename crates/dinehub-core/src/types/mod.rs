//! Core type definitions used across the DineHub workspace.

pub mod pagination;
pub mod range;

pub use pagination::{PageRequest, PageResponse};
pub use range::TimeRange;
