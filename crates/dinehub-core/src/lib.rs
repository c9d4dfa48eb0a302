//! # dinehub-core
//!
//! Core crate for DineHub. Contains configuration schemas, shared
//! time-range and pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DineHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
