//! Background jobs and scheduled tasks for DineHub.
//!
//! This crate provides:
//! - A job executor that dispatches jobs to the correct handler
//! - Job handlers for the retention sweep and the daily sales report
//! - A cron scheduler that triggers those jobs on configured schedules

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use scheduler::CronScheduler;
