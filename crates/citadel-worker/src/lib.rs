//! Scheduled background jobs for Safe Citadel.
//!
//! This crate provides:
//! - A job executor that dispatches by job type
//! - A cron scheduler that runs registered jobs on their schedules
//! - The visit expiry sweep job

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use scheduler::CronScheduler;
