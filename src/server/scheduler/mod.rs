//! Background jobs.
//!
//! The only job is the poll countdown. It runs on `tokio-cron-scheduler` with a
//! fixed repeat interval taken from the poll settings and is rescheduled whenever an
//! admin changes that interval.

pub mod countdown;
