//! Core workflows for the WIRIA community organization's public website:
//! membership registration and renewal fees, donation intake over M-Pesa,
//! and outreach form delivery with graceful degradation when the backend
//! is unreachable.

pub mod backend;
pub mod config;
pub mod error;
pub mod notify;
pub mod telemetry;
pub mod workflows;
