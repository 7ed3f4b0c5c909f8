//! spotprice library
//!
//! Looks up what an EC2 instance type cost on the spot market over a recent
//! window, optionally restricted to availability zones. Used by the
//! `spotprice` CLI and the `spotprice-lambda` API Gateway handler.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod exit_codes;
pub mod fetch;
pub mod logging;
pub mod query;
pub mod region;
pub mod service;
pub mod validation;
pub mod window;

// Re-export commonly used types
pub use aggregate::AggregateResult;
pub use error::{Result, SpotPriceError};
pub use query::{OsFamily, QueryDescriptor, RequestParameters};
pub use service::{Ec2SourceProvider, PriceService, SourceProvider};
