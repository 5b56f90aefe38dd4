//! Lambda which forwards newly created S3 objects to the Scan Files API and tags each object
//! with the outcome of the scan request.

#![recursion_limit = "256"]

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod model;
pub mod service;
