//! Middleware module
//!
//! Request-level middleware applied by the router

pub mod logging;
