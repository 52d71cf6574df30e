//! HTTP server for uploading datasets and downloading reports.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
