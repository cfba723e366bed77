//! Snaplink - A URL shortener with owner-scoped links and click counting
//!
//! Users submit a long URL and receive a short code; visiting `/r/{code}`
//! redirects to the original URL and counts the visit.
//!
//! # Architecture
//! - `services`: short-code generation and the link service (create, update,
//!   delete, lookup, visit accounting)
//! - `storage`: SeaORM-backed link store (SQLite, MySQL, PostgreSQL)
//! - `api`: HTTP services (links JSON API, redirect, health) and bearer identity
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
