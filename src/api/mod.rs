//! HTTP layer: bearer identity, links JSON API, redirect and health endpoints

pub mod identity;
pub mod jwt;
pub mod services;

pub use identity::Caller;
pub use jwt::{Claims, JwtService};
