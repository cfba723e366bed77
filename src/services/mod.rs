//! Service layer
//!
//! Business logic shared by the HTTP handlers.

pub mod code_generator;
pub mod link_service;

pub use code_generator::{CodeGenerator, RandomCodeGenerator};
pub use link_service::{
    CreateLinkRequest, LinkCreated, LinkService, MAX_GENERATION_ATTEMPTS, UpdateLinkRequest,
};
