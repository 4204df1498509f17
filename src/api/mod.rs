//! API layer: callback handlers, request context, and the response envelope.
//!
//! - **[`handlers`]**: Axum route handlers for the platform callback endpoints
//! - **[`context`]**: extractors for platform-injected identity headers
//! - **[`models`]**: the uniform response envelope

pub mod context;
pub mod handlers;
pub mod models;
