//! HTTP surface: routing, shared context and error mapping.
//!
//! The routing layer contains no decision logic; it marshals requests into
//! the core components and mirrors the response envelopes of the original
//! service.

pub mod endpoints;
pub mod error;
pub mod router;

use std::sync::Arc;

use crate::core_state::CoreState;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}
