//! Thin client for the platform's entity-inventory search API
//!
//! The platform indexes entities (users, machines, images) observed in
//! the monitored environment and exposes an attribute-equality search
//! over a time range. This module owns the wire shapes and the HTTP
//! plumbing; what to search for is decided in [`crate::lookup`].

pub mod client;
pub mod types;

pub use client::InventoryClient;
pub use types::{FieldFilter, SearchRequest, SearchResponse, TimeFilter, UserEntity};

use crate::Result;
use async_trait::async_trait;

/// Entity search as the lookup dispatcher consumes it.
///
/// One method per response shape: user records carry a typed machine-id
/// association, machine records are arbitrary structured attributes.
#[async_trait]
pub trait EntitySearch {
    async fn search_users(&self, request: &SearchRequest) -> Result<SearchResponse<UserEntity>>;

    async fn search_machines(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse<serde_json::Value>>;
}
