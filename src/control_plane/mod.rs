//! Client side of the local control-plane companion
//!
//! The companion is a sibling process on the same machine. It answers a
//! liveness ping before any lookup runs, and collects one best-effort
//! usage event after the lookup completes. The [`Companion`] trait is the
//! seam between the invocation sequencing and the gRPC transport.

pub mod client;

pub use client::ControlPlaneClient;

use crate::Result;
use async_trait::async_trait;
use entlook_proto::UsageEvent;

/// Feature tag carried by every lookup usage event.
pub const LOOKUP_FEATURE: &str = "lookup_event";

#[async_trait]
pub trait Companion {
    /// Liveness check. The reply message is informational only; a
    /// transport failure or missed deadline is fatal to the invocation.
    async fn ping(&mut self, component_name: &str) -> Result<String>;

    /// Report one completed lookup. Callers log a failure and move on;
    /// it must never affect the primary result.
    async fn report_usage(&mut self, event: UsageEvent) -> Result<()>;
}
