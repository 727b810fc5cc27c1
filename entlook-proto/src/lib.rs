//! gRPC protocol definitions for the entlook control-plane companion
//!
//! Defines:
//! - `CompanionService` - liveness and usage-telemetry interface
//! - Request and reply message types
//!
//! Generated from `proto/entlook.proto`.

pub mod v1 {
    tonic::include_proto!("entlook.v1");
}

pub use v1::companion_service_client::CompanionServiceClient;
pub use v1::companion_service_server::{CompanionService, CompanionServiceServer};
pub use v1::*;
