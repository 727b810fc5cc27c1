use crate::control_plane::Companion;
use crate::{EntlookError, Result};
use async_trait::async_trait;
use entlook_proto::{CompanionServiceClient, PingRequest, UsageEvent};
use std::time::Duration;
use tokio::time::timeout;
use tonic::transport::Channel;
use tracing::debug;

const PING_TIMEOUT: Duration = Duration::from_secs(1);

/// Usage reports run under their own deadline; the ping budget may
/// already be spent by the time the lookup finishes.
const USAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// gRPC client for the control-plane companion.
pub struct ControlPlaneClient {
    inner: CompanionServiceClient<Channel>,
}

impl ControlPlaneClient {
    /// Dial the companion once, no retries. The companion runs on the
    /// same machine, so the connection is plaintext.
    pub async fn connect(target: &str) -> Result<Self> {
        debug!("connecting to control plane at {}", target);

        let inner = CompanionServiceClient::connect(format!("http://{}", target))
            .await
            .map_err(|e| EntlookError::ControlPlaneConnect {
                address: target.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl Companion for ControlPlaneClient {
    async fn ping(&mut self, component_name: &str) -> Result<String> {
        let request = PingRequest {
            component_name: component_name.to_string(),
        };

        let reply = timeout(PING_TIMEOUT, self.inner.ping(request))
            .await
            .map_err(|_| {
                EntlookError::Ping(format!("no reply within {}s", PING_TIMEOUT.as_secs()))
            })?
            .map_err(|status| EntlookError::Ping(status.to_string()))?
            .into_inner();

        debug!("control plane ping reply: {}", reply.message);
        Ok(reply.message)
    }

    async fn report_usage(&mut self, event: UsageEvent) -> Result<()> {
        timeout(USAGE_TIMEOUT, self.inner.report_usage(event))
            .await
            .map_err(|_| {
                EntlookError::Telemetry(format!("no ack within {}s", USAGE_TIMEOUT.as_secs()))
            })?
            .map_err(|status| EntlookError::Telemetry(status.to_string()))?;

        Ok(())
    }
}
