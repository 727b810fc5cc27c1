//! Exercises the gRPC control-plane client against an in-process
//! companion server bound to an ephemeral port.

use anyhow::Result;
use entlook::control_plane::{Companion, ControlPlaneClient};
use entlook::EntlookError;
use entlook_proto::{
    CompanionService, CompanionServiceServer, PingReply, PingRequest, UsageAck, UsageEvent,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Request, Response, Status};

#[derive(Default)]
struct TestCompanion {
    ping_delay: Duration,
    fail_usage: bool,
    events: Arc<Mutex<Vec<UsageEvent>>>,
}

#[tonic::async_trait]
impl CompanionService for TestCompanion {
    async fn ping(&self, request: Request<PingRequest>) -> Result<Response<PingReply>, Status> {
        if !self.ping_delay.is_zero() {
            tokio::time::sleep(self.ping_delay).await;
        }

        let component = request.into_inner().component_name;
        Ok(Response::new(PingReply {
            message: format!("Pong {}", component),
        }))
    }

    async fn report_usage(
        &self,
        request: Request<UsageEvent>,
    ) -> Result<Response<UsageAck>, Status> {
        if self.fail_usage {
            return Err(Status::unavailable("telemetry store offline"));
        }

        self.events.lock().unwrap().push(request.into_inner());
        Ok(Response::new(UsageAck {}))
    }
}

async fn spawn_companion(service: TestCompanion) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(CompanionServiceServer::new(service))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .ok();
    });

    Ok(addr)
}

#[tokio::test]
async fn ping_round_trip() -> Result<()> {
    let addr = spawn_companion(TestCompanion::default()).await?;

    let mut client = ControlPlaneClient::connect(&addr.to_string()).await?;
    let message = client.ping("lookup").await?;

    assert_eq!(message, "Pong lookup");
    Ok(())
}

#[tokio::test]
async fn usage_report_round_trip() -> Result<()> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let addr = spawn_companion(TestCompanion {
        events: events.clone(),
        ..TestCompanion::default()
    })
    .await?;

    let mut client = ControlPlaneClient::connect(&addr.to_string()).await?;
    client
        .report_usage(UsageEvent {
            duration_ms: 12,
            feature: "lookup_event".to_string(),
            feature_data: HashMap::from([("search".to_string(), "user".to_string())]),
        })
        .await?;

    let recorded = events.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].duration_ms, 12);
    assert_eq!(recorded[0].feature, "lookup_event");
    Ok(())
}

#[tokio::test]
async fn slow_ping_hits_the_one_second_deadline() -> Result<()> {
    let addr = spawn_companion(TestCompanion {
        ping_delay: Duration::from_secs(3),
        ..TestCompanion::default()
    })
    .await?;

    let mut client = ControlPlaneClient::connect(&addr.to_string()).await?;
    let started = Instant::now();
    let err = client.ping("lookup").await.unwrap_err();

    assert!(matches!(err, EntlookError::Ping(_)));
    assert!(started.elapsed() < Duration::from_secs(3));
    Ok(())
}

#[tokio::test]
async fn connect_to_absent_companion_fails() -> Result<()> {
    // bind and immediately drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let err = ControlPlaneClient::connect(&addr.to_string())
        .await
        .err()
        .expect("connect should fail");

    assert!(matches!(err, EntlookError::ControlPlaneConnect { .. }));
    Ok(())
}

#[tokio::test]
async fn rejected_usage_report_surfaces_as_telemetry_error() -> Result<()> {
    let addr = spawn_companion(TestCompanion {
        fail_usage: true,
        ..TestCompanion::default()
    })
    .await?;

    let mut client = ControlPlaneClient::connect(&addr.to_string()).await?;
    let err = client
        .report_usage(UsageEvent {
            duration_ms: 5,
            feature: "lookup_event".to_string(),
            feature_data: HashMap::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, EntlookError::Telemetry(_)));
    Ok(())
}
