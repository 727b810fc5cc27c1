//! Invocation sequencing
//!
//! One logical thread of control per run: connect → ping → parse →
//! search → render → telemetry → release the connection. The collaborators
//! are trait-typed so the whole sequence runs against stubs in tests.

use crate::cli::Cli;
use crate::config::Config;
use crate::control_plane::{Companion, ControlPlaneClient, LOOKUP_FEATURE};
use crate::inventory::{EntitySearch, InventoryClient};
use crate::lookup::EntityLookupDispatcher;
use crate::query::{LookupQuery, TimeWindow};
use crate::{EntlookError, Result};
use entlook_proto::UsageEvent;
use std::collections::HashMap;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, error, info};

pub async fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();
    let config = Config::from_env()?;

    let target = config.companion.target();
    info!("connecting to control plane at {}", target);
    let mut companion = ControlPlaneClient::connect(&target).await?;

    let inventory = InventoryClient::new(&config)?;

    let mut stdout = std::io::stdout();
    run_lookup(
        &mut companion,
        &inventory,
        &config.component_name,
        cli.query.as_deref(),
        &mut stdout,
        started,
    )
    .await
}

/// Ping, parse, dispatch, telemetry — in that order.
///
/// The ping must succeed before anything touches the platform. The usage
/// event is sent once the dispatch result is known, on every dispatch
/// exit path, and a failed send never masks that result.
pub async fn run_lookup<C, S, W>(
    companion: &mut C,
    search: &S,
    component_name: &str,
    raw_query: Option<&str>,
    out: &mut W,
    started: Instant,
) -> Result<()>
where
    C: Companion,
    S: EntitySearch,
    W: Write,
{
    let reply = companion.ping(component_name).await?;
    debug!("control plane is alive: {}", reply);

    let query = match raw_query.map(LookupQuery::parse) {
        Some(Ok(query)) => query,
        Some(Err(err)) => {
            print_usage(out)?;
            return Err(err);
        }
        None => {
            print_usage(out)?;
            return Err(EntlookError::InvalidQuery(
                "missing lookup argument".to_string(),
            ));
        }
    };

    let window = TimeWindow::last_day();
    let dispatcher = EntityLookupDispatcher::new(search);
    let result = dispatcher.dispatch(&query, &window, out).await;

    // the search key identifies the lookup shape; the value never leaves
    // the process
    let event = UsageEvent {
        duration_ms: started.elapsed().as_millis() as i64,
        feature: LOOKUP_FEATURE.to_string(),
        feature_data: HashMap::from([("search".to_string(), query.kind.keyword().to_string())]),
    };
    if let Err(err) = companion.report_usage(event).await {
        error!("unable to send usage event: {}", err);
    }

    result
}

pub fn print_usage<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Search for entities seen in your environment during the last day."
    )?;
    writeln!(out)?;
    writeln!(out, "Usage: entlook <kind>:<value>")?;
    writeln!(out, "Kinds: user, machine, image")?;
    writeln!(out)?;
    writeln!(out, "Try the argument 'user:root'.")?;
    Ok(())
}
