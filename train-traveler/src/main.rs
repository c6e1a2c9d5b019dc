use std::error::Error;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::watch;
use tracing::{info, warn};

use train_traveler::coordinator::Coordinator;
use train_traveler::domain::JourneySnapshot;
use train_traveler::entry::RouteEntry;
use train_traveler::journeys::{CallCounter, CountingService, FixtureJourneyService};
use train_traveler::logger::init_logger;
use train_traveler::view::{self, EntityKind, JourneyView};

/// Route entry used when `TRAIN_TRAVELER_ENTRY` is unset.
const DEFAULT_ENTRY: &str = "data/route_entry.json";

/// Fixture directory used when `TRAIN_TRAVELER_FIXTURES` is unset.
const DEFAULT_FIXTURES: &str = "data/fixtures";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logger()?;

    let entry_path =
        std::env::var("TRAIN_TRAVELER_ENTRY").unwrap_or_else(|_| DEFAULT_ENTRY.to_string());
    let fixtures =
        std::env::var("TRAIN_TRAVELER_FIXTURES").unwrap_or_else(|_| DEFAULT_FIXTURES.to_string());

    let entry = RouteEntry::load(&entry_path)?;
    info!(
        path = %entry_path,
        url = %entry.connection.url,
        region = %entry.connection.region,
        "route entry loaded"
    );

    // Both coordinators share one connection and one call counter.
    let counter = CallCounter::new();
    let service = Arc::new(CountingService::new(
        FixtureJourneyService::new(&fixtures)?,
        counter.clone(),
    ));

    let mut coordinators = Vec::new();
    for config in entry.coordinator_configs()? {
        let mode = config.mode;
        let tz = config.timezone;
        let coordinator = Arc::new(Coordinator::new(config, Arc::clone(&service)));

        // Fail fast if the first load does not succeed.
        let first = coordinator.refresh_now().await?;
        log_view(&JourneyView::new(first, mode, tz));

        coordinator
            .add_listener(Arc::new(move |snapshot: &Arc<JourneySnapshot>| {
                log_view(&JourneyView::new(Arc::clone(snapshot), mode, tz));
            }))
            .await;
        coordinators.push(coordinator);
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handles: Vec<_> = coordinators
        .iter()
        .map(|coordinator| {
            let coordinator = Arc::clone(coordinator);
            let shutdown = shutdown_rx.clone();
            tokio::spawn(async move { coordinator.run(shutdown).await })
        })
        .collect();

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    shutdown_tx.send(true)?;

    for result in join_all(handles).await {
        if let Err(err) = result {
            warn!(error = %err, "coordinator task failed");
        }
    }
    info!(calls = counter.get(), "API calls count");
    Ok(())
}

fn log_view(view: &JourneyView) {
    info!(
        device = %view::device_name(view),
        entity = %view::route_entity_id(view),
        journeys = view.len(),
        "journeys updated"
    );
    for index in 0..view.len() {
        let departure = view::departure(view, index).map(|d| d.to_rfc3339());
        info!(
            entity = %view::entity_id(view, EntityKind::Journey, index),
            departure = ?departure,
            duration = ?view::duration(view, index),
            delay = ?view::delay(view, index),
            disrupted = ?view::has_disruption(view, index),
            "journey"
        );
        if let Some(disruption) = view::disruption_attributes(view, index) {
            warn!(
                entity = %view::entity_id(view, EntityKind::Disruption, index),
                kind = %disruption.disruption_type,
                message = ?disruption.disruption_message,
                "journey disrupted"
            );
        }
    }
}
