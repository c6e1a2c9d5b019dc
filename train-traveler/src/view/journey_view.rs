//! Read-only journey view.

use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::coordinator::PollMode;
use crate::domain::time::localize;
use crate::domain::{JourneyResult, JourneySnapshot};

/// Values derived from one journey of a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyRow {
    pub departure: DateTime<Tz>,
    pub arrival: DateTime<Tz>,
    /// Delay at the start stop in seconds, when the first disruption is a
    /// significant delay there.
    pub delay_secs: Option<i64>,
    pub disrupted: bool,
}

/// A published snapshot with the values every renderer needs.
#[derive(Debug, Clone)]
pub struct JourneyView {
    snapshot: Arc<JourneySnapshot>,
    mode: PollMode,
    tz: Tz,
    rows: Vec<JourneyRow>,
}

impl JourneyView {
    pub fn new(snapshot: Arc<JourneySnapshot>, mode: PollMode, tz: Tz) -> Self {
        let start_label = snapshot.start().label();
        let rows = snapshot
            .journeys()
            .iter()
            .map(|result| row(result, start_label, tz))
            .collect();
        Self {
            snapshot,
            mode,
            tz,
            rows,
        }
    }

    pub fn snapshot(&self) -> &Arc<JourneySnapshot> {
        &self.snapshot
    }

    pub fn mode(&self) -> PollMode {
        self.mode
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn start_label(&self) -> &str {
        self.snapshot.start().label()
    }

    pub fn end_label(&self) -> &str {
        self.snapshot.end().label()
    }

    pub fn start_name(&self) -> &str {
        self.snapshot.start().name()
    }

    pub fn end_name(&self) -> &str {
        self.snapshot.end().name()
    }

    pub fn row(&self, index: usize) -> Option<&JourneyRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[JourneyRow] {
        &self.rows
    }

    pub fn result(&self, index: usize) -> Option<&JourneyResult> {
        self.snapshot.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn row(result: &JourneyResult, start_label: &str, tz: Tz) -> JourneyRow {
    let journey = &result.journey;
    JourneyRow {
        departure: localize(journey.departure, tz),
        arrival: localize(journey.arrival, tz),
        delay_secs: result
            .disruptions
            .first()
            .and_then(|d| d.departure_delay_at(start_label))
            .map(|d| d.num_seconds()),
        disrupted: result.is_disrupted(),
    }
}
