//! Shared fixtures for coordinator tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::time::{REFERENCE_TZ, localize};
use crate::domain::{Area, AreaId, Coord, Journey, JourneyResult, JourneySnapshot};
use crate::journeys::{FetchError, JourneyService};

pub(crate) fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

/// Instant at a Paris wall-clock time.
pub(crate) fn paris(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    localize(naive(y, mo, d, h, mi), REFERENCE_TZ).with_timezone(&Utc)
}

pub(crate) fn area(id: &str, label: &str) -> Area {
    Area::new(
        AreaId::parse(id).unwrap(),
        label,
        label,
        Coord::new(4.8, 45.7).unwrap(),
    )
}

pub(crate) fn lyon() -> Area {
    area("stop_area:SNCF:87723197", "Lyon Part Dieu (Lyon)")
}

pub(crate) fn grenoble() -> Area {
    area("stop_area:SNCF:87747006", "Grenoble (Grenoble)")
}

pub(crate) fn snapshot_departing(departures: &[NaiveDateTime]) -> JourneySnapshot {
    let journeys = departures
        .iter()
        .map(|&departure| {
            JourneyResult::new(
                Journey {
                    departure,
                    arrival: departure + chrono::Duration::minutes(84),
                    sections: vec![],
                },
                vec![],
            )
        })
        .collect();
    JourneySnapshot::new(lyon(), grenoble(), journeys)
}

/// Journey service returning a configurable departure and counting calls.
pub(crate) struct MockService {
    departure: Mutex<NaiveDateTime>,
    fail: AtomicBool,
    delay: Mutex<Option<Duration>>,
    direct_calls: AtomicUsize,
    last_calls: AtomicUsize,
    requested_counts: Mutex<Vec<u32>>,
}

impl MockService {
    pub(crate) fn departing(departure: NaiveDateTime) -> Self {
        Self {
            departure: Mutex::new(departure),
            fail: AtomicBool::new(false),
            delay: Mutex::new(None),
            direct_calls: AtomicUsize::new(0),
            last_calls: AtomicUsize::new(0),
            requested_counts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn set_departure(&self, departure: NaiveDateTime) {
        *self.departure.lock().unwrap() = departure;
    }

    pub(crate) fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    pub(crate) fn direct_calls(&self) -> usize {
        self.direct_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_calls(&self) -> usize {
        self.last_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.direct_calls() + self.last_calls()
    }

    pub(crate) fn requested_counts(&self) -> Vec<u32> {
        self.requested_counts.lock().unwrap().clone()
    }

    async fn respond(&self, start: &Area, end: &Area) -> Result<JourneySnapshot, FetchError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(FetchError::Unavailable("planner returned 503".into()));
        }
        let departure = *self.departure.lock().unwrap();
        let journeys = snapshot_departing(&[departure]).journeys().to_vec();
        Ok(JourneySnapshot::new(start.clone(), end.clone(), journeys))
    }
}

impl JourneyService for MockService {
    async fn get_direct_journeys(
        &self,
        start: &Area,
        end: &Area,
        count: u32,
    ) -> Result<JourneySnapshot, FetchError> {
        self.direct_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_counts.lock().unwrap().push(count);
        self.respond(start, end).await
    }

    async fn get_last_direct_journey(
        &self,
        start: &Area,
        end: &Area,
    ) -> Result<JourneySnapshot, FetchError> {
        self.last_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(start, end).await
    }
}
