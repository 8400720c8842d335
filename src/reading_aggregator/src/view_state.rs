//! Chart state driven by explicit events.
//!
//! Points are recomputed only when the snapshot, the filter, or the
//! reference instant changes, never on a view lifecycle callback. Each
//! recomputation starts from scratch.

use chrono::NaiveDateTime;

use crate::{
    aggregate::{self, ChartSeries},
    models::{chart_point::ChartPoint, filter::FilterKind, reading_log::ReadingLog},
};

/// Something that invalidates the current chart.
#[derive(Debug, Clone)]
pub enum ChartEvent {
    /// A new log snapshot was fetched.
    SnapshotChanged(ReadingLog),
    /// The user picked another filter.
    FilterChanged(FilterKind),
    /// "Now" moved (e.g. the date rolled over).
    ReferenceChanged(NaiveDateTime),
}

/// Current chart inputs and the series derived from them.
#[derive(Debug, Clone)]
pub struct ChartState {
    snapshot: Option<ReadingLog>,
    filter: FilterKind,
    reference: NaiveDateTime,
    series: Option<ChartSeries>,
}

impl ChartState {
    /// No snapshot yet; points stay empty until one arrives.
    pub fn new(filter: FilterKind, reference: NaiveDateTime) -> Self {
        Self {
            snapshot: None,
            filter,
            reference,
            series: None,
        }
    }

    /// Selected filter.
    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    /// Reference instant used as "now".
    pub fn reference(&self) -> NaiveDateTime {
        self.reference
    }

    /// Latest computed series, if a snapshot has arrived.
    pub fn series(&self) -> Option<&ChartSeries> {
        self.series.as_ref()
    }

    /// Latest computed points.
    pub fn points(&self) -> &[ChartPoint] {
        match &self.series {
            Some(series) => &series.points,
            None => &[],
        }
    }

    /// Apply an event and return the recomputed points.
    pub fn apply(&mut self, event: ChartEvent) -> &[ChartPoint] {
        match event {
            ChartEvent::SnapshotChanged(log) => self.snapshot = Some(log),
            ChartEvent::FilterChanged(kind) => self.filter = kind,
            ChartEvent::ReferenceChanged(at) => self.reference = at,
        }
        self.series = self
            .snapshot
            .as_ref()
            .map(|log| aggregate::chart_series(log, self.filter, self.reference));
        self.points()
    }
}
