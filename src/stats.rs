use serde::Serialize;

use crate::geo::is_sentinel;
use crate::station::{Rejection, Station, StationType};

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct PipelineStats {
    pub rows_read: usize,
    pub accepted: usize,

    // accepted by type
    pub stations: usize,
    pub stops: usize,

    // rejections
    pub rejected_unnamed: usize,
    pub rejected_child_stop: usize,
    pub rejected_out_of_bounds: usize,

    // accepted record fields
    pub sentinel_coordinates: usize,
    pub with_code: usize,
    pub with_platform: usize,
}

impl PipelineStats {
    pub fn record_accepted(&mut self, station: &Station) {
        self.accepted += 1;

        match station.kind {
            StationType::Station => self.stations += 1,
            StationType::Stop => self.stops += 1,
        }

        if is_sentinel(station.lat, station.lon) {
            self.sentinel_coordinates += 1;
        }

        if station.code.is_some() {
            self.with_code += 1;
        }

        if station.platform.is_some() {
            self.with_platform += 1;
        }
    }

    pub fn record_rejected(&mut self, reason: Rejection) {
        match reason {
            Rejection::Unnamed => self.rejected_unnamed += 1,
            Rejection::ChildStop => self.rejected_child_stop += 1,
            Rejection::OutOfBounds => self.rejected_out_of_bounds += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.rejected_unnamed + self.rejected_child_stop + self.rejected_out_of_bounds
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn acceptance_pct(&self) -> f64 {
        Self::pct(self.accepted, self.rows_read)
    }
}
