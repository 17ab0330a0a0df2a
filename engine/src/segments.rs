//! Day-part segmentation of the 24-hour day.
//!
//! Each property configures a day-start and a night-start hour; from that
//! pair a table of six named segments is derived once per run. Dawn takes up
//! to the first two daylight hours and Dusk the last two; the remaining
//! daylight splits into Morning, Midday and Afternoon; Night covers
//! everything else. Spans are half-open hour ranges on a 24-hour circle, so
//! a span may wrap past midnight (Night 20-6 is the common case).
//!
//! The partition invariant - every hour 0-23 maps to exactly one segment,
//! no gaps, no overlaps - is checked centrally when the table is built
//! rather than being implied by per-variant match arms.

use crate::error::{EngineError, EngineResult};
use crate::models::PropertyConfig;
use chrono::{NaiveDateTime, Timelike};

/// The fixed set of day-parts, in chronological order from day start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeSegment {
    Dawn,
    Morning,
    Midday,
    Afternoon,
    Dusk,
    Night,
}

impl TimeSegment {
    /// All segments in their fixed chronological order.
    pub const ORDERED: [TimeSegment; 6] = [
        TimeSegment::Dawn,
        TimeSegment::Morning,
        TimeSegment::Midday,
        TimeSegment::Afternoon,
        TimeSegment::Dusk,
        TimeSegment::Night,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSegment::Dawn => "Dawn",
            TimeSegment::Morning => "Morning",
            TimeSegment::Midday => "Midday",
            TimeSegment::Afternoon => "Afternoon",
            TimeSegment::Dusk => "Dusk",
            TimeSegment::Night => "Night",
        }
    }

    /// Position in [`TimeSegment::ORDERED`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Hour span of one segment: half-open `[start, start + length)` on the
/// 24-hour circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpan {
    pub segment: TimeSegment,
    pub start_hour: u8,
    pub length_hours: u8,
}

impl SegmentSpan {
    /// Exclusive end hour, wrapped onto 0-23.
    pub fn end_hour(&self) -> u8 {
        (self.start_hour + self.length_hours) % 24
    }

    /// Whether the given hour (0-23) falls inside this span.
    pub fn contains_hour(&self, hour: u8) -> bool {
        ((hour % 24) + 24 - self.start_hour) % 24 < self.length_hours
    }

    /// A span may be empty when the property's daylight window is too short
    /// to give every day-part a non-zero share.
    pub fn is_empty(&self) -> bool {
        self.length_hours == 0
    }
}

/// Validated day-part table for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTable {
    spans: [SegmentSpan; 6],
}

impl SegmentTable {
    /// Derive the segment table from a property's day/night hours.
    ///
    /// # Errors
    /// `InvalidConfiguration` when an hour is outside 0-23, when the two
    /// hours coincide (degenerate partition), or when the derived spans fail
    /// the central partition check.
    pub fn build(config: &PropertyConfig) -> EngineResult<Self> {
        let day = config.day_start_hour;
        let night = config.night_start_hour;

        if day > 23 || night > 23 {
            return Err(EngineError::InvalidConfiguration(format!(
                "Day-part hours must be 0-23, got day={} night={}",
                day, night
            )));
        }
        if day == night {
            return Err(EngineError::InvalidConfiguration(format!(
                "Day-start and night-start hours coincide at {}; the day-part partition is degenerate",
                day
            )));
        }

        let daylight = (night as i32 - day as i32).rem_euclid(24) as u8;
        let dawn = daylight.min(2);
        let after_dawn = daylight - dawn;
        let dusk = after_dawn.min(2);
        let interior = after_dawn - dusk;
        let morning = interior / 3;
        let afternoon = interior / 3;
        let midday = interior - morning - afternoon;
        let night_len = 24 - daylight;

        let lengths = [dawn, morning, midday, afternoon, dusk, night_len];
        let mut spans = [SegmentSpan {
            segment: TimeSegment::Dawn,
            start_hour: day,
            length_hours: 0,
        }; 6];
        let mut start = day;
        for (i, segment) in TimeSegment::ORDERED.iter().enumerate() {
            spans[i] = SegmentSpan {
                segment: *segment,
                start_hour: start,
                length_hours: lengths[i],
            };
            start = (start + lengths[i]) % 24;
        }

        let table = Self { spans };
        table.check_partition()?;
        Ok(table)
    }

    /// Central partition check: every hour maps to exactly one span.
    fn check_partition(&self) -> EngineResult<()> {
        for hour in 0u8..24 {
            let owners = self.spans.iter().filter(|s| s.contains_hour(hour)).count();
            if owners != 1 {
                return Err(EngineError::InvalidConfiguration(format!(
                    "Hour {} maps to {} segments; the day-part table is not a partition",
                    hour, owners
                )));
            }
        }
        Ok(())
    }

    /// Spans in fixed chronological order.
    pub fn spans(&self) -> &[SegmentSpan] {
        &self.spans
    }

    pub fn span(&self, segment: TimeSegment) -> &SegmentSpan {
        &self.spans[segment.index()]
    }

    /// Segment owning the given hour. Total over 0-23 by construction.
    pub fn segment_for_hour(&self, hour: u8) -> TimeSegment {
        let hour = hour % 24;
        self.spans
            .iter()
            .find(|s| s.contains_hour(hour))
            .map(|s| s.segment)
            .expect("partition check guarantees every hour is owned")
    }

    /// Segment owning a property-local capture time.
    pub fn segment_for(&self, at: &NaiveDateTime) -> TimeSegment {
        self.segment_for_hour(at.hour() as u8)
    }
}
