//! Segment planning, timecode propagation, and cut execution.

mod executor;
mod planner;
mod timecode;

pub use executor::{cut_args, cut_segment, segment_file_name, CutRequest, SplitError};
pub use planner::{plan_segments, Segment};
pub use timecode::{format_hms, propagate, SegmentTimecode, SAMPLES_PER_DAY, SAMPLE_RATE};
