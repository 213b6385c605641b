//! File probing and BWF tag expansion.
//!
//! Uses ffprobe with JSON output to read stream and format metadata,
//! then expands the broadcast-wave `comment` and `coding_history` tags
//! into structured form for the split pipeline.

mod ffprobe;
mod tags;
mod types;

pub use ffprobe::{parse_report, probe_file};
pub use tags::expand_tags;
pub use types::{
    CodingHistory, FormatInfo, FormatTags, ProbeError, ProbeReport, ProbeResult, StreamInfo,
};
