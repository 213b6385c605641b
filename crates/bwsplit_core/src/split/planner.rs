//! Segment planning over a stream duration.

/// One planned cut range. Segment numbers are 1-indexed for output naming.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub number: usize,
    pub start_secs: f64,
    pub end_secs: f64,
}

impl Segment {
    /// Planned length of this segment in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Compute the ordered segment plan for a stream of `duration_secs`.
///
/// Segments cover `[0, duration]` contiguously with no gaps or overlaps:
/// every boundary except the final end is a multiple of
/// `max_segment_secs`, and the final end is the exact source duration.
/// A duration at or below the maximum yields a single segment; a zero
/// duration yields one zero-length segment.
///
/// Pure: no I/O, deterministic for a given input pair.
pub fn plan_segments(duration_secs: f64, max_segment_secs: u32) -> Vec<Segment> {
    let max_secs = f64::from(max_segment_secs);
    let count = ((duration_secs / max_secs).ceil() as usize).max(1);

    (0..count)
        .map(|i| {
            let start = i as f64 * max_secs;
            let end = if i == count - 1 {
                duration_secs
            } else {
                start + max_secs
            };
            Segment {
                number: i + 1,
                start_secs: start,
                end_secs: end,
            }
        })
        .collect()
}
