//! Sample-accurate timecode propagation across segments.
//!
//! The BWF `time_reference` field counts samples since midnight at a
//! fixed 48 kHz rate, so a position one day in is `SAMPLES_PER_DAY`
//! samples. Advancing past the end of the day wraps back to zero.

/// Fixed BWF sample rate for this domain.
pub const SAMPLE_RATE: u64 = 48_000;

/// Samples in a 24-hour day at `SAMPLE_RATE` (48000 * 86400).
pub const SAMPLES_PER_DAY: u64 = 4_147_200_000;

/// Timecode assigned to one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentTimecode {
    /// Absolute position within the day, in samples.
    pub samples: u64,
    /// True when this advance crossed the 24-hour boundary.
    pub wrapped: bool,
}

/// Compute the starting timecode for each of `num_segments` segments.
///
/// Segment 0 keeps `initial_samples` untouched. Every later segment
/// advances by the *maximum* segment duration in samples, not the actual
/// duration of the (possibly shorter) final segment, so segment starts
/// stay evenly spaced on the timecode axis. Each advance is reduced
/// modulo `SAMPLES_PER_DAY`; a reduction that changed the value is
/// flagged as wrapped so callers can report it.
pub fn propagate(
    initial_samples: u64,
    max_segment_secs: u32,
    num_segments: usize,
) -> Vec<SegmentTimecode> {
    let increment = u64::from(max_segment_secs) * SAMPLE_RATE;
    let mut current = initial_samples;
    let mut timecodes = Vec::with_capacity(num_segments);

    for i in 0..num_segments {
        let mut wrapped = false;
        if i > 0 {
            let advanced = current % SAMPLES_PER_DAY + increment;
            wrapped = advanced >= SAMPLES_PER_DAY;
            current = advanced % SAMPLES_PER_DAY;
        }
        timecodes.push(SegmentTimecode {
            samples: current,
            wrapped,
        });
    }

    timecodes
}

/// Render a timecode as `HH:MM:SS` for log output.
///
/// Derived for observability only; the sample count stays authoritative.
pub fn format_hms(samples: u64) -> String {
    let total_secs = samples / SAMPLE_RATE;
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
