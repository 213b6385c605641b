//! bwsplit core - backend logic for the broadcast-wave batch splitter.
//!
//! This crate contains all business logic with zero CLI dependencies:
//! probing files with ffprobe, expanding BWF comment/coding-history tags,
//! planning fixed-duration segments, propagating the sample-accurate
//! `time_reference` timecode across them, and driving ffmpeg to cut the
//! segments. The `bwsplit_app` crate wraps it in a command line front end.

pub mod config;
pub mod logging;
pub mod orchestrator;
pub mod probe;
pub mod split;
pub mod tools;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
