//! Configuration for the splitter.
//!
//! Settings live in an optional `bwsplit.toml` next to the working
//! directory; a missing file falls back to the built-in defaults, which
//! carry the domain constants (segment length, size threshold).

mod settings;

pub use settings::{
    ConfigError, LoggingSettings, PathSettings, Settings, SplitSettings, ToolSettings,
};
