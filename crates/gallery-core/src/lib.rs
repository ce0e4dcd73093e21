// ABOUTME: Shared types and configuration for the justified gallery.
// ABOUTME: Defines artworks, manifests, layout settings, and config file handling.

pub mod artwork;
pub mod config;

pub use artwork::{Artwork, Category, ManifestError};
pub use config::{Breakpoint, Config, ConfigError, LayoutSettings, DEFAULT_GAP};
