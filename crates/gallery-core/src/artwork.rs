// ABOUTME: Artwork records and manifest loading.
// ABOUTME: An artwork carries its intrinsic pixel size, which fixes its aspect ratio.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Which gallery page an artwork belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Paintings,
    Drawings,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[Category::Paintings, Category::Drawings]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Paintings => "Paintings",
            Category::Drawings => "Drawings",
        }
    }

    /// Keep only artworks in this category, preserving their order
    pub fn filter(&self, artworks: &[Artwork]) -> Vec<Artwork> {
        artworks
            .iter()
            .filter(|a| a.category == *self)
            .cloned()
            .collect()
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paintings" => Ok(Category::Paintings),
            "drawings" => Ok(Category::Drawings),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub year: u32,
    /// Medium and physical size, e.g. "Oil on canvas, 100 x 100 cm"
    #[serde(default)]
    pub material: String,
    /// Image URL or path, handed to the renderer untouched
    pub src: String,
    /// Intrinsic pixel width
    pub width: u32,
    /// Intrinsic pixel height
    pub height: u32,
    #[serde(default)]
    pub category: Category,
}

impl Artwork {
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Load a JSON array of artworks and reject any with a zero dimension
    pub fn load_manifest(path: &Path) -> Result<Vec<Artwork>, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        let artworks = Self::parse_manifest(&content)?;
        tracing::info!("Loaded {} artworks from {}", artworks.len(), path.display());
        Ok(artworks)
    }

    pub fn parse_manifest(content: &str) -> Result<Vec<Artwork>, ManifestError> {
        let artworks: Vec<Artwork> = serde_json::from_str(content)?;
        if let Some(bad) = artworks.iter().find(|a| a.width == 0 || a.height == 0) {
            return Err(ManifestError::InvalidDimensions {
                id: bad.id.clone(),
                width: bad.width,
                height: bad.height,
            });
        }
        Ok(artworks)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Artwork {id} has invalid dimensions {width}x{height}")]
    InvalidDimensions { id: String, width: u32, height: u32 },
}
