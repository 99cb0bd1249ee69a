//! Configuration structures for document generation and rendering.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KsefError, Result};

/// Main configuration for the ksef-pdf pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KsefConfig {
    /// Content generation configuration.
    pub generation: GenerationConfig,

    /// PDF rendering configuration.
    pub render: RenderConfig,
}

/// Content generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Log a warning when the issuer NIP fails its checksum.
    pub validate_nip: bool,

    /// Print domestic account numbers in groups of four digits.
    pub group_account_numbers: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            validate_nip: true,
            group_account_numbers: false,
        }
    }
}

/// PDF rendering configuration. Lengths are in PDF points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Page width (A4 by default).
    pub page_width: f32,

    /// Page height (A4 by default).
    pub page_height: f32,

    /// Margin on every side.
    pub margin: f32,

    /// Body font size.
    pub font_size: f32,

    /// Document title font size.
    pub title_font_size: f32,

    /// Section heading font size.
    pub header_font_size: f32,

    /// Line height as a multiple of the font size.
    pub line_spacing: f32,

    /// Table border colour as RGB in 0..=255.
    pub table_border_color: [u8; 3],

    /// Compress page content streams.
    pub compress: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 40.0,
            font_size: 8.0,
            title_font_size: 16.0,
            header_font_size: 11.0,
            line_spacing: 1.4,
            table_border_color: [0xBA, 0xBA, 0xBA],
            compress: true,
        }
    }
}

impl KsefConfig {
    /// Load configuration from a JSON file.
    ///
    /// Missing keys take their defaults. Unreadable files are
    /// `KsefError::Io`, invalid JSON is `KsefError::Config`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| KsefError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| KsefError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: KsefConfig =
            serde_json::from_str(r#"{ "render": { "margin": 20.0 } }"#).unwrap();
        assert_eq!(config.render.margin, 20.0);
        assert_eq!(config.render.page_width, 595.0);
        assert!(config.generation.validate_nip);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = KsefConfig::default();
        config.generation.group_account_numbers = true;
        config.save(&path).unwrap();

        let loaded = KsefConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ \"render\": { \"margin\": \"wide\" } }").unwrap();

        let err = KsefConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, KsefError::Config(_)));
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = KsefConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, KsefError::Io(_)));
    }
}
