use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ThemeError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDescriptor {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
    pub style: ThemeStyle,
}

/// Hex color values, `#RRGGBB` in the built-ins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub accent: String,
    pub word_color: String,
    pub meaning_color: String,
    pub sentence_color: String,
    pub button_color: String,
    pub button_text: String,
}

impl ThemeColors {
    pub fn named(&self) -> [(&'static str, &str); 11] {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("background", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("text", self.text.as_str()),
            ("accent", self.accent.as_str()),
            ("word_color", self.word_color.as_str()),
            ("meaning_color", self.meaning_color.as_str()),
            ("sentence_color", self.sentence_color.as_str()),
            ("button_color", self.button_color.as_str()),
            ("button_text", self.button_text.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub title: FontStyle,
    pub word: FontStyle,
    pub meaning: FontStyle,
    pub sentence: FontStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeStyle {
    Dark,
    Light,
}

impl ThemeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeStyle::Dark => "dark",
            ThemeStyle::Light => "light",
        }
    }
}

impl ThemeDescriptor {
    /// Load a one-off descriptor from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let data = fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let descriptor: ThemeDescriptor =
            serde_json::from_str(&data).map_err(|e| ThemeError::InvalidTheme {
                reason: format!("{}: {e}", path.display()),
            })?;

        descriptor.validate()?;
        tracing::info!("Loaded custom theme '{}' from {}", descriptor.name, path.display());
        Ok(descriptor)
    }

    pub fn validate(&self) -> Result<(), ThemeError> {
        if self.name.trim().is_empty() {
            return Err(ThemeError::InvalidTheme {
                reason: "name must not be empty".to_string(),
            });
        }

        for (field, value) in self.colors.named() {
            if !is_hex_color(value) {
                return Err(ThemeError::InvalidTheme {
                    reason: format!("color `{field}` is not a hex color: {value:?}"),
                });
            }
        }

        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::registry::lookup;

    #[test]
    fn test_hex_colors() {
        assert!(is_hex_color("#FFF"));
        assert!(is_hex_color("#1a1A2e"));
        assert!(is_hex_color("#1A1A2E80"));
        assert!(!is_hex_color("1A1A2E"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#GGGGGG"));
    }

    #[test]
    fn test_style_tags_serialize_lowercase() {
        let fonts = ThemeFonts {
            title: FontStyle::Bold,
            word: FontStyle::Bold,
            meaning: FontStyle::Normal,
            sentence: FontStyle::Italic,
        };
        let json = serde_json::to_value(&fonts).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "bold", "word": "bold", "meaning": "normal", "sentence": "italic"})
        );
        assert_eq!(serde_json::to_value(ThemeStyle::Dark).unwrap(), "dark");
    }

    #[test]
    fn test_custom_theme_from_file() {
        let mut custom = lookup("simple").unwrap().clone();
        custom.name = "Forest".to_string();
        custom.colors.primary = "#228B22".to_string();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&custom).unwrap()).unwrap();

        assert_eq!(ThemeDescriptor::from_file(file.path()).unwrap(), custom);
    }

    #[test]
    fn test_custom_theme_with_bad_color() {
        let mut custom = lookup("p5r").unwrap().clone();
        custom.colors.accent = "red".to_string();

        let err = custom.validate().unwrap_err();
        assert!(err.to_string().contains("accent"));
    }

    #[test]
    fn test_custom_theme_missing_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "Half", "description": "no colors"}}"#).unwrap();

        let err = ThemeDescriptor::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidTheme { .. }));
    }
}
