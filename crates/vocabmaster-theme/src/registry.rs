use std::sync::LazyLock;

use crate::descriptor::{FontStyle, ThemeColors, ThemeDescriptor, ThemeFonts, ThemeStyle};
use crate::ThemeError;

/// Built-in themes in display order
static BUILT_IN_THEMES: LazyLock<Vec<(&'static str, ThemeDescriptor)>> = LazyLock::new(|| {
    vec![
        (
            "p5r",
            built_in(
                "Persona 5 Royal",
                "Bold red and black theme inspired by P5R",
                [
                    "#FF0000", "#000000", "#1A1A2E", "#16213E", "#FFFFFF", "#E94560", "#FF0000",
                    "#FFFFFF", "#E94560", "#FF0000", "#FFFFFF",
                ],
                ThemeStyle::Dark,
            ),
        ),
        (
            "simple",
            built_in(
                "Simple & Clean",
                "Minimal clean design for focused study",
                [
                    "#2196F3", "#757575", "#FFFFFF", "#F5F5F5", "#212121", "#FF9800", "#1565C0",
                    "#212121", "#455A64", "#2196F3", "#FFFFFF",
                ],
                ThemeStyle::Light,
            ),
        ),
        (
            "planet_universe",
            built_in(
                "Planet Universe",
                "Cosmic space theme with deep purple and starry vibes",
                [
                    "#BB86FC", "#03DAC6", "#0B0B2B", "#1B1B4B", "#E0E0FF", "#CF6679", "#BB86FC",
                    "#E0E0FF", "#03DAC6", "#6200EA", "#FFFFFF",
                ],
                ThemeStyle::Dark,
            ),
        ),
    ]
});

/// Colors in `ThemeColors` field order
fn built_in(
    name: &str,
    description: &str,
    colors: [&str; 11],
    style: ThemeStyle,
) -> ThemeDescriptor {
    let [
        primary,
        secondary,
        background,
        surface,
        text,
        accent,
        word_color,
        meaning_color,
        sentence_color,
        button_color,
        button_text,
    ] = colors.map(str::to_string);

    ThemeDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        colors: ThemeColors {
            primary,
            secondary,
            background,
            surface,
            text,
            accent,
            word_color,
            meaning_color,
            sentence_color,
            button_color,
            button_text,
        },
        fonts: ThemeFonts {
            title: FontStyle::Bold,
            word: FontStyle::Bold,
            meaning: FontStyle::Normal,
            sentence: FontStyle::Italic,
        },
        style,
    }
}

pub fn lookup(id: &str) -> Option<&'static ThemeDescriptor> {
    BUILT_IN_THEMES
        .iter()
        .find(|(theme_id, _)| *theme_id == id)
        .map(|(_, descriptor)| descriptor)
}

pub fn theme_ids() -> Vec<&'static str> {
    BUILT_IN_THEMES.iter().map(|(id, _)| *id).collect()
}

/// `(id, "<name> - <description>")` for every built-in theme
pub fn list_themes() -> Vec<(&'static str, String)> {
    BUILT_IN_THEMES
        .iter()
        .map(|(id, theme)| (*id, format!("{} - {}", theme.name, theme.description)))
        .collect()
}

/// One-line summary of the main colors
pub fn preview(theme: &ThemeDescriptor) -> String {
    format!(
        "Style: {}  |  Primary: {}  |  Background: {}  |  Accent: {}",
        theme.style.as_str(),
        theme.colors.primary,
        theme.colors.background,
        theme.colors.accent
    )
}

/// A supplied custom descriptor wins; otherwise `id` must name a built-in theme
pub fn resolve<'a>(
    id: &str,
    custom: Option<&'a ThemeDescriptor>,
) -> Result<&'a ThemeDescriptor, ThemeError> {
    if let Some(custom) = custom {
        return Ok(custom);
    }

    lookup(id).ok_or_else(|| ThemeError::UnknownTheme {
        requested: id.to_string(),
        available: theme_ids().into_iter().map(str::to_string).collect(),
    })
}
