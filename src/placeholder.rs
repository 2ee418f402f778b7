//! Generated stand-in images for load failures and empty selections.

use crate::error::Error;

/// Substitution token recognized in placeholder templates.
pub const BG_COLOR_TOKEN: &str = "{bgColor}";

/// The two caller-overridable placeholder templates.
///
/// Each is a URL template with an optional [`BG_COLOR_TOKEN`] that is
/// replaced by a six-hex-digit background color at render time. The defaults
/// are self-contained SVG data URLs so no asset files are needed.
#[derive(Debug, Clone)]
pub struct PlaceholderTemplates {
    pub error: String,
    pub empty: String,
}

impl Default for PlaceholderTemplates {
    fn default() -> Self {
        Self {
            error: svg_data_url("Image failed to load"),
            empty: svg_data_url("No images available"),
        }
    }
}

impl PlaceholderTemplates {
    /// Render the "error loading image" placeholder URL.
    #[must_use]
    pub fn error_url(&self, bg_color: &str) -> String {
        fill(&self.error, bg_color)
    }

    /// Render the "no images available" placeholder URL.
    #[must_use]
    pub fn empty_url(&self, bg_color: &str) -> String {
        fill(&self.empty, bg_color)
    }
}

fn fill(template: &str, bg_color: &str) -> String {
    template.replace(BG_COLOR_TOKEN, bg_color)
}

fn svg_data_url(message: &str) -> String {
    format!(
        "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' \
         width='1280' height='720'><rect width='100%25' height='100%25' \
         fill='%23{BG_COLOR_TOKEN}'/><text x='50%25' y='50%25' fill='white' \
         font-family='sans-serif' font-size='40' text-anchor='middle' \
         dominant-baseline='middle'>{message}</text></svg>"
    )
}

/// Check that `color` is exactly six hex digits (no leading `#`).
///
/// # Errors
/// Returns [`Error::BadColor`] otherwise.
pub fn validate_bg_color(color: &str) -> Result<(), Error> {
    if color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(Error::BadColor(color.to_string()))
    }
}
