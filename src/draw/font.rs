//! Font descriptor for text rendering.

/// Font configuration for the text overlay.
///
/// Describes which font to use, including family name, weight, and style.
/// Sizes are always absolute pixel sizes, matching the way stroke widths
/// are expressed.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Arial", "Sans", "Monospace")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light")
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::with_family("Arial")
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Creates a regular-weight, upright descriptor for `family`.
    pub fn with_family(family: impl Into<String>) -> Self {
        Self::new(family.into(), "normal".to_string(), "normal".to_string())
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Sizepx"
    /// Example: "Arial 8px" or "Monospace Italic Bold 24px"
    pub fn to_pango_string(&self, size_px: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}px", size_px.round().max(1.0) as i32));

        parts.join(" ")
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pango_string_default() {
        let font = FontDescriptor::default();
        assert_eq!(font.to_pango_string(8.0), "Arial 8px");
    }

    #[test]
    fn test_pango_string_italic_bold() {
        let font = FontDescriptor::new(
            "Monospace".to_string(),
            "bold".to_string(),
            "italic".to_string(),
        );
        assert_eq!(font.to_pango_string(24.0), "Monospace Italic Bold 24px");
    }

    #[test]
    fn test_pango_string_never_zero_sized() {
        let font = FontDescriptor::with_family("Sans");
        assert_eq!(font.to_pango_string(0.2), "Sans 1px");
    }
}
