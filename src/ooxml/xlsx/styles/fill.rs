//! Fill patterns and colors.

/// Color reference as stored in styles.xml.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    /// ARGB hex value, e.g. `FFFF0000`
    Rgb(String),
    /// Index into the workbook theme palette
    Theme(u32),
    /// Index into the legacy indexed palette
    Indexed(u32),
    /// System automatic color
    Auto,
}

impl Color {
    /// The six RGB hex digits of an `rgb` color, uppercased.
    ///
    /// Returns `None` for non-RGB colors or malformed values.
    pub fn rgb_digits(&self) -> Option<String> {
        match self {
            Color::Rgb(argb) if argb.len() >= 6 && argb.is_ascii() => {
                Some(argb[argb.len() - 6..].to_ascii_uppercase())
            },
            _ => None,
        }
    }
}

/// Fill information.
///
/// Defines the background fill for cells, either as a pattern with
/// foreground/background colors or as a gradient.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Fill {
    /// No fill
    #[default]
    None,
    /// Pattern fill with colors
    Pattern {
        /// Pattern type (e.g., "solid", "gray125", "lightGray")
        pattern_type: String,
        /// Foreground color
        fg_color: Option<Color>,
        /// Background color
        bg_color: Option<Color>,
    },
    /// Gradient fill, stops are not retained
    Gradient {
        /// Gradient type (linear or path)
        gradient_type: Option<String>,
    },
}

impl Fill {
    /// Create a new solid fill with the given color.
    #[inline]
    pub fn solid(color: Color) -> Self {
        Fill::Pattern {
            pattern_type: "solid".to_string(),
            fg_color: Some(color),
            bg_color: None,
        }
    }

    /// Check if this is a solid fill.
    pub fn is_solid(&self) -> bool {
        matches!(self, Fill::Pattern { pattern_type, .. } if pattern_type == "solid")
    }

    /// Foreground color of a pattern fill.
    pub fn fg_color(&self) -> Option<&Color> {
        match self {
            Fill::Pattern { fg_color, .. } => fg_color.as_ref(),
            _ => None,
        }
    }
}
