//! Default appearance (`/DA`) strings and the 14 standard PDF fonts.
//!
//! A DA string is a small content-stream fragment such as
//! `0 0 0 rg /Helvetica 11.0 Tf`. Only the standard fonts are ever written,
//! so no font embedding is needed.

use std::sync::LazyLock;

use regex::Regex;

/// `/FontName size Tf`; first match wins.
static DA_FONT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/([A-Za-z0-9+_-]+)\s+([\d.]+)\s+Tf").ok());

/// Smallest font size written into a DA string.
pub const MIN_FONT_SIZE: f64 = 1.0;
/// Largest font size written into a DA string.
pub const MAX_FONT_SIZE: f64 = 999.0;

/// The 14 standard Type 1 fonts every conforming reader provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    Symbol,
    ZapfDingbats,
}

impl StandardFont {
    /// The `/BaseFont` name.
    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::TimesItalic => "Times-Italic",
            Self::TimesBoldItalic => "Times-BoldItalic",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
            Self::Symbol => "Symbol",
            Self::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Map an editor font family (CSS-like) to a standard font.
    ///
    /// Unknown or empty families fall back to Helvetica.
    pub fn from_family(family: Option<&str>) -> Self {
        let Some(family) = family else {
            return Self::Helvetica;
        };
        match family.trim().to_lowercase().as_str() {
            "times" | "times new roman" | "times-new-roman" | "serif" => Self::TimesRoman,
            "times bold" | "times-new-roman bold" => Self::TimesBold,
            "courier" | "courier new" | "monospace" => Self::Courier,
            "courier bold" | "courier new bold" => Self::CourierBold,
            "helvetica bold" | "arial bold" => Self::HelveticaBold,
            _ => Self::Helvetica,
        }
    }

    /// Resolve a DA font resource name: a base font name or one of the
    /// customary AcroForm `/DR` aliases (`Helv`, `TiRo`, ...).
    pub fn from_resource_name(name: &str) -> Option<Self> {
        let font = match name {
            "Helvetica" | "Helv" | "Arial" => Self::Helvetica,
            "Helvetica-Bold" | "HeBo" => Self::HelveticaBold,
            "Helvetica-Oblique" | "HeOb" => Self::HelveticaOblique,
            "Helvetica-BoldOblique" | "HeBO" => Self::HelveticaBoldOblique,
            "Times-Roman" | "TiRo" => Self::TimesRoman,
            "Times-Bold" | "TiBo" => Self::TimesBold,
            "Times-Italic" | "TiIt" => Self::TimesItalic,
            "Times-BoldItalic" | "TiBI" => Self::TimesBoldItalic,
            "Courier" | "Cour" => Self::Courier,
            "Courier-Bold" | "CoBo" => Self::CourierBold,
            "Courier-Oblique" | "CoOb" => Self::CourierOblique,
            "Courier-BoldOblique" | "CoBO" => Self::CourierBoldOblique,
            "Symbol" | "Symb" => Self::Symbol,
            "ZapfDingbats" | "ZaDb" => Self::ZapfDingbats,
            _ => return None,
        };
        Some(font)
    }
}

/// A synthesized default appearance: black text in a standard font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultAppearance {
    pub font: StandardFont,
    /// Clamped to `[MIN_FONT_SIZE, MAX_FONT_SIZE]` on construction.
    pub size: f64,
}

impl DefaultAppearance {
    pub fn new(font: StandardFont, size: f64) -> Self {
        Self {
            font,
            size: size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
        }
    }

    /// Build from the patch's `fontSize` / `fontFamily` pair.
    pub fn from_patch(size: f64, family: Option<&str>) -> Self {
        Self::new(StandardFont::from_family(family), size)
    }

    /// Render as `0 0 0 rg /{BaseFont} {size:.1} Tf`.
    pub fn to_da_string(&self) -> String {
        format!("0 0 0 rg /{} {:.1} Tf", self.font.base_font(), self.size)
    }
}

/// Font resource name and size of the first `/Name size Tf` in a DA string.
#[derive(Debug, Clone, PartialEq)]
pub struct DaFont {
    pub resource_name: String,
    pub size: f64,
}

/// Parse the first `/FontName size Tf` occurrence of a DA string.
pub fn parse_da_font(da: &str) -> Option<DaFont> {
    let captures = DA_FONT_PATTERN.as_ref()?.captures(da)?;
    let size = captures.get(2)?.as_str().parse::<f64>().ok()?;
    Some(DaFont {
        resource_name: captures.get(1)?.as_str().to_string(),
        size,
    })
}

/// Font size of a DA string, `None` when no `/FontName size Tf` is found.
pub fn parse_font_size(da: &str) -> Option<f64> {
    parse_da_font(da).map(|font| font.size)
}
