//! PDF backend font table.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Style slot of a font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

/// Where a style slot's glyphs come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontSource {
    /// TrueType file on disk.
    File(PathBuf),
    /// One of the PDF standard 14 fonts, by PostScript name.
    Standard(&'static str),
}

impl FontSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path.as_path()),
            Self::Standard(_) => None,
        }
    }
}

/// Four style slots of a registered family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    pub normal: FontSource,
    pub bold: FontSource,
    pub italic: FontSource,
    pub bold_italic: FontSource,
}

impl FontFamily {
    /// Family whose every style slot is the same file.
    pub fn single_file(path: impl Into<PathBuf>) -> Self {
        let source = FontSource::File(path.into());
        Self {
            normal: source.clone(),
            bold: source.clone(),
            italic: source.clone(),
            bold_italic: source,
        }
    }

    pub fn standard(
        normal: &'static str,
        bold: &'static str,
        italic: &'static str,
        bold_italic: &'static str,
    ) -> Self {
        Self {
            normal: FontSource::Standard(normal),
            bold: FontSource::Standard(bold),
            italic: FontSource::Standard(italic),
            bold_italic: FontSource::Standard(bold_italic),
        }
    }

    pub fn style(&self, style: FontStyle) -> &FontSource {
        match style {
            FontStyle::Normal => &self.normal,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
            FontStyle::BoldItalic => &self.bold_italic,
        }
    }

    pub fn style_mut(&mut self, style: FontStyle) -> &mut FontSource {
        match style {
            FontStyle::Normal => &mut self.normal,
            FontStyle::Bold => &mut self.bold,
            FontStyle::Italic => &mut self.italic,
            FontStyle::BoldItalic => &mut self.bold_italic,
        }
    }
}

/// The font-related surface a PDF renderer exposes.
pub trait FontBackend {
    fn font_family(&self, name: &str) -> Option<&FontFamily>;

    fn has_font_family(&self, name: &str) -> bool {
        self.font_family(name).is_some()
    }

    /// Adds or replaces a family.
    fn insert_font_family(&mut self, name: String, family: FontFamily);

    /// Families searched, in order, for glyphs the current font lacks.
    fn set_fallback_fonts(&mut self, names: Vec<String>);

    fn fallback_fonts(&self) -> &[String];
}

/// In-memory font table, seeded with the standard PDF families.
#[derive(Debug, Clone)]
pub struct FontBook {
    families: IndexMap<String, FontFamily>,
    fallback_fonts: Vec<String>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    pub fn new() -> Self {
        let families = [
            (
                "Courier",
                FontFamily::standard(
                    "Courier",
                    "Courier-Bold",
                    "Courier-Oblique",
                    "Courier-BoldOblique",
                ),
            ),
            (
                "Helvetica",
                FontFamily::standard(
                    "Helvetica",
                    "Helvetica-Bold",
                    "Helvetica-Oblique",
                    "Helvetica-BoldOblique",
                ),
            ),
            (
                "Times-Roman",
                FontFamily::standard(
                    "Times-Roman",
                    "Times-Bold",
                    "Times-Italic",
                    "Times-BoldItalic",
                ),
            ),
            ("Symbol", FontFamily::standard("Symbol", "Symbol", "Symbol", "Symbol")),
            (
                "ZapfDingbats",
                FontFamily::standard("ZapfDingbats", "ZapfDingbats", "ZapfDingbats", "ZapfDingbats"),
            ),
        ]
        .into_iter()
        .map(|(name, family)| (name.to_string(), family))
        .collect();

        Self { families, fallback_fonts: Vec::new() }
    }

    /// A table with no families at all.
    pub fn empty() -> Self {
        Self { families: IndexMap::new(), fallback_fonts: Vec::new() }
    }

    pub fn families(&self) -> impl Iterator<Item = (&str, &FontFamily)> {
        self.families.iter().map(|(name, family)| (name.as_str(), family))
    }

    pub fn font_family_mut(&mut self, name: &str) -> Option<&mut FontFamily> {
        self.families.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl FontBackend for FontBook {
    fn font_family(&self, name: &str) -> Option<&FontFamily> {
        self.families.get(name)
    }

    fn insert_font_family(&mut self, name: String, family: FontFamily) {
        self.families.insert(name, family);
    }

    fn set_fallback_fonts(&mut self, names: Vec<String>) {
        self.fallback_fonts = names;
    }

    fn fallback_fonts(&self) -> &[String] {
        &self.fallback_fonts
    }
}
