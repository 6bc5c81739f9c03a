//! Installs resolved fonts into a PDF backend.

use std::path::Path;

use indexmap::IndexSet;
use log::debug;

use crate::{
    backend::{FontBackend, FontFamily, FontStyle},
    config::{BACKEND_FONT_ALIASES, DEFAULT_FALLBACK_FONTS},
    error::{FontError, Result},
    resolve::FontResolver,
};

/// Prefix of the names given to fallback fonts installed from a path.
pub const CUSTOM_FALLBACK_PREFIX: &str = "Custom-fallback-font";

const DEFAULT_FAMILY: &str = "Helvetica";

/// Font setup for one document's backend.
pub struct FontRegistrar<'a, B: FontBackend + ?Sized> {
    backend: &'a mut B,
}

impl<'a, B: FontBackend + ?Sized> FontRegistrar<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &*self.backend
    }

    /// Installs every resolved font, the standard-family aliases and the
    /// fallback chain.
    ///
    /// Resolution is shared through `resolver`; only the first call for a
    /// resolver touches the network.
    pub fn setup_fonts(&mut self, resolver: &FontResolver) -> Result<()> {
        let resolved = resolver.resolve()?;
        for (name, path) in resolved.fonts() {
            self.install_font(name, path)?;
        }

        for (alias, name) in BACKEND_FONT_ALIASES {
            self.alias_font(alias, name)?;
        }

        let fallbacks = self.install_fallback_fonts(resolver.config().fallback_fonts())?;
        let fallbacks = fallbacks
            .into_iter()
            .chain(DEFAULT_FALLBACK_FONTS.iter().map(|s| s.to_string()))
            .collect();
        self.backend.set_fallback_fonts(fallbacks);
        Ok(())
    }

    /// Registers `file` under `name` in all four style slots.
    ///
    /// Returns the installed name. Nothing is registered when `file` does
    /// not exist.
    pub fn install_font(&mut self, name: &str, file: impl AsRef<Path>) -> Result<String> {
        let file = file.as_ref();
        if !file.exists() {
            return Err(FontError::FontFileNotFound(file.to_path_buf()));
        }

        debug!("Installing font {name} from {}", file.display());
        self.backend.insert_font_family(name.to_string(), FontFamily::single_file(file));
        Ok(name.to_string())
    }

    /// Registers the family `name` again under `alias`.
    pub fn alias_font(&mut self, alias: &str, name: &str) -> Result<()> {
        let family = self
            .backend
            .font_family(name)
            .cloned()
            .ok_or_else(|| FontError::FamilyNotRegistered(name.to_string()))?;
        self.backend.insert_font_family(alias.to_string(), family);
        Ok(())
    }

    /// Deduplicates `fonts` and installs every entry that is not a known
    /// family as `Custom-fallback-font<i>`, `i` being its position in the
    /// deduplicated list.
    pub fn install_fallback_fonts(&mut self, fonts: &[String]) -> Result<Vec<String>> {
        let unique: IndexSet<&str> = fonts.iter().map(String::as_str).collect();
        unique
            .into_iter()
            .enumerate()
            .map(|(i, font)| {
                if self.backend.has_font_family(font) {
                    Ok(font.to_string())
                } else {
                    self.install_font(&format!("{CUSTOM_FALLBACK_PREFIX}{i}"), font)
                }
            })
            .collect()
    }

    pub fn default_family(&self) -> &'static str {
        DEFAULT_FAMILY
    }

    /// `family` if registered, otherwise the default family.
    pub fn default_family_if_missing<'f>(&self, family: &'f str) -> &'f str {
        if self.backend.has_font_family(family) { family } else { DEFAULT_FAMILY }
    }

    /// Whether `style` has glyphs of its own rather than reusing `normal`.
    pub fn font_has_style(&self, font_name: &str, style: FontStyle) -> bool {
        self.backend
            .font_family(font_name)
            .is_some_and(|family| family.style(style) != &family.normal)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::{FontBook, FontSource};

    #[test]
    fn test_install_missing_file_leaves_table_untouched() {
        let mut book = FontBook::new();
        let before = book.len();

        let err = FontRegistrar::new(&mut book)
            .install_font("Ghost", "/does/not/exist.ttf")
            .unwrap_err();

        assert!(matches!(err, FontError::FontFileNotFound(ref p) if p == Path::new("/does/not/exist.ttf")));
        assert!(!book.has_font_family("Ghost"));
        assert_eq!(book.len(), before);
    }

    #[test]
    fn test_alias_unknown_family_fails() {
        let mut book = FontBook::empty();
        let err = FontRegistrar::new(&mut book).alias_font("Courier New", "Courier").unwrap_err();
        assert!(matches!(err, FontError::FamilyNotRegistered(ref n) if n == "Courier"));
    }

    #[test]
    fn test_font_has_style() {
        let dir = tempdir().expect("tempdir");
        let regular = dir.path().join("regular.ttf");
        let bold = dir.path().join("bold.ttf");
        fs::write(&regular, b"r").expect("write");
        fs::write(&bold, b"b").expect("write");

        let mut book = FontBook::new();
        let mut registrar = FontRegistrar::new(&mut book);
        registrar.install_font("Custom", &regular).expect("install");
        assert!(!registrar.font_has_style("Custom", FontStyle::Bold));
        assert!(!registrar.font_has_style("Unknown", FontStyle::Bold));
        assert!(registrar.font_has_style("Courier", FontStyle::Bold));

        if let Some(family) = book.font_family_mut("Custom") {
            *family.style_mut(FontStyle::Bold) = FontSource::File(bold.clone());
        }
        let registrar = FontRegistrar::new(&mut book);
        assert!(registrar.font_has_style("Custom", FontStyle::Bold));
        assert!(!registrar.font_has_style("Custom", FontStyle::Italic));
        assert_eq!(
            registrar.backend().font_family("Custom"),
            Some(&FontFamily {
                normal: FontSource::File(regular.clone()),
                bold: FontSource::File(bold),
                italic: FontSource::File(regular.clone()),
                bold_italic: FontSource::File(regular),
            })
        );
    }

    #[test]
    fn test_default_family_if_missing() {
        let mut book = FontBook::new();
        let registrar = FontRegistrar::new(&mut book);
        assert_eq!(registrar.default_family(), "Helvetica");
        assert_eq!(registrar.default_family_if_missing("Courier"), "Courier");
        assert_eq!(registrar.default_family_if_missing("Comic Sans"), "Helvetica");
    }

    #[test]
    fn test_fallback_fonts_dedup_and_index_by_position() {
        let dir = tempdir().expect("tempdir");
        let custom = dir.path().join("custom.ttf");
        fs::write(&custom, b"c").expect("write");
        let custom = custom.to_string_lossy().into_owned();

        let mut book = FontBook::new();
        let installed = FontRegistrar::new(&mut book)
            .install_fallback_fonts(&[
                "Courier".to_string(),
                "Courier".to_string(),
                custom.clone(),
                custom.clone(),
            ])
            .expect("install");

        assert_eq!(installed, ["Courier", "Custom-fallback-font1"]);
        assert_eq!(
            book.font_family("Custom-fallback-font1").and_then(|f| f.normal.path()),
            Some(Path::new(&custom))
        );
    }
}
