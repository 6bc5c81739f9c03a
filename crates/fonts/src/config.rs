//! Font provisioning configuration and built-in constants.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Directory under the root holding the bundled IPA fonts.
pub const FONT_STORE_DIR: &str = "fonts";

/// Temp directory used when none is configured.
pub const DEFAULT_TEMPDIR: &str = "fonts";

/// IPA font archive downloaded when the fontset is empty.
pub const DEFAULT_FONT_URI: &str =
    "https://moji.or.jp/wp-content/ipafont/IPAfont/IPAfont00303.zip";

/// Built-in font names and the file each one is stored as.
pub const BUILTIN_FONTS: &[(&str, &str)] = &[
    ("IPAMincho", "ipam.ttf"),
    ("IPAPMincho", "ipamp.ttf"),
    ("IPAGothic", "ipag.ttf"),
    ("IPAPGothic", "ipagp.ttf"),
];

/// Fallback fonts appended after any configured ones.
pub const DEFAULT_FALLBACK_FONTS: &[&str] = &["IPAMincho"];

/// Alias name → backend standard family.
pub const BACKEND_FONT_ALIASES: &[(&str, &str)] =
    &[("Courier New", "Courier"), ("Times New Roman", "Times-Roman")];

pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// A font expected inside an archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub font_name: String,
    pub file_name: String,
}

impl FontSpec {
    pub fn new(font_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self { font_name: font_name.into(), file_name: file_name.into() }
    }
}

/// A downloadable zip and the fonts it should contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSpec {
    pub font_uri: String,
    pub fonts: Vec<FontSpec>,
}

impl ArchiveSpec {
    pub fn new(font_uri: impl Into<String>, fonts: impl IntoIterator<Item = FontSpec>) -> Self {
        Self { font_uri: font_uri.into(), fonts: fonts.into_iter().collect() }
    }

    /// The IPA archive with the four built-in fonts.
    pub fn ipa_default() -> Self {
        Self::new(
            DEFAULT_FONT_URI,
            [
                FontSpec::new("IPAGothic", "ipag.ttf"),
                FontSpec::new("IPAPGothic", "ipagp.ttf"),
                FontSpec::new("IPAMincho", "ipam.ttf"),
                FontSpec::new("IPAPMincho", "ipamp.ttf"),
            ],
        )
    }
}

/// One or more fallback fonts, each a registered family name or a file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackFonts(Vec<String>);

impl FallbackFonts {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for FallbackFonts {
    fn from(font: &str) -> Self {
        Self(vec![font.to_string()])
    }
}

impl From<String> for FallbackFonts {
    fn from(font: String) -> Self {
        Self(vec![font])
    }
}

impl From<Vec<String>> for FallbackFonts {
    fn from(fonts: Vec<String>) -> Self {
        Self(fonts)
    }
}

impl From<Vec<&str>> for FallbackFonts {
    fn from(fonts: Vec<&str>) -> Self {
        Self(fonts.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FallbackFonts {
    fn from(fonts: [&str; N]) -> Self {
        Self(fonts.into_iter().map(String::from).collect())
    }
}

/// Font provisioning settings.
///
/// Nothing is validated when a value is set; a bad URI surfaces when the
/// fonts are resolved.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    fallback_fonts: Vec<String>,
    tempdir: Option<PathBuf>,
    fontset: Vec<ArchiveSpec>,
    download_timeout: Duration,
    remove_archives: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            fallback_fonts: Vec::new(),
            tempdir: None,
            fontset: Vec::new(),
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            remove_archives: false,
        }
    }
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), ..Self::default() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configured fallback fonts, as given (duplicates included).
    pub fn fallback_fonts(&self) -> &[String] {
        &self.fallback_fonts
    }

    pub fn set_fallback_fonts(&mut self, fonts: impl Into<FallbackFonts>) {
        self.fallback_fonts = fonts.into().into_inner();
    }

    pub fn with_fallback_fonts(mut self, fonts: impl Into<FallbackFonts>) -> Self {
        self.set_fallback_fonts(fonts);
        self
    }

    /// Temp directory relative to the root; `"fonts"` when unset.
    pub fn tempdir(&self) -> &Path {
        self.tempdir.as_deref().unwrap_or(Path::new(DEFAULT_TEMPDIR))
    }

    /// `None` restores the default.
    pub fn set_tempdir<P: Into<PathBuf>>(&mut self, tempdir: Option<P>) {
        self.tempdir = tempdir.map(Into::into);
    }

    pub fn with_tempdir(mut self, tempdir: impl Into<PathBuf>) -> Self {
        self.set_tempdir(Some(tempdir));
        self
    }

    pub fn fontset(&self) -> &[ArchiveSpec] {
        &self.fontset
    }

    /// An empty fontset selects the default IPA archive.
    pub fn set_fontset(&mut self, fontset: Vec<ArchiveSpec>) {
        self.fontset = fontset;
    }

    pub fn with_fontset(mut self, fontset: Vec<ArchiveSpec>) -> Self {
        self.set_fontset(fontset);
        self
    }

    pub fn download_timeout(&self) -> Duration {
        self.download_timeout
    }

    pub fn set_download_timeout(&mut self, timeout: Duration) {
        self.download_timeout = timeout;
    }

    pub fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.set_download_timeout(timeout);
        self
    }

    /// Whether downloaded archives are deleted once extracted.
    pub fn remove_archives(&self) -> bool {
        self.remove_archives
    }

    pub fn set_remove_archives(&mut self, remove: bool) {
        self.remove_archives = remove;
    }

    pub fn with_remove_archives(mut self, remove: bool) -> Self {
        self.set_remove_archives(remove);
        self
    }

    /// Archives to resolve: the fontset, or the default archive when empty.
    pub fn archives(&self) -> Vec<ArchiveSpec> {
        if self.fontset.is_empty() {
            vec![ArchiveSpec::ipa_default()]
        } else {
            self.fontset.clone()
        }
    }

    /// Absolute-or-root-relative download and extraction directory.
    pub fn temp_dir_path(&self) -> PathBuf {
        self.root.join(self.tempdir())
    }

    /// Directory of the bundled built-in fonts.
    pub fn font_store(&self) -> PathBuf {
        self.root.join(FONT_STORE_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.fallback_fonts().is_empty());
        assert_eq!(config.tempdir(), Path::new("fonts"));
        assert!(config.fontset().is_empty());
        assert!(!config.remove_archives());
        assert_eq!(config.download_timeout(), DEFAULT_DOWNLOAD_TIMEOUT);
    }

    #[test]
    fn test_fallback_fonts_accepts_single_name() {
        let mut config = Config::default();
        config.set_fallback_fonts("Times New Roman");
        assert_eq!(config.fallback_fonts(), ["Times New Roman"]);

        config.set_fallback_fonts(["/path/to/font.ttf", "IPAGothic", "IPAGothic"]);
        assert_eq!(config.fallback_fonts(), ["/path/to/font.ttf", "IPAGothic", "IPAGothic"]);
    }

    #[test]
    fn test_tempdir_clears_to_default() {
        let mut config = Config::new("/srv/report").with_tempdir("test-fonts");
        assert_eq!(config.temp_dir_path(), PathBuf::from("/srv/report/test-fonts"));

        config.set_tempdir(None::<PathBuf>);
        assert_eq!(config.temp_dir_path(), PathBuf::from("/srv/report/fonts"));
    }

    #[test]
    fn test_empty_fontset_uses_default_archive() {
        let archives = Config::default().archives();
        assert_eq!(archives.len(), 1);
        assert_eq!(archives[0].font_uri, DEFAULT_FONT_URI);
        assert_eq!(archives[0].fonts.len(), 4);

        let custom = ArchiveSpec::new(
            "https://example.com/fonts.zip",
            [FontSpec::new("Custom", "custom.ttf")],
        );
        let config = Config::default().with_fontset(vec![custom.clone()]);
        assert_eq!(config.archives(), vec![custom]);
    }
}
