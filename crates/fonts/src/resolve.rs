//! Logical font name → file path resolution.
//!
//! Resolution downloads and extracts every configured archive, so it is
//! computed once per [`FontResolver`] and shared by every later caller.

use std::{
    collections::HashMap,
    fs::{remove_dir_all, remove_file},
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use indexmap::IndexMap;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::{
    config::{ArchiveSpec, BUILTIN_FONTS, Config, FontSpec},
    error::{FontError, Result},
    extract::extract,
    fetch::{Fetch, HttpFetcher, parse_uri},
    io::{basename, ensure_dir},
};

/// Font name → font file, in resolution order.
pub type FontMap = IndexMap<String, PathBuf>;

/// A font an archive was expected to contain but did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFont {
    pub font_uri: String,
    pub font: FontSpec,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedFonts {
    fonts: FontMap,
    missing: Vec<MissingFont>,
}

impl ResolvedFonts {
    pub fn fonts(&self) -> &FontMap {
        &self.fonts
    }

    pub fn get(&self, font_name: &str) -> Option<&PathBuf> {
        self.fonts.get(font_name)
    }

    /// Expected fonts dropped because their archive lacked the file.
    pub fn missing(&self) -> &[MissingFont] {
        &self.missing
    }
}

struct ArchiveFonts {
    fonts: FontMap,
    missing: Vec<MissingFont>,
}

pub struct FontResolver {
    config: Config,
    fetcher: Arc<dyn Fetch>,
    cache: Mutex<Option<Arc<ResolvedFonts>>>,
}

impl FontResolver {
    /// Resolver downloading over HTTP with the configured timeout.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.download_timeout())?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetch>) -> Self {
        Self { config, fetcher, cache: Mutex::new(None) }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_resolved(&self) -> bool {
        self.lock().is_some()
    }

    /// Returns the font mapping, computing it on first use.
    ///
    /// Concurrent callers block until the first one finishes. A failed
    /// resolution is not cached.
    pub fn resolve(&self) -> Result<Arc<ResolvedFonts>> {
        let mut cache = self.lock();
        if let Some(resolved) = cache.as_ref() {
            return Ok(Arc::clone(resolved));
        }

        let resolved = Arc::new(self.resolve_uncached()?);
        *cache = Some(Arc::clone(&resolved));
        Ok(resolved)
    }

    /// Removes the download directory and forgets the cached mapping.
    pub fn clear_cache(&self) -> Result<()> {
        let mut cache = self.lock();
        let dir = self.config.temp_dir_path();
        if dir.exists() {
            remove_dir_all(&dir).map_err(|e| FontError::io(&dir, e))?;
            info!("Removed {}", dir.display());
        } else {
            debug!("Skipped {} (not found)", dir.display());
        }
        *cache = None;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<ResolvedFonts>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve_uncached(&self) -> Result<ResolvedFonts> {
        let archives = self.config.archives();
        let per_archive: Vec<ArchiveFonts> = archives
            .par_iter()
            .map(|archive| self.resolve_archive(archive))
            .collect::<Result<_>>()?;

        let mut resolved = ResolvedFonts { fonts: builtin_fonts(&self.config), missing: Vec::new() };
        for archive in per_archive {
            resolved.fonts.extend(archive.fonts);
            resolved.missing.extend(archive.missing);
        }
        Ok(resolved)
    }

    fn resolve_archive(&self, archive: &ArchiveSpec) -> Result<ArchiveFonts> {
        let uri = parse_uri(&archive.font_uri)?;
        let file_name = basename(uri.path())
            .ok_or_else(|| FontError::MissingFileName(archive.font_uri.clone()))?
            .to_string();

        let tempdir = self.config.temp_dir_path();
        ensure_dir(&tempdir)?;

        let dest = tempdir.join(&file_name);
        if dest.exists() {
            debug!("Using cached archive {}", dest.display());
        } else {
            self.fetcher.fetch(&uri, &dest)?;
        }

        let extracted = match extract(&dest, &tempdir) {
            Err(err @ FontError::Archive { .. }) => {
                warn!("Removing unreadable archive {}: {err}", dest.display());
                remove_file(&dest).map_err(|e| FontError::io(&dest, e))?;
                return Err(err);
            }
            result => result?,
        };
        if self.config.remove_archives() {
            remove_file(&dest).map_err(|e| FontError::io(&dest, e))?;
        }

        Ok(match_fonts(archive, extracted))
    }
}

/// Built-in fonts at their bundled location.
pub fn builtin_fonts(config: &Config) -> FontMap {
    let store = config.font_store();
    BUILTIN_FONTS
        .iter()
        .map(|(name, file)| (name.to_string(), store.join(file)))
        .collect()
}

fn match_fonts(archive: &ArchiveSpec, extracted: Vec<PathBuf>) -> ArchiveFonts {
    let by_file: HashMap<&str, &FontSpec> =
        archive.fonts.iter().map(|spec| (spec.file_name.as_str(), spec)).collect();

    let mut fonts = FontMap::new();
    for path in extracted {
        let spec = path.file_name().and_then(|s| s.to_str()).and_then(|s| by_file.get(s));
        if let Some(spec) = spec {
            fonts.insert(spec.font_name.clone(), path);
        }
    }

    let missing: Vec<MissingFont> = archive
        .fonts
        .iter()
        .filter(|spec| !fonts.contains_key(&spec.font_name))
        .map(|spec| MissingFont { font_uri: archive.font_uri.clone(), font: spec.clone() })
        .collect();

    for entry in &missing {
        warn!(
            "{} ({}) not found in {}, skipping",
            entry.font.font_name, entry.font.file_name, entry.font_uri
        );
    }

    ArchiveFonts { fonts, missing }
}
