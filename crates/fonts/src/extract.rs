//! Flat, incremental zip extraction.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use log::{debug, info};
use zip::ZipArchive;

use crate::{
    error::{FontError, Result},
    io::{CacheFile, WriteOutcome, basename},
};

/// Extracts every file entry of `archive` into `dest_dir`, dropping the
/// archive's directory structure.
///
/// Entries whose target already exists are left alone. Returns the target
/// path of every file entry, extracted now or earlier, in archive order.
pub fn extract(archive: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>> {
    let zip_err = |source| FontError::Archive { path: archive.to_path_buf(), source };

    let file = File::open(archive).map_err(|e| FontError::io(archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(zip_err)?;

    let mut candidates = Vec::with_capacity(zip.len());
    let mut extracted = 0;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(zip_err)?;
        if entry.is_dir() {
            continue;
        }
        let Some(file_name) = basename(entry.name()) else {
            continue;
        };

        let target = CacheFile::new(dest_dir.join(file_name));
        if target.exists() {
            debug!("Skipping {} (already extracted)", target.path().display());
        } else if let WriteOutcome::Written(_) = target.write_with(|out| {
            io::copy(&mut entry, out).map_err(|e| FontError::io(target.path(), e))
        })? {
            extracted += 1;
        }
        candidates.push(target.path().to_path_buf());
    }

    info!("Extracted {extracted} of {} files from {}", candidates.len(), archive.display());
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io::{Cursor, Write},
    };

    use tempfile::tempdir;
    use zip::{ZipWriter, write::SimpleFileOptions};

    use super::*;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, SimpleFileOptions::default()).expect("dir");
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).expect("start");
                writer.write_all(data).expect("write");
            }
        }
        let bytes = writer.finish().expect("finish").into_inner();
        fs::write(path, bytes).expect("write zip");
    }

    #[test]
    fn test_extract_is_flat() {
        let dir = tempdir().expect("tempdir");
        let archive = dir.path().join("fonts.zip");
        write_zip(
            &archive,
            &[("IPAfont/", b""), ("IPAfont/ipag.ttf", b"gothic"), ("readme.txt", b"hi")],
        );

        let paths = extract(&archive, dir.path()).expect("extract");
        assert_eq!(paths, vec![dir.path().join("ipag.ttf"), dir.path().join("readme.txt")]);
        assert_eq!(fs::read(dir.path().join("ipag.ttf")).expect("read"), b"gothic");
        assert!(!dir.path().join("IPAfont").exists());
    }

    #[test]
    fn test_extract_keeps_existing_files() {
        let dir = tempdir().expect("tempdir");
        let archive = dir.path().join("fonts.zip");
        write_zip(&archive, &[("ipam.ttf", b"from archive")]);
        fs::write(dir.path().join("ipam.ttf"), b"cached").expect("seed");

        let paths = extract(&archive, dir.path()).expect("extract");
        assert_eq!(paths, vec![dir.path().join("ipam.ttf")]);
        assert_eq!(fs::read(dir.path().join("ipam.ttf")).expect("read"), b"cached");
    }

    #[test]
    fn test_extract_rejects_non_zip() {
        let dir = tempdir().expect("tempdir");
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"definitely not a zip").expect("write");

        let err = extract(&archive, dir.path()).unwrap_err();
        assert!(matches!(err, FontError::Archive { .. }));
    }
}
