//! Bulk object-storage backup.
//!
//! Lists every object in a storage namespace, mirrors the objects into a
//! local directory tree, then packs the tree into one deflate-compressed zip
//! archive. A single failed listing or download aborts the whole run; there
//! is no per-object recovery or resume.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::core::ExportError;

/// Remote blob namespace the backup reads from.
///
/// Implementations wrap whatever storage SDK the deployment uses; tests use
/// an in-memory map.
pub trait ObjectStore {
    /// Names of every object in the namespace. Names may contain `/`
    /// separators, which become directories in the mirrored tree.
    fn list(&self) -> Result<Vec<String>, ExportError>;

    /// Download one object in full.
    fn download(&self, name: &str) -> Result<Vec<u8>, ExportError>;
}

/// Summary of a completed backup run.
#[derive(Debug, Clone)]
pub struct BackupReport {
    /// Objects downloaded and archived.
    pub object_count: usize,
    /// The written archive.
    pub archive_path: PathBuf,
}

/// Mirror `store` into `staging_dir`, then pack the tree into
/// `archive_path`.
pub fn backup_storage(
    store: &dyn ObjectStore,
    staging_dir: &Path,
    archive_path: &Path,
) -> Result<BackupReport, ExportError> {
    let objects = store.list()?;

    fs::create_dir_all(staging_dir)
        .map_err(|e| ExportError::Storage(format!("{}: {e}", staging_dir.display())))?;

    for name in &objects {
        log::info!("downloading {name}");
        let data = store.download(name)?;
        let path = staging_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ExportError::Storage(format!("{}: {e}", parent.display())))?;
        }
        fs::write(&path, data)
            .map_err(|e| ExportError::Storage(format!("{}: {e}", path.display())))?;
    }

    let file = File::create(archive_path)
        .map_err(|e| ExportError::OutputWrite(format!("{}: {e}", archive_path.display())))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    archive_tree(&mut zip, staging_dir, staging_dir, options)?;
    zip.finish()
        .map_err(|e| ExportError::OutputWrite(format!("{}: {e}", archive_path.display())))?;

    log::info!(
        "{} objects archived to {}",
        objects.len(),
        archive_path.display()
    );
    Ok(BackupReport {
        object_count: objects.len(),
        archive_path: archive_path.to_path_buf(),
    })
}

/// Recursively add every file under `dir` to the archive, named relative to
/// `root` with `/` separators.
fn archive_tree(
    zip: &mut ZipWriter<File>,
    root: &Path,
    dir: &Path,
    options: SimpleFileOptions,
) -> Result<(), ExportError> {
    let entries =
        fs::read_dir(dir).map_err(|e| ExportError::Storage(format!("{}: {e}", dir.display())))?;
    for entry in entries {
        let entry = entry.map_err(|e| ExportError::Storage(format!("{}: {e}", dir.display())))?;
        let path = entry.path();
        if path.is_dir() {
            archive_tree(zip, root, &path, options)?;
            continue;
        }

        let name = path
            .strip_prefix(root)
            .map_err(|e| ExportError::Storage(format!("{}: {e}", path.display())))?
            .to_string_lossy()
            .replace('\\', "/");
        zip.start_file(name, options)
            .map_err(|e| ExportError::OutputWrite(format!("{}: {e}", path.display())))?;
        let data =
            fs::read(&path).map_err(|e| ExportError::Storage(format!("{}: {e}", path.display())))?;
        zip.write_all(&data)
            .map_err(|e| ExportError::OutputWrite(format!("{}: {e}", path.display())))?;
    }
    Ok(())
}
