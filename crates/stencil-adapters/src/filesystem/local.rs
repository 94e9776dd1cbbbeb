//! Local filesystem adapter using std::fs.

use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;
use tracing::debug;

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StencilError, StencilResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// Writes go to a temporary file in the target directory which is then
/// renamed over the destination. A replaced file keeps its permissions; a new
/// file gets `0o644` masked by the process umask.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = staging_builder()
            .tempfile_in(dir)
            .map_err(|e| map_io_error(path, e, "stage file"))?;
        if let Ok(existing) = std::fs::metadata(path) {
            staged
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| map_io_error(path, e, "copy permissions"))?;
        }
        staged
            .write_all(content.as_bytes())
            .and_then(|()| staged.flush())
            .map_err(|e| map_io_error(path, e, "write file"))?;
        staged
            .persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;

        debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg_attr(not(unix), allow(unused_mut))]
fn staging_builder() -> Builder<'static, 'static> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(NEW_FILE_MODE));
    }
    builder
}

#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_creates_and_replaces_whole_file() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = tmp.path().join("app/DTO/AuthorDto.php");

        fs.create_dir_all(path.parent().unwrap()).unwrap();
        fs.write_file(&path, "<?php // first").unwrap();
        fs.write_file(&path, "<?php // second").unwrap();

        assert!(fs.exists(&path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<?php // second");
    }

    #[test]
    fn no_staging_files_are_left_behind() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.write_file(&tmp.path().join("a.php"), "a").unwrap();

        let entries: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn write_into_missing_directory_is_a_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let err = fs
            .write_file(&tmp.path().join("missing/dir/file.php"), "x")
            .unwrap_err();

        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = tmp.path().join("AuthorService.php");
        std::fs::write(&path, "<?php // old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o664)).unwrap();

        fs.write_file(&path, "<?php // new").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<?php // new");
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_not_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = tmp.path().join("AuthorDto.php");

        fs.write_file(&path, "<?php").unwrap();

        // A plain create goes through the same umask.
        let reference = tmp.path().join("reference.php");
        std::fs::write(&reference, "").unwrap();
        let expected = std::fs::metadata(&reference).unwrap().permissions().mode() & 0o644;

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected);
    }
}
