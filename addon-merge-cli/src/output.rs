//! Output writers for `addon-merge`.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::CliError;

/// Writes `template` to `path`, creating parent directories and truncating
/// any existing file.
///
/// # Errors
///
/// Returns [`CliError::Io`] when a directory or the file cannot be written.
pub fn write_template(path: &Utf8Path, template: &str) -> Result<(), CliError> {
    let file_name = path.file_name().ok_or_else(|| CliError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path does not name a file",
        ),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = ensure_dir(parent)?;
    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|io_err| CliError::Io {
            path: path.to_path_buf(),
            source: io_err,
        })?;
    file.write_all(template.as_bytes())
        .map_err(|io_err| CliError::Io {
            path: path.to_path_buf(),
            source: io_err,
        })?;
    tracing::info!(output = %path, "wrote merged template");
    Ok(())
}

/// Writes `template` to `out`.
///
/// # Errors
///
/// Returns [`CliError::Stdout`] when the writer fails.
pub fn write_stream(out: &mut impl Write, template: &str) -> Result<(), CliError> {
    out.write_all(template.as_bytes())
        .and_then(|()| out.flush())
        .map_err(CliError::Stdout)
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, CliError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|io_err| {
                CliError::Io {
                    path: path.to_path_buf(),
                    source: io_err,
                }
            })?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(|io_err| CliError::Io {
                path: path.to_path_buf(),
                source: io_err,
            })
        }
        Err(open_err) => Err(CliError::Io {
            path: path.to_path_buf(),
            source: open_err,
        }),
    }
}
