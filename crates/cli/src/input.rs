use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use exn::ResultExt;
use rustic_hal::HalResource;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

const STDIN: &str = "-";

/// Read a HAL document from `path`, or from stdin when `path` is `None` or `-`.
#[instrument]
pub fn read_resource(path: Option<&Path>) -> Result<HalResource> {
    match path.filter(|path| path.as_os_str() != STDIN) {
        Some(path) => {
            let file = File::open(path).map_err(|err| map_io_error(&err, path))?;
            parse_resource(BufReader::new(file))
        },
        None => parse_resource(std::io::stdin().lock()),
    }
}

fn map_io_error(err: &io::Error, path: &Path) -> ErrorKind {
    match err.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
        _ => ErrorKind::Input(path.to_path_buf()),
    }
}

pub fn parse_resource(reader: impl Read) -> Result<HalResource> {
    serde_json::from_reader(reader).or_raise(|| ErrorKind::Parse)
}

/// Display name of an input for log messages.
pub fn describe(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(STDIN))
}
