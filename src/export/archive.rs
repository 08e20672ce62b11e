//! Zip packaging of rendered documents.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::core::FatturaError;

fn zip_err(e: impl std::fmt::Display) -> FatturaError {
    FatturaError::Archive(e.to_string())
}

/// Package `(filename, contents)` pairs into a deflated zip archive.
///
/// Entry timestamps are fixed, so identical input yields identical bytes.
pub(crate) fn zip_files(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>, FatturaError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in files {
        zip.start_file(name.as_str(), options).map_err(zip_err)?;
        zip.write_all(contents).map_err(zip_err)?;
    }
    Ok(zip.finish().map_err(zip_err)?.into_inner())
}
