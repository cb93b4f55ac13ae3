//! Target file name resolution.

use crate::{common::*, config::FilenameSource};

/// The sidecar annotation folder that sits next to the images.
pub const LABELS_DIR: &str = "labels";

/// List the entry names of `dir`, sorted, without the reserved `labels` entry.
///
/// Names that are not valid UTF-8 are logged and left out.
pub fn list_dir(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let names: Vec<Option<String>> = fs::read_dir(dir)
        .with_context(|| format!("unable to list directory '{}'", dir.display()))?
        .map(|entry| -> Result<_> {
            let name = entry?.file_name();
            match name.into_string() {
                Ok(name) => Ok(Some(name)),
                Err(name) => {
                    warn!("skip non UTF-8 file name {:?} in {}", name, dir.display());
                    Ok(None)
                }
            }
        })
        .collect::<Result<_>>()?;
    Ok(names
        .into_iter()
        .flatten()
        .filter(|name| name != LABELS_DIR)
        .sorted()
        .collect())
}

/// Read the `file_name` (or `filename`) column of a CSV file.
pub fn read_filename_csv(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("unable to open '{}'", path.display()))?;

    let column = reader
        .headers()?
        .iter()
        .position(|header| matches!(header.trim(), "file_name" | "filename"))
        .ok_or_else(|| format_err!("'{}' has no file_name column", path.display()))?;

    let names: Vec<String> = reader
        .records()
        .map(|record| -> Result<_> {
            let record = record?;
            let name = record
                .get(column)
                .ok_or_else(|| format_err!("short row in '{}'", path.display()))?;
            Ok(name.to_owned())
        })
        .collect::<Result<_>>()?;
    Ok(names)
}

impl FilenameSource {
    /// Resolve the target file names.
    ///
    /// Precedence is explicit list, then CSV, then directory. A source that
    /// yields no names gives way to the next one. It is an error if no source
    /// is set or every set source is empty.
    pub fn resolve(&self) -> Result<Vec<String>> {
        let Self {
            filename_list,
            from_csv,
            input_dir,
        } = self;

        ensure!(
            filename_list.is_some() || from_csv.is_some() || input_dir.is_some(),
            "no input data: one of filename_list, from_csv or input_dir is required"
        );

        if let Some(list) = filename_list {
            if !list.is_empty() {
                return Ok(list.clone());
            }
        }
        if let Some(path) = from_csv {
            let names = read_filename_csv(path)?;
            if !names.is_empty() {
                return Ok(names);
            }
        }
        if let Some(dir) = input_dir {
            let names = list_dir(dir)?;
            if !names.is_empty() {
                return Ok(names);
            }
        }

        bail!("no image in the given input")
    }
}
