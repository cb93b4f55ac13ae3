//! The duplicate manifest CSV.

use crate::{common::*, duplicate::DuplicateRecord};

#[derive(Debug, Serialize)]
struct ManifestRow<'a> {
    filename: &'a str,
    path: String,
    label: String,
    #[serde(rename = "ID_label")]
    id_label: String,
}

/// Format a list cell the way Python prints a list of strings, e.g. `['a', 'b']`.
pub fn format_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let items = items
        .into_iter()
        .map(|item| python_repr(&item.to_string()))
        .join(", ");
    format!("[{}]", items)
}

/// Quote a string like Python's `repr`: single quotes unless the text holds a
/// single quote and no double quote.
fn python_repr(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut repr = String::with_capacity(text.len() + 2);
    repr.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => repr.push_str("\\\\"),
            '\n' => repr.push_str("\\n"),
            '\r' => repr.push_str("\\r"),
            '\t' => repr.push_str("\\t"),
            ch if ch == quote => {
                repr.push('\\');
                repr.push(ch);
            }
            ch if ch.is_control() && (ch as u32) < 0x100 => {
                repr.push_str(&format!("\\x{:02x}", ch as u32));
            }
            ch => repr.push(ch),
        }
    }
    repr.push(quote);
    repr
}

/// Write `records` to `path` with a `filename,path,label,ID_label` header.
///
/// Missing parent directories are created.
pub fn write_manifest(path: impl AsRef<Path>, records: &[DuplicateRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("unable to create directory '{}'", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create '{}'", path.display()))?;
    for record in records {
        writer.serialize(ManifestRow {
            filename: &record.filename,
            path: format_list(record.path.iter().map(|path| path.display())),
            label: format_list(&record.label),
            id_label: format_list(&record.id_label),
        })?;
    }
    writer.flush()?;

    info!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}
