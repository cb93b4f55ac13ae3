//! YOLO sidecar annotation files.

use crate::{common::*, layout::sidecar_path};

/// One line of a sidecar file: a label and two box corners in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct YoloLine {
    pub label: String,
    pub xyxy: [f64; 4],
}

impl FromStr for YoloLine {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        ensure!(
            tokens.len() == 5,
            "expected '<label> <x1> <y1> <x2> <y2>', found {} fields",
            tokens.len()
        );

        let label = tokens[0].to_owned();
        let mut xyxy = [0.0; 4];
        for (value, token) in xyxy.iter_mut().zip(&tokens[1..]) {
            *value = token
                .parse::<f64>()
                .with_context(|| format!("invalid coordinate '{}'", token))?;
        }

        Ok(Self { label, xyxy })
    }
}

impl YoloLine {
    /// The box with its corners as written, which may be in any order.
    pub fn to_label(&self) -> Label<XYXY_<f64>, String> {
        Label::new(XYXY_::from(self.xyxy), self.label.clone())
    }
}

/// Parse a sidecar file. Blank lines are ignored.
pub fn read_sidecar(path: impl AsRef<Path>) -> Result<Vec<YoloLine>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("unable to read '{}'", path.display()))?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            line.parse::<YoloLine>().with_context(|| {
                format!("invalid annotation at {}:{}", path.display(), index + 1)
            })
        })
        .collect()
}

/// Concatenate the sidecar annotations of every copy of an image.
///
/// Copies without a sidecar file are logged and skipped.
pub fn collect_annotations(image_paths: &[PathBuf]) -> Result<Vec<YoloLine>> {
    let mut lines = vec![];

    for image_path in image_paths {
        let sidecar = match sidecar_path(image_path) {
            Some(path) if path.is_file() => path,
            Some(path) => {
                info!("file {} does not exist", path.display());
                continue;
            }
            None => continue,
        };
        lines.extend(read_sidecar(&sidecar)?);
    }

    Ok(lines)
}
