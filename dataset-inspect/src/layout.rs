//! The directory-per-category dataset layout.
//!
//! Images of one category and split live in
//! `<root>/<prefix>_<category>/<suffix>/<split>/<category>/`, with YOLO
//! sidecar files in a `labels` folder next to the images.

use crate::{common::*, config::LayoutConfig, filenames::LABELS_DIR};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetLayout {
    /// The directory containing all `<prefix>_<category>` datasets.
    pub root: PathBuf,
    pub prefix: String,
    pub suffix: PathBuf,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>, prefix: &str, suffix: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.to_owned(),
            suffix: suffix.into(),
        }
    }

    /// The image folder of `category` in `split`.
    pub fn category_dir(&self, category: &str, split: &str) -> PathBuf {
        self.root
            .join(format!("{}_{}", self.prefix, category))
            .join(&self.suffix)
            .join(split)
            .join(category)
    }

    /// Every existing `<category_dir>/<file_name>`, visiting categories in
    /// order and the splits of each category in order.
    pub fn find_image(&self, file_name: &str, layout: &LayoutConfig) -> Vec<PathBuf> {
        layout
            .category_names()
            .cartesian_product(layout.splits.iter())
            .map(|(category, split)| self.category_dir(category, split).join(file_name))
            .filter(|path| path.is_file())
            .collect()
    }
}

/// The YOLO sidecar of an image: `labels/<stem>.txt` next to it.
pub fn sidecar_path(image_path: &Path) -> Option<PathBuf> {
    let dir = image_path.parent()?;
    let stem = image_path.file_stem()?;
    let mut file_name = stem.to_owned();
    file_name.push(".txt");
    Some(dir.join(LABELS_DIR).join(file_name))
}
