//! Pipeline configuration.

use crate::common::*;

pub use layout::*;
pub use pipeline::*;

/// The label mapping file name used by the OpenImages tooling.
pub const DEFAULT_LABEL_MAPPING: &str = "class-descriptions-boxable.csv";

/// The folder between `<prefix>_<category>` and the split directory.
pub const DEFAULT_SUFFIX: &str = "raw/1";

/// Where the duplicate manifest goes when no output file is given.
pub const DEFAULT_MANIFEST: &str = "duplicate_open/open_images_dup.csv";

mod layout {
    use super::*;

    /// A dataset category.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        /// The folder name, e.g. `cat`.
        pub name: String,
        /// The display label in the OpenImages label mapping, e.g. `Cat`.
        pub label: String,
    }

    impl Category {
        pub fn new(name: &str, label: &str) -> Self {
            Self {
                name: name.to_owned(),
                label: label.to_owned(),
            }
        }
    }

    /// Categories and splits that make up a multi-folder dataset.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LayoutConfig {
        #[serde(default = "default_categories")]
        pub categories: Vec<Category>,
        #[serde(default = "default_splits")]
        pub splits: Vec<String>,
    }

    impl LayoutConfig {
        pub fn open<P>(path: P) -> Result<Self>
        where
            P: AsRef<Path>,
        {
            let path = path.as_ref();
            let text = fs::read_to_string(path)
                .with_context(|| format!("unable to read '{}'", path.display()))?;
            let config: Self = json5::from_str(&text)
                .with_context(|| format!("'{}' is not a valid layout config", path.display()))?;
            ensure!(
                !config.categories.is_empty(),
                "at least one category is required"
            );
            ensure!(!config.splits.is_empty(), "at least one split is required");
            Ok(config)
        }

        pub fn category_names(&self) -> impl Iterator<Item = &str> {
            self.categories.iter().map(|category| category.name.as_str())
        }
    }

    impl Default for LayoutConfig {
        fn default() -> Self {
            Self {
                categories: default_categories(),
                splits: default_splits(),
            }
        }
    }

    fn default_categories() -> Vec<Category> {
        vec![
            Category::new("cat", "Cat"),
            Category::new("dog", "Dog"),
            Category::new("person", "Person"),
        ]
    }

    fn default_splits() -> Vec<String> {
        vec!["train".into(), "test".into(), "validation".into()]
    }
}

mod pipeline {
    use super::*;
    use crate::layout::DatasetLayout;

    /// Where the list of target image file names comes from.
    ///
    /// Sources are tried in field order; the first one that yields names wins.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct FilenameSource {
        pub filename_list: Option<Vec<String>>,
        /// A CSV file with a `file_name` column.
        pub from_csv: Option<PathBuf>,
        pub input_dir: Option<PathBuf>,
    }

    /// What to do with a drawn image.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct OutputConfig {
        pub output_dir: Option<PathBuf>,
        pub show: bool,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct DrawCocoConfig {
        /// The COCO annotation JSON file.
        pub annotation_file: PathBuf,
        pub images_dir: PathBuf,
        pub filenames: FilenameSource,
        pub output: OutputConfig,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct DrawOpenImagesConfig {
        pub dataset: DatasetLayout,
        pub layout: LayoutConfig,
        /// If set, read boxes from this OpenImages CSV instead of YOLO sidecars.
        pub annotation_file: Option<PathBuf>,
        /// The header-less `ID,label` mapping CSV.
        pub label_mapping: PathBuf,
        pub filenames: FilenameSource,
        pub output: OutputConfig,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct FindDuplicatesConfig {
        pub dataset: DatasetLayout,
        pub layout: LayoutConfig,
        pub label_mapping: PathBuf,
        pub output_file: PathBuf,
    }
}
