use anyhow::Result;
use clap::{Args, Parser};
use dataset_inspect::{
    config::{
        DrawCocoConfig, DrawOpenImagesConfig, FilenameSource, FindDuplicatesConfig, LayoutConfig,
        OutputConfig, DEFAULT_LABEL_MAPPING, DEFAULT_MANIFEST, DEFAULT_SUFFIX,
    },
    duplicate::DuplicateRecord,
    layout::DatasetLayout,
    logging::{self, LoggerConfig},
};
use itertools::Itertools;
use prettytable::{cell, row, Table};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
/// Inspect object detection datasets.
enum Opts {
    /// Draw COCO boxes onto images.
    DrawCoco {
        /// COCO annotation JSON file
        annot_path: PathBuf,
        /// directory of the images
        images_dir: PathBuf,
        #[clap(flatten)]
        filenames: FilenameArgs,
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Draw YOLO sidecar or OpenImages boxes onto images of a multi-category download.
    DrawOpenImages {
        /// directory containing the <prefix>_<category> datasets
        open_images_path: PathBuf,
        /// dataset name prefix
        open_images_prefix: String,
        /// OpenImages box annotation CSV; YOLO sidecars are used if not set
        #[clap(long = "from_open_images")]
        from_open_images: Option<PathBuf>,
        /// header-less ID,label mapping CSV
        #[clap(long = "label_mapping", default_value = DEFAULT_LABEL_MAPPING)]
        label_mapping: PathBuf,
        /// json5 file of categories and splits
        #[clap(long)]
        config: Option<PathBuf>,
        #[clap(flatten)]
        filenames: FilenameArgs,
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Find images downloaded into more than one category folder.
    FindDuplicates {
        /// directory containing the <prefix>_<category> datasets
        open_images_path: PathBuf,
        /// dataset name prefix
        open_images_prefix: String,
        /// folder between the dataset and the split directories, e.g. raw/1
        open_images_suffix: PathBuf,
        /// header-less ID,label mapping CSV
        path_label_id: PathBuf,
        /// output manifest CSV
        #[clap(long = "output_file", default_value = DEFAULT_MANIFEST)]
        output_file: PathBuf,
        /// json5 file of categories and splits
        #[clap(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct FilenameArgs {
    /// target image file names
    #[clap(long = "filename_list", multiple_values = true)]
    filename_list: Option<Vec<String>>,
    /// CSV file with a file_name column
    #[clap(long = "from_csv")]
    from_csv: Option<PathBuf>,
    /// directory whose entries are the targets
    #[clap(long = "input_dir")]
    input_dir: Option<PathBuf>,
}

impl From<FilenameArgs> for FilenameSource {
    fn from(from: FilenameArgs) -> Self {
        let FilenameArgs {
            filename_list,
            from_csv,
            input_dir,
        } = from;
        Self {
            filename_list,
            from_csv,
            input_dir,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct OutputArgs {
    /// directory to save drawn images
    #[clap(long = "output_dir")]
    output_dir: Option<PathBuf>,
    /// show each drawn image in a window
    #[clap(long)]
    show: bool,
}

impl From<OutputArgs> for OutputConfig {
    fn from(from: OutputArgs) -> Self {
        let OutputArgs { output_dir, show } = from;
        Self { output_dir, show }
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let dispatch = LoggerConfig::default().build();
    logging::scoped(&dispatch, || run(opts))
}

fn run(opts: Opts) -> Result<()> {
    match opts {
        Opts::DrawCoco {
            annot_path,
            images_dir,
            filenames,
            output,
        } => {
            let config = DrawCocoConfig {
                annotation_file: annot_path,
                images_dir,
                filenames: filenames.into(),
                output: output.into(),
            };
            dataset_inspect::draw_coco(&config)?;
        }
        Opts::DrawOpenImages {
            open_images_path,
            open_images_prefix,
            from_open_images,
            label_mapping,
            config,
            filenames,
            output,
        } => {
            let config = DrawOpenImagesConfig {
                dataset: DatasetLayout::new(open_images_path, &open_images_prefix, DEFAULT_SUFFIX),
                layout: load_layout(config.as_deref())?,
                annotation_file: from_open_images,
                label_mapping,
                filenames: filenames.into(),
                output: output.into(),
            };
            dataset_inspect::draw_open_images(&config)?;
        }
        Opts::FindDuplicates {
            open_images_path,
            open_images_prefix,
            open_images_suffix,
            path_label_id,
            output_file,
            config,
        } => {
            let config = FindDuplicatesConfig {
                dataset: DatasetLayout::new(
                    open_images_path,
                    &open_images_prefix,
                    open_images_suffix,
                ),
                layout: load_layout(config.as_deref())?,
                label_mapping: path_label_id,
                output_file,
            };
            let records = dataset_inspect::find_duplicates(&config)?;
            print_duplicates(&records);
        }
    }

    Ok(())
}

fn load_layout(config_file: Option<&Path>) -> Result<LayoutConfig> {
    Ok(match config_file {
        Some(path) => LayoutConfig::open(path)?,
        None => LayoutConfig::default(),
    })
}

fn print_duplicates(records: &[DuplicateRecord]) {
    if records.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["label", "ID_label", "images"]);

    records
        .iter()
        .map(|record| (record.label.join(","), record.id_label.join(",")))
        .counts()
        .into_iter()
        .sorted()
        .for_each(|((label, id_label), count)| {
            table.add_row(row![label, id_label, count]);
        });

    table.printstd();
}
