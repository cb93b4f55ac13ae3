//! The inspection pipelines.
//!
//! Unusable inputs of a single image are logged and skipped. Everything else,
//! including malformed annotation files, aborts the run.

use crate::{
    coco::{self, CocoIndex},
    common::*,
    config::{DrawCocoConfig, DrawOpenImagesConfig, FindDuplicatesConfig},
    duplicate::{self, DuplicateRecord},
    manifest,
    open_images::{self, LabelMapping, OpenImagesIndex},
    present::Presenter,
    render, yolo,
};

/// Counts of a drawing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawSummary {
    /// Images presented.
    pub drawn: usize,
    /// Target names without an image or annotations.
    pub skipped: usize,
}

fn load_image(path: &Path) -> Option<RgbImage> {
    match image::open(path) {
        Ok(image) => Some(image.to_rgb8()),
        Err(err) => {
            error!("unable to read image {}: {}", path.display(), err);
            None
        }
    }
}

/// Draw COCO boxes onto the target images of `images_dir`.
pub fn draw_coco(config: &DrawCocoConfig) -> Result<DrawSummary> {
    let _span = info_span!("draw_coco").entered();
    let DrawCocoConfig {
        annotation_file,
        images_dir,
        filenames,
        output,
    } = config;

    ensure!(
        images_dir.is_dir(),
        "images directory '{}' does not exist",
        images_dir.display()
    );
    let mut presenter = Presenter::new(output)?;
    let filenames = filenames.resolve()?;
    let index = CocoIndex::new(coco::DataSet::open(annotation_file)?);

    let mut summary = DrawSummary::default();

    for file_name in &filenames {
        let path = images_dir.join(file_name);
        if !path.is_file() {
            info!("image {} is not in {}", file_name, images_dir.display());
            summary.skipped += 1;
            continue;
        }
        let annotations = match index.lookup(file_name) {
            Some(annotations) => annotations,
            None => {
                info!("image {} has no annotations", file_name);
                summary.skipped += 1;
                continue;
            }
        };
        let mut image = match load_image(&path) {
            Some(image) => image,
            None => {
                summary.skipped += 1;
                continue;
            }
        };

        for ann in annotations {
            let name = index.category_name(ann.category_id)?;
            if let Err(err) = render::draw_xywh(&mut image, ann.bbox, name) {
                warn!("skip annotation {} of {}: {}", ann.id, file_name, err);
            }
        }

        presenter.present(&image, file_name)?;
        summary.drawn += 1;
    }

    info!("drew {} images, skipped {}", summary.drawn, summary.skipped);
    Ok(summary)
}

enum BoxSource {
    Sidecar,
    OpenImages {
        index: OpenImagesIndex,
        mapping: LabelMapping,
    },
}

/// Draw boxes onto images of the multi-category dataset.
///
/// Boxes come from the OpenImages CSV when one is configured, otherwise from
/// the YOLO sidecars of every copy of the image.
pub fn draw_open_images(config: &DrawOpenImagesConfig) -> Result<DrawSummary> {
    let _span = info_span!("draw_open_images").entered();
    let DrawOpenImagesConfig {
        dataset,
        layout,
        annotation_file,
        label_mapping,
        filenames,
        output,
    } = config;

    let mut presenter = Presenter::new(output)?;
    let source = match annotation_file {
        Some(path) => BoxSource::OpenImages {
            index: OpenImagesIndex::open(path)?,
            mapping: LabelMapping::open(label_mapping)?,
        },
        None => BoxSource::Sidecar,
    };
    let filenames = filenames.resolve()?;

    let mut summary = DrawSummary::default();

    for file_name in &filenames {
        let paths = dataset.find_image(file_name, layout);
        let first = match paths.first() {
            Some(path) => path,
            None => {
                error!(
                    "image {} is not in any folder of {}",
                    file_name, dataset.prefix
                );
                summary.skipped += 1;
                continue;
            }
        };
        info!("image {} is in {:?}", file_name, paths);

        let mut image = match load_image(first) {
            Some(image) => image,
            None => {
                summary.skipped += 1;
                continue;
            }
        };

        let output_name = match &source {
            BoxSource::Sidecar => {
                let lines = yolo::collect_annotations(&paths)?;
                if lines.is_empty() {
                    info!("image {} has no annotations in {}", file_name, dataset.prefix);
                    summary.skipped += 1;
                    continue;
                }
                for line in &lines {
                    if let Err(err) = render::draw_label(&mut image, &line.to_label()) {
                        warn!("skip box of {}: {}", file_name, err);
                    }
                }
                file_name.clone()
            }
            BoxSource::OpenImages { index, mapping } => {
                let stem = Path::new(file_name)
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or(file_name);
                let rows = match index.lookup(stem) {
                    Some(rows) => rows,
                    None => {
                        error!("image {} has no annotations", file_name);
                        summary.skipped += 1;
                        continue;
                    }
                };
                let size = HW::from_dimensions(image.dimensions());
                for label in open_images::pixel_labels(rows, &size, mapping)? {
                    if let Err(err) = render::draw_label(&mut image, &label) {
                        warn!("skip box of {}: {}", file_name, err);
                    }
                }
                format!("{}.jpg", stem)
            }
        };

        presenter.present(&image, &output_name)?;
        summary.drawn += 1;
    }

    info!("drew {} images, skipped {}", summary.drawn, summary.skipped);
    Ok(summary)
}

/// Find cross-category duplicates and write them to the manifest.
///
/// No manifest is written when there are no duplicates.
pub fn find_duplicates(config: &FindDuplicatesConfig) -> Result<Vec<DuplicateRecord>> {
    let _span = info_span!("find_duplicates").entered();
    let FindDuplicatesConfig {
        dataset,
        layout,
        label_mapping,
        output_file,
    } = config;

    let mapping = LabelMapping::open(label_mapping)?;
    let label_ids: Vec<String> = layout
        .categories
        .iter()
        .map(|category| -> Result<_> { Ok(mapping.id_of(&category.label)?.to_owned()) })
        .collect::<Result<_>>()?;

    let records = duplicate::find_duplicates(dataset, layout, &label_ids)?;
    if records.is_empty() {
        info!("no duplicates found");
    } else {
        manifest::write_manifest(output_file, &records)?;
    }
    Ok(records)
}
