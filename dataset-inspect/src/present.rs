//! Saving and showing drawn images.

use crate::{common::*, config::OutputConfig, display::Viewer};

/// Sends each drawn image to the output directory, the viewer, or both.
#[derive(Debug)]
pub struct Presenter {
    output_dir: Option<PathBuf>,
    viewer: Option<Viewer>,
}

impl Presenter {
    /// Create the output directory if needed and open the viewer if asked for.
    pub fn new(config: &OutputConfig) -> Result<Self> {
        let OutputConfig { output_dir, show } = config;

        if let Some(dir) = output_dir {
            if !dir.is_dir() {
                info!("creating output directory {}", dir.display());
                fs::create_dir_all(dir).with_context(|| {
                    format!("unable to create output directory '{}'", dir.display())
                })?;
            }
        }
        let viewer = show.then(Viewer::new).transpose()?;

        Ok(Self {
            output_dir: output_dir.clone(),
            viewer,
        })
    }

    /// Save `image` as `<output_dir>/<file_name>` and show it.
    pub fn present(&mut self, image: &RgbImage, file_name: &str) -> Result<()> {
        if let Some(dir) = &self.output_dir {
            let path = dir.join(file_name);
            image
                .save(&path)
                .with_context(|| format!("unable to save '{}'", path.display()))?;
            info!("saved {}", path.display());
        }
        if let Some(viewer) = &mut self.viewer {
            viewer.show(image)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_into_new_directory() {
        let root = tempfile::tempdir().unwrap();
        let output_dir = root.path().join("out/drawn");
        let mut presenter = Presenter::new(&OutputConfig {
            output_dir: Some(output_dir.clone()),
            show: false,
        })
        .unwrap();

        let image = RgbImage::from_pixel(4, 3, image::Rgb([1, 2, 3]));
        presenter.present(&image, "a.png").unwrap();

        let saved = image::open(output_dir.join("a.png")).unwrap().to_rgb8();
        assert_eq!(saved, image);
    }

    #[test]
    fn nothing_to_do_without_output() {
        let mut presenter = Presenter::new(&OutputConfig::default()).unwrap();
        presenter.present(&RgbImage::new(2, 2), "a.png").unwrap();
    }

    #[cfg(not(feature = "display"))]
    #[test]
    fn show_requires_display_feature() {
        let config = OutputConfig {
            output_dir: None,
            show: true,
        };
        assert!(Presenter::new(&config).is_err());
    }
}
