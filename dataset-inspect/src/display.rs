//! On-screen image window.

use crate::common::*;

pub use imp::*;

const WINDOW_NAME: &str = "image";

#[cfg(feature = "display")]
mod imp {
    use super::*;
    use opencv::{
        core::{Mat, Scalar, CV_8UC3},
        highgui,
        prelude::*,
    };

    /// An OpenCV window that shows one image at a time and waits for a key press.
    #[derive(Debug)]
    pub struct Viewer {
        _private: [u8; 0],
    }

    impl Viewer {
        pub fn new() -> Result<Self> {
            highgui::named_window(WINDOW_NAME, highgui::WINDOW_AUTOSIZE)?;
            Ok(Self { _private: [] })
        }

        pub fn show(&mut self, image: &RgbImage) -> Result<()> {
            let (width, height) = image.dimensions();
            let mut mat = Mat::new_rows_cols_with_default(
                height as i32,
                width as i32,
                CV_8UC3,
                Scalar::all(0.0),
            )?;

            // OpenCV stores pixels in BGR order
            let bgr: Vec<u8> = image
                .pixels()
                .flat_map(|pixel| {
                    let [r, g, b] = pixel.0;
                    [b, g, r]
                })
                .collect();
            mat.data_bytes_mut()?.copy_from_slice(&bgr);

            highgui::imshow(WINDOW_NAME, &mat)?;
            highgui::wait_key(0)?;
            Ok(())
        }
    }
}

#[cfg(not(feature = "display"))]
mod imp {
    use super::*;

    #[derive(Debug)]
    pub struct Viewer {
        _private: [u8; 0],
    }

    impl Viewer {
        pub fn new() -> Result<Self> {
            bail!(
                "unable to open window '{}': the 'display' feature is not enabled",
                WINDOW_NAME
            );
        }

        pub fn show(&mut self, _image: &RgbImage) -> Result<()> {
            bail!("the 'display' feature is not enabled");
        }
    }
}
