//! Box and label overlay.

use crate::common::*;
use ab_glyph::{FontRef, PxScale};
use image::Rgb;
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};

/// Box outline colour.
pub const BOX_COLOR: [u8; 3] = [0, 0, 255];
/// Label text colour.
pub const TEXT_COLOR: [u8; 3] = [12, 255, 36];
pub const BOX_THICKNESS: i32 = 3;
/// Label glyph height in pixels.
pub const LABEL_SCALE: f32 = 18.0;

static FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// A drawing surface for box overlays.
pub trait Canvas {
    /// Draw the outline of `rect`, `thickness` pixels wide and centered on its edges.
    fn draw_rect(&mut self, rect: &TLBR<i32>, color: [u8; 3], thickness: i32);

    /// Draw `text` with its baseline at `(x, baseline)`.
    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, color: [u8; 3]) -> Result<()>;
}

impl Canvas for RgbImage {
    fn draw_rect(&mut self, rect: &TLBR<i32>, color: [u8; 3], thickness: i32) {
        let [t, l, b, r] = rect.tlbr().map(i64::from);
        let (width, height) = (i64::from(self.width()), i64::from(self.height()));
        let half = i64::from(thickness / 2);

        for grow in -half..=half {
            // edges clipped to one pixel outside the image stay invisible
            let left = (l - grow).max(-1);
            let top = (t - grow).max(-1);
            let right = (r + grow).min(width);
            let bottom = (b + grow).min(height);
            if right < left || bottom < top {
                continue;
            }
            let outline = imageproc::rect::Rect::at(left as i32, top as i32)
                .of_size((right - left + 1) as u32, (bottom - top + 1) as u32);
            draw_hollow_rect_mut(self, outline, Rgb(color));
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, color: [u8; 3]) -> Result<()> {
        // imageproc places text by its top edge
        let top = i64::from(baseline) - LABEL_SCALE as i64;
        let reach = (text.chars().count() as i64 + 1) * LABEL_SCALE as i64;
        let x = i64::from(x);
        if x >= i64::from(self.width())
            || x + reach < 0
            || top >= i64::from(self.height())
            || top + 2 * (LABEL_SCALE as i64) < 0
        {
            return Ok(());
        }

        let font = FontRef::try_from_slice(FONT_DATA)?;
        let scale = PxScale::from(LABEL_SCALE);
        draw_text_mut(self, Rgb(color), x as i32, top as i32, scale, &font, text);
        Ok(())
    }
}

/// The label baseline for a box whose top edge is at `top`.
///
/// Labels go above the box unless that would leave the image.
pub fn label_baseline(top: i32) -> i32 {
    if top < 30 {
        top + 15
    } else {
        top - 10
    }
}

fn to_pixels(values: [f64; 4]) -> Result<XYXY_<i32>> {
    XYXY_::from(values)
        .try_cast()
        .ok_or_else(|| format_err!("box {:?} is out of range", values))
}

/// Draw the box spanned by two corners in any order.
///
/// The label stays anchored at `(x1, y1)` as given.
fn draw_corners<C>(canvas: &mut C, corners: &XYXY_<i32>, text: &str) -> Result<()>
where
    C: Canvas,
{
    let rect = TLBR::try_from(corners.sorted())?;
    canvas.draw_rect(&rect, BOX_COLOR, BOX_THICKNESS);
    canvas.draw_text(text, corners.x1, label_baseline(corners.y1), TEXT_COLOR)
}

/// Draw a COCO `[x, y, w, h]` box. Each value is truncated to whole pixels.
///
/// A negative width or height extends the box left or up from `(x, y)`.
pub fn draw_xywh<C>(canvas: &mut C, xywh: [f64; 4], text: &str) -> Result<()>
where
    C: Canvas,
{
    let XYXY_ { x1, y1, x2: w, y2: h } = to_pixels(xywh)?;
    let x2 = x1
        .checked_add(w)
        .ok_or_else(|| format_err!("box {:?} is out of range", xywh))?;
    let y2 = y1
        .checked_add(h)
        .ok_or_else(|| format_err!("box {:?} is out of range", xywh))?;
    draw_corners(canvas, &XYXY_ { x1, y1, x2, y2 }, text)
}

/// Draw a `[x1, y1, x2, y2]` corner box. Each value is truncated to whole pixels.
pub fn draw_xyxy<C>(canvas: &mut C, xyxy: [f64; 4], text: &str) -> Result<()>
where
    C: Canvas,
{
    draw_corners(canvas, &to_pixels(xyxy)?, text)
}

/// Draw a box in pixel units with its class as the label.
pub fn draw_label<C>(canvas: &mut C, label: &Label<XYXY_<f64>, String>) -> Result<()>
where
    C: Canvas,
{
    let XYXY_ { x1, y1, x2, y2 } = label.rect;
    draw_xyxy(canvas, [x1, y1, x2, y2], &label.class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        rects: Vec<[i32; 4]>,
        texts: Vec<(String, i32, i32)>,
    }

    impl Canvas for Recorder {
        fn draw_rect(&mut self, rect: &TLBR<i32>, _color: [u8; 3], _thickness: i32) {
            self.rects.push(rect.xyxy());
        }

        fn draw_text(&mut self, text: &str, x: i32, baseline: i32, _color: [u8; 3]) -> Result<()> {
            self.texts.push((text.to_owned(), x, baseline));
            Ok(())
        }
    }

    #[test]
    fn baseline_placement() {
        assert_eq!(label_baseline(0), 15);
        assert_eq!(label_baseline(29), 44);
        assert_eq!(label_baseline(30), 20);
        assert_eq!(label_baseline(100), 90);
    }

    #[test]
    fn coordinates_are_truncated() {
        let mut recorder = Recorder::default();
        draw_xywh(&mut recorder, [10.9, 40.2, 20.7, 5.5], "cat").unwrap();
        draw_xyxy(&mut recorder, [1.5, 2.5, 3.5, 4.5], "dog").unwrap();
        assert_eq!(recorder.rects, [[10, 40, 30, 45], [1, 2, 3, 4]]);
        assert_eq!(
            recorder.texts,
            [("cat".to_string(), 10, 30), ("dog".to_string(), 1, 17)]
        );
    }

    #[test]
    fn xywh_and_xyxy_draw_the_same_pixels() {
        let mut from_xywh = RgbImage::new(80, 60);
        let mut from_xyxy = RgbImage::new(80, 60);
        draw_xywh(&mut from_xywh, [10.0, 35.0, 30.0, 20.0], "person").unwrap();
        draw_xyxy(&mut from_xyxy, [10.0, 35.0, 40.0, 55.0], "person").unwrap();
        assert_eq!(from_xywh, from_xyxy);
    }

    #[test]
    fn outline_is_three_pixels_wide() {
        let mut image = RgbImage::new(40, 40);
        image.draw_rect(
            &TLBR::try_from_xyxy([10, 10, 30, 30]).unwrap(),
            BOX_COLOR,
            BOX_THICKNESS,
        );

        for x in [9, 10, 11] {
            assert_eq!(image.get_pixel(x, 20).0, BOX_COLOR);
        }
        assert_eq!(image.get_pixel(8, 20).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(12, 20).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(20, 20).0, [0, 0, 0]);
    }

    #[test]
    fn label_is_drawn_above_the_box() {
        let mut image = RgbImage::new(120, 80);
        draw_xyxy(&mut image, [20.0, 50.0, 100.0, 75.0], "dog").unwrap();

        // the text occupies the band ending at the baseline, 10 px above the box
        let baseline = label_baseline(50) as u32;
        let top = baseline - LABEL_SCALE as u32;
        let painted = (top..baseline)
            .flat_map(|y| (20..60).map(move |x| (x, y)))
            .any(|(x, y)| image.get_pixel(x, y).0 != [0, 0, 0]);
        assert!(painted);
    }

    #[test]
    fn inverted_corners_are_sorted() {
        let mut recorder = Recorder::default();
        draw_xywh(&mut recorder, [10.0, 10.0, -5.0, 5.0], "cat").unwrap();
        draw_xyxy(&mut recorder, [50.0, 40.0, 20.0, 55.0], "dog").unwrap();
        assert_eq!(recorder.rects, [[5, 10, 10, 15], [20, 40, 50, 55]]);
        // labels stay at the first corner as given
        assert_eq!(
            recorder.texts,
            [("cat".to_string(), 10, 25), ("dog".to_string(), 50, 30)]
        );
    }

    #[test]
    fn right_to_left_box_is_painted() {
        let mut image = RgbImage::new(80, 60);
        draw_xyxy(&mut image, [50.0, 40.0, 20.0, 55.0], "Cat").unwrap();
        assert_eq!(image.get_pixel(20, 50).0, BOX_COLOR);
        assert_eq!(image.get_pixel(50, 50).0, BOX_COLOR);
        assert_eq!(image.get_pixel(35, 55).0, BOX_COLOR);
    }

    #[test]
    fn huge_coordinates_do_not_overflow() {
        let mut image = RgbImage::new(40, 40);
        assert!(draw_xywh(&mut image, [2e9, 0.0, 2e9, 10.0], "cat").is_err());
        assert!(draw_xyxy(&mut image, [3e9, 0.0, 1.0, 10.0], "cat").is_err());

        draw_xyxy(&mut image, [2e9, 0.0, 2.1e9, 10.0], "cat").unwrap();
        assert!(image.pixels().all(|pixel| pixel.0 == [0, 0, 0]));

        // only the top edge crosses the image
        draw_xyxy(&mut image, [-2.1e9, 5.0, 2.1e9, 2.1e9], "dog").unwrap();
        assert_eq!(image.get_pixel(20, 5).0, BOX_COLOR);
        assert_eq!(image.get_pixel(20, 30).0, [0, 0, 0]);
    }
}
