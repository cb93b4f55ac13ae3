use super::{Rect, TLBR, XYXY_};
use crate::{common::*, HW};

/// Per-axis affine transform `y' = y * sy + ty`, `x' = x * sx + tx`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transform<T> {
    pub sy: T,
    pub sx: T,
    pub ty: T,
    pub tx: T,
}

impl<T> Transform<T>
where
    T: Copy + Num + PartialOrd,
{
    pub fn from_rects<R>(src: &R, tgt: &R) -> Self
    where
        R: Rect<Type = T>,
    {
        let sy = tgt.h() / src.h();
        let sx = tgt.w() / src.w();
        let ty = tgt.t() - src.t() * sy;
        let tx = tgt.l() - src.l() * sx;

        Self { sy, sx, ty, tx }
    }

    pub fn try_from_sizes_exact(src_size: &HW<T>, tgt_size: &HW<T>) -> Result<Self> {
        let zero = T::zero();
        ensure!(
            src_size.h() > zero && src_size.w() > zero,
            "source size must be positive"
        );
        let src = TLBR::try_from_tlbr([zero, zero, src_size.h(), src_size.w()])?;
        let tgt = TLBR::try_from_tlbr([zero, zero, tgt_size.h(), tgt_size.w()])?;
        Ok(Self::from_rects(&src, &tgt))
    }

    /// Maps boxes in ratio units, where the image spans `[0, 1]` on both
    /// axes, onto pixel units of an image of `size`.
    pub fn ratio_to_pixel(size: &HW<T>) -> Result<Self> {
        let one = T::one();
        let unit = HW::try_from_hw([one, one])?;
        Self::try_from_sizes_exact(&unit, size)
    }
}

impl<T> Mul<&XYXY_<T>> for &Transform<T>
where
    T: Copy + Num,
{
    type Output = XYXY_<T>;

    fn mul(self, rhs: &XYXY_<T>) -> Self::Output {
        rhs.transform(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rect_resize_exact() {
        let transform = Transform::try_from_sizes_exact(
            &HW::try_from_hw([80.0, 80.0]).unwrap(),
            &HW::try_from_hw([20.0, 40.0]).unwrap(),
        )
        .unwrap();
        let expect = Transform {
            sx: 0.5,
            sy: 0.25,
            tx: 0.0,
            ty: 0.0,
        };
        assert_eq!(transform, expect);
    }

    #[test]
    fn ratio_box_to_pixels() {
        let transform = Transform::ratio_to_pixel(&HW::from_dimensions((200, 100))).unwrap();
        let pixel = &transform * &XYXY_::from([0.1, 0.2, 0.5, 0.6]);
        assert_abs_diff_eq!(pixel.x1, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pixel.y1, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pixel.x2, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pixel.y2, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn corner_order_is_kept() {
        let transform = Transform::ratio_to_pixel(&HW::from_dimensions((10, 10))).unwrap();
        let pixel = &transform * &XYXY_::from([0.5, 0.25, 0.1, 0.75]);
        assert_abs_diff_eq!(pixel.x1, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pixel.x2, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_source_is_rejected() {
        let empty = HW::try_from_hw([0.0, 10.0]).unwrap();
        let target = HW::try_from_hw([10.0, 10.0]).unwrap();
        assert!(Transform::try_from_sizes_exact(&empty, &target).is_err());
    }
}
