use crate::{common::*, rect::Rect, Transform, TLBR};

/// Unchecked box given by its two corners, as YOLO sidecars and OpenImages store it.
///
/// The corners may come in any order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XYXY_<T> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T> From<[T; 4]> for XYXY_<T> {
    fn from([x1, y1, x2, y2]: [T; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl<T> XYXY_<T> {
    pub fn try_cast<V>(self) -> Option<XYXY_<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(XYXY_ {
            x1: V::from(self.x1)?,
            y1: V::from(self.y1)?,
            x2: V::from(self.x2)?,
            y2: V::from(self.y2)?,
        })
    }
}

impl<T> XYXY_<T>
where
    T: Copy + PartialOrd,
{
    /// The same box with `(x1, y1)` at the top-left and `(x2, y2)` at the
    /// bottom-right.
    pub fn sorted(&self) -> Self {
        let (x1, x2) = min_max(self.x1, self.x2);
        let (y1, y2) = min_max(self.y1, self.y2);
        Self { x1, y1, x2, y2 }
    }
}

impl<T> XYXY_<T>
where
    T: Copy + Num,
{
    pub fn transform(&self, transform: &Transform<T>) -> Self {
        Self {
            x1: self.x1 * transform.sx + transform.tx,
            y1: self.y1 * transform.sy + transform.ty,
            x2: self.x2 * transform.sx + transform.tx,
            y2: self.y2 * transform.sy + transform.ty,
        }
    }
}

fn min_max<T>(lhs: T, rhs: T) -> (T, T)
where
    T: PartialOrd,
{
    if rhs < lhs {
        (rhs, lhs)
    } else {
        (lhs, rhs)
    }
}

impl<T> TryFrom<XYXY_<T>> for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Error = Error;

    fn try_from(from: XYXY_<T>) -> Result<Self, Self::Error> {
        Self::try_from(&from)
    }
}

impl<T> TryFrom<&XYXY_<T>> for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Error = Error;

    fn try_from(from: &XYXY_<T>) -> Result<Self, Self::Error> {
        let XYXY_ { x1, y1, x2, y2 } = *from;
        Self::try_from_tlbr([y1, x1, y2, x2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::RectNum;

    #[test]
    fn sorted_corners_convert() {
        let right_to_left = XYXY_::from([15.0, 10.0, 5.0, 6.0]);
        assert!(TLBR::try_from(&right_to_left).is_err());

        let rect = TLBR::try_from(right_to_left.sorted()).unwrap();
        assert_eq!(rect.xyxy(), [5.0, 6.0, 15.0, 10.0]);
    }

    #[test]
    fn cast_truncates_towards_zero() {
        let pixels: XYXY_<i32> = XYXY_::from([1.9, 2.5, -10.99, 20.01]).try_cast().unwrap();
        assert_eq!(pixels, XYXY_::from([1, 2, -10, 20]));
        assert!(XYXY_::from([3e9, 0.0, 1.0, 1.0]).try_cast::<i32>().is_none());
    }
}
