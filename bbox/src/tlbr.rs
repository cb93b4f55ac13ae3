use super::Rect;
use crate::common::*;

/// Bounding box in TLBR format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TLBR<T> {
    pub(crate) t: T,
    pub(crate) l: T,
    pub(crate) b: T,
    pub(crate) r: T,
}

impl<T> TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    /// Build from a corner style `[x1, y1, x2, y2]` box.
    pub fn try_from_xyxy(xyxy: [T; 4]) -> Result<Self> {
        let [x1, y1, x2, y2] = xyxy;
        Self::try_from_tlbr([y1, x1, y2, x2])
    }
}

impl<T> Rect for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        self.t
    }

    fn l(&self) -> Self::Type {
        self.l
    }

    fn b(&self) -> Self::Type {
        self.b
    }

    fn r(&self) -> Self::Type {
        self.r
    }

    fn h(&self) -> Self::Type {
        self.b - self.t
    }

    fn w(&self) -> Self::Type {
        self.r - self.l
    }

    fn try_from_tlbr(tlbr: [Self::Type; 4]) -> Result<Self> {
        let [t, l, b, r] = tlbr;
        ensure!(b >= t && r >= l, "b >= t and r >= l must hold");

        Ok(Self { t, l, b, r })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RectNum;

    #[test]
    fn corner_accessors() {
        let rect = TLBR::try_from_xyxy([12.0, 40.0, 42.0, 48.0]).unwrap();
        assert_eq!(rect.tlbr(), [40.0, 12.0, 48.0, 42.0]);
        assert_eq!(rect.xyxy(), [12.0, 40.0, 42.0, 48.0]);
        assert_eq!(rect.xywh(), [12.0, 40.0, 30.0, 8.0]);
    }

    #[test]
    fn inverted_corners_are_rejected() {
        assert!(TLBR::try_from_xyxy([10.0, 10.0, 5.0, 20.0]).is_err());
        assert!(TLBR::try_from_xyxy([10, 10, 20, 5]).is_err());
    }

    #[test]
    fn extreme_integer_corners() {
        let rect = TLBR::try_from_xyxy([i32::MIN, 0, i32::MAX, 10]).unwrap();
        assert_eq!(rect.tlbr(), [0, i32::MIN, 10, i32::MAX]);
    }
}
