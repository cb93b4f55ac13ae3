use crate::common::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HW<T> {
    w: T,
    h: T,
}

impl<T> HW<T>
where
    T: Num + PartialOrd + Copy,
{
    pub fn try_from_hw(hw: [T; 2]) -> Result<Self> {
        let [h, w] = hw;
        let zero = T::zero();
        ensure!(
            h >= zero && w >= zero,
            "height and width parameters must be non-negative"
        );
        Ok(Self { w, h })
    }

    /// Get a reference to the size's w.
    pub fn w(&self) -> T {
        self.w
    }

    /// Get a reference to the size's h.
    pub fn h(&self) -> T {
        self.h
    }
}

impl HW<f64> {
    /// The size of an image given in `(width, height)` order, as image crates report it.
    pub fn from_dimensions((width, height): (u32, u32)) -> Self {
        Self {
            w: width as f64,
            h: height as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn size_from_dimensions() {
        let size = HW::from_dimensions((200, 100));
        assert_abs_diff_eq!(size.w(), 200.0);
        assert_abs_diff_eq!(size.h(), 100.0);
    }

    #[test]
    fn negative_size_is_rejected() {
        assert!(HW::try_from_hw([-1.0, 2.0]).is_err());
    }
}
