use bbox::{Transform, XYXY_};
use num_traits::Num;
use std::ops::Mul;

/// A bounding box together with the class it was annotated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<R, C> {
    pub rect: R,
    pub class: C,
}

impl<R, C> Label<R, C> {
    pub fn new(rect: R, class: C) -> Self {
        Self { rect, class }
    }
}

impl<'a, T, C> Mul<&'a Label<XYXY_<T>, C>> for &'a Transform<T>
where
    T: Copy + Num,
    C: Clone,
{
    type Output = Label<XYXY_<T>, C>;

    fn mul(self, rhs: &'a Label<XYXY_<T>, C>) -> Self::Output {
        Label {
            rect: self * &rhs.rect,
            class: rhs.class.clone(),
        }
    }
}
