use crate::errors::{Error, Result};

fn rearrange(a: usize, b: usize) -> (usize, usize) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// An inclusive range of coordinate indices, tagged with the name of its axis.
///
/// Callers use this to slice the storage dimension an axis describes. A scalar axis yields the
/// empty range; for any other axis the range is `[0, ncoords - 1]` and a count of zero is
/// unrepresentable.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexRange {
    name: String,
    bounds: Option<(usize, usize)>,
}

impl IndexRange {
    /// Make the range `[0, ncoords - 1]`. Fails if `ncoords` is zero.
    pub fn new<S: Into<String>>(name: S, ncoords: usize) -> Result<Self> {
        let name = name.into();
        if ncoords == 0 {
            return Err(Error::InvalidRange { axis: name, ncoords });
        }

        Ok(Self {
            name,
            bounds: Some((0, ncoords - 1)),
        })
    }

    /// The empty range, used for scalar axes.
    pub fn empty<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            bounds: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn first(&self) -> Option<usize> {
        self.bounds.map(|(first, _)| first)
    }

    pub fn last(&self) -> Option<usize> {
        self.bounds.map(|(_, last)| last)
    }

    pub fn len(&self) -> usize {
        match self.bounds {
            Some((first, last)) => last - first + 1,
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }
}

/// The index window a subset occupies within the axis it was derived from.
///
/// Indices run `first, first + stride, ...` up through `last`. Recorded on every subset so that a
/// dependent axis can be re-expressed in terms of a subset already applied to the axis it depends
/// on.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubsetWindow {
    pub first: usize,
    pub last: usize,
    pub stride: usize,
}

impl SubsetWindow {
    pub fn new(first: usize, last: usize) -> Self {
        Self::with_stride(first, last, 1)
    }

    pub fn with_stride(first: usize, last: usize, stride: usize) -> Self {
        let (first, last) = rearrange(first, last);
        assert!(stride > 0, "stride must be positive");
        Self {
            first,
            last,
            stride,
        }
    }

    /// Number of coordinates selected by this window.
    pub fn len(&self) -> usize {
        (self.last - self.first) / self.stride + 1
    }

    /// The parent-axis indices selected by this window, in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (self.first..=self.last).step_by(self.stride)
    }

    /// Resolve `inner`, a window expressed relative to this window's selection, back into
    /// indices of this window's own parent axis.
    pub fn compose(&self, inner: SubsetWindow) -> SubsetWindow {
        SubsetWindow::with_stride(
            self.first + inner.first * self.stride,
            self.first + inner.last * self.stride,
            self.stride * inner.stride,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        let range = IndexRange::new("lat", 5).unwrap();
        assert_eq!(range.name(), "lat");
        assert_eq!(range.first(), Some(0));
        assert_eq!(range.last(), Some(4));
        assert_eq!(range.len(), 5);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_range_zero_coords() {
        let result = IndexRange::new("lat", 0);
        assert!(matches!(
            result,
            Err(Error::InvalidRange { ncoords: 0, .. })
        ));
    }

    #[test]
    fn test_empty_range() {
        let range = IndexRange::empty("reftime");
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert_eq!(range.first(), None);
        assert_eq!(range.last(), None);
    }

    #[test]
    fn test_window_indices() {
        let window = SubsetWindow::new(2, 5);
        assert_eq!(window.len(), 4);
        assert_eq!(window.indices().collect::<Vec<usize>>(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_window_stride() {
        let window = SubsetWindow::with_stride(1, 9, 4);
        assert_eq!(window.len(), 3);
        assert_eq!(window.indices().collect::<Vec<usize>>(), vec![1, 5, 9]);
    }

    #[test]
    fn test_window_compose() {
        let outer = SubsetWindow::new(2, 4);
        let inner = SubsetWindow::with_stride(0, 2, 2);
        assert_eq!(outer.compose(inner), SubsetWindow::with_stride(2, 4, 2));

        let outer = SubsetWindow::with_stride(1, 9, 2);
        let inner = SubsetWindow::with_stride(1, 3, 2);
        assert_eq!(outer.compose(inner), SubsetWindow::with_stride(3, 7, 4));
    }

    #[test]
    fn test_window_rearranges() {
        let window = SubsetWindow::new(7, 3);
        assert_eq!(window.first, 3);
        assert_eq!(window.last, 7);
    }
}
