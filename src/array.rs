//! Provides the [`ArrND`] type, the contiguous storage behind gridded fields and masks,
//! together with the [`Shape`] of an array and iteration over its indices.

use std::ops::{Index, IndexMut, RangeFrom};

use crate::error::FieldError;

/// Type alias for index tuples
pub type Ix<const ND: usize> = [usize; ND];

pub fn shape<const ND: usize>(shape: [usize; ND]) -> Shape<ND> {
    Shape(shape)
}

/// Array shape
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape<const ND: usize>(Ix<ND>);

impl<const ND: usize> Shape<ND> {
    /// Return an iterator over all indices of an array with shape `self`, last index fastest.
    pub fn iter(&self) -> NDIndexer<ND> {
        self.into_iter()
    }

    /// Return the number of elements of the array
    pub fn size(&self) -> usize {
        self.0.iter().product()
    }

    /// Check if `idx` addresses an element of an array with shape `self`.
    pub fn contains(&self, idx: Ix<ND>) -> bool {
        idx.iter().zip(self.0.iter()).all(|(&i, &n)| i < n)
    }
}

impl<const ND: usize> AsRef<Ix<ND>> for Shape<ND> {
    fn as_ref(&self) -> &Ix<ND> {
        &self.0
    }
}

impl<const ND: usize> IntoIterator for Shape<ND> {
    type Item = Ix<ND>;

    type IntoIter = NDIndexer<ND>;

    fn into_iter(self) -> Self::IntoIter {
        NDIndexer {
            inner: None,
            shape: self.0,
        }
    }
}

impl<const ND: usize> Index<usize> for Shape<ND> {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        self.as_ref().index(index)
    }
}

impl<const ND: usize> Index<RangeFrom<usize>> for Shape<ND> {
    type Output = [usize];

    fn index(&self, index: RangeFrom<usize>) -> &Self::Output {
        self.as_ref().index(index)
    }
}

/// Iterator over the indices of a [`Shape`].
pub struct NDIndexer<const ND: usize> {
    inner: Option<Ix<ND>>,
    shape: Ix<ND>,
}

impl<const ND: usize> Iterator for NDIndexer<ND> {
    type Item = Ix<ND>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.shape.iter().any(|&n| n == 0) {
            return None;
        }
        match self.inner {
            Some(ix) => {
                let shape = self.shape;
                let mut ix = ix;
                ix[ND - 1] += 1;
                (1..ND).rev().for_each(|d| {
                    if ix[d] >= shape[d] {
                        ix[d] = 0;
                        ix[d - 1] += 1
                    }
                });
                if ix[0] >= shape[0] {
                    // keep returning None once exhausted
                    self.inner = Some(ix);
                    None
                } else {
                    self.inner = Some(ix);
                    self.inner
                }
            }
            None => {
                self.inner = Some([0; ND]);
                self.inner
            }
        }
    }
}

/// Trait to allow for conversion into a Shape type
pub trait IntoShape<const ND: usize> {
    fn into_shape(self) -> Shape<ND>;
}

impl<const ND: usize> IntoShape<ND> for Shape<ND> {
    fn into_shape(self) -> Shape<ND> {
        self
    }
}

impl<const ND: usize> IntoShape<ND> for [usize; ND] {
    fn into_shape(self) -> Shape<ND> {
        Shape(self)
    }
}

/// N-dimensional Array with linear contiguous memory layout.
///
/// The data is stored in a boxed slice and available via indexing with an
/// array of indices. The layout is row-major.
///
/// # Examples
/// ```
/// use icefield::array::ArrND;
///
/// let arr = ArrND::from_fn([2, 3], |[j, i]| (10 * j + i) as f64);
///
/// assert_eq!(arr[[0, 2]], 2.0);
/// assert_eq!(arr[[1, 0]], 10.0);
/// assert_eq!(arr.max(), Some(12.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ArrND<const ND: usize, T> {
    shape: Shape<ND>,
    data: Box<[T]>,
}

impl<const ND: usize, T> ArrND<ND, T> {
    /// Create an array with all elements set to `item`.
    pub fn full(item: T, shape: impl IntoShape<ND>) -> Self
    where
        T: Clone,
    {
        let shape = shape.into_shape();
        ArrND {
            shape,
            data: vec![item; shape.size()].into_boxed_slice(),
        }
    }

    /// Create an array by evaluating `f` for every index.
    pub fn from_fn<F>(shape: impl IntoShape<ND>, f: F) -> Self
    where
        F: FnMut(Ix<ND>) -> T,
    {
        let shape = shape.into_shape();
        ArrND {
            shape,
            data: shape.iter().map(f).collect(),
        }
    }

    /// Wrap row-major `data`. Fails if its length does not match `shape`.
    pub fn from_vec(shape: impl IntoShape<ND>, data: Vec<T>) -> Result<Self, FieldError> {
        let shape = shape.into_shape();
        if data.len() != shape.size() {
            return Err(FieldError::ShapeMismatch {
                expected: vec![shape.size()],
                found: vec![data.len()],
            });
        }
        Ok(ArrND {
            shape,
            data: data.into_boxed_slice(),
        })
    }

    /// Return the shape of the array.
    pub fn shape(&self) -> Shape<ND> {
        self.shape
    }

    /// Return the element at `index`, or `None` if it is out of bounds.
    pub fn get(&self, index: Ix<ND>) -> Option<&T> {
        if self.shape.contains(index) {
            Some(&self.data[self.flatten_index(index)])
        } else {
            None
        }
    }

    /// Iterate over all elements in memory order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    #[inline]
    fn flatten_index(&self, index: Ix<ND>) -> usize {
        let shape = self.shape;
        let mut sum = index[ND - 1];
        for d in 0..ND - 1 {
            let prod: usize = shape[d + 1..].iter().product();
            sum += index[d] * prod;
        }
        sum
    }
}

impl<const ND: usize> ArrND<ND, f64> {
    /// Smallest finite element.
    pub fn min(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::min)
    }

    /// Largest finite element.
    pub fn max(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }
}

impl<const ND: usize, T> Index<Ix<ND>> for ArrND<ND, T> {
    type Output = T;
    #[inline]
    fn index(&self, index: Ix<ND>) -> &T {
        &self.data[self.flatten_index(index)]
    }
}

impl<const ND: usize, T> IndexMut<Ix<ND>> for ArrND<ND, T> {
    #[inline]
    fn index_mut(&mut self, index: Ix<ND>) -> &mut Self::Output {
        let flat = self.flatten_index(index);
        &mut self.data[flat]
    }
}
