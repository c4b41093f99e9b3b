use std::fmt::Display;
use std::ops::{Index, IndexMut};
use itertools::Itertools;
use nalgebra::{DMatrix, Scalar};
use num_traits::{Zero, One};

pub trait MatType {
    fn shape(&self) -> (usize, usize);
    fn rows(&self) -> usize { self.shape().0 }
    fn cols(&self) -> usize { self.shape().1 }
    fn is_square(&self) -> bool { 
        let (m, n) = self.shape();
        m == n
    }
}

/// Dense matrix over an arbitrary ring, backed by `nalgebra`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mat<R> {
    inner: DMatrix<R>
}

impl<R> MatType for Mat<R> {
    fn shape(&self) -> (usize, usize) {
        (self.inner.nrows(), self.inner.ncols())
    }
}

impl<R> Mat<R>
where R: Scalar {
    pub fn from_data<I>(shape: (usize, usize), data: I) -> Self
    where I: IntoIterator<Item = R> { 
        DMatrix::from_row_iterator(shape.0, shape.1, data).into()
    }

    pub fn from_rows(rows: Vec<Vec<R>>) -> Self { 
        let m = rows.len();
        let n = rows.first().map(|r| r.len()).unwrap_or(0);
        assert!(rows.iter().all(|r| r.len() == n), "rows must have equal length");
        Self::from_data((m, n), rows.into_iter().flatten())
    }

    pub fn from_fn<F>(shape: (usize, usize), f: F) -> Self
    where F: FnMut(usize, usize) -> R { 
        DMatrix::from_fn(shape.0, shape.1, f).into()
    }

    pub fn zero(shape: (usize, usize)) -> Self
    where R: Zero { 
        DMatrix::zeros(shape.0, shape.1).into()
    }

    pub fn id(size: usize) -> Self
    where R: Zero + One { 
        DMatrix::identity(size, size).into()
    }

    /// Entries `(i, j, a)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &R)> { 
        let (m, n) = self.shape();
        (0..m).cartesian_product(0..n).map(move |(i, j)| 
            (i, j, &self.inner[(i, j)])
        )
    }

    pub fn row_vec(&self, i: usize) -> Vec<R> { 
        (0..self.cols()).map(|j| self.inner[(i, j)].clone()).collect()
    }

    pub fn to_rows(&self) -> Vec<Vec<R>> { 
        (0..self.rows()).map(|i| self.row_vec(i)).collect()
    }

    pub fn is_zero(&self) -> bool
    where R: Zero { 
        self.inner.iter().all(|a| a.is_zero())
    }

    pub fn transpose(&self) -> Self { 
        self.inner.transpose().into()
    }

    pub fn map<S, F>(&self, mut f: F) -> Mat<S>
    where S: Scalar, F: FnMut(&R) -> S { 
        Mat::from_fn(self.shape(), |i, j| f(&self.inner[(i, j)]))
    }

    /// The submatrix on the given row and column indices, in the given order.
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> Self { 
        Self::from_fn((rows.len(), cols.len()), |i, j| 
            self.inner[(rows[i], cols[j])].clone()
        )
    }

    pub fn remove_row(&self, i: usize) -> Self { 
        assert!(i < self.rows());
        self.inner.clone().remove_row(i).into()
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.inner.swap_rows(i, j);
    }

    /// Block-diagonal sum of the given matrices.
    pub fn block_diag(blocks: &[Mat<R>]) -> Self
    where R: Zero { 
        let m = blocks.iter().map(|b| b.rows()).sum();
        let n = blocks.iter().map(|b| b.cols()).sum();
        let mut res = Self::zero((m, n));
        let (mut i0, mut j0) = (0, 0);
        for b in blocks { 
            for (i, j, a) in b.iter() { 
                res[(i0 + i, j0 + j)] = a.clone();
            }
            i0 += b.rows();
            j0 += b.cols();
        }
        res
    }
}

impl<R> From<DMatrix<R>> for Mat<R> {
    fn from(inner: DMatrix<R>) -> Self {
        Self { inner }
    }
}

impl<R> Index<(usize, usize)> for Mat<R>
where R: Scalar {
    type Output = R;
    fn index(&self, index: (usize, usize)) -> &R {
        &self.inner[index]
    }
}

impl<R> IndexMut<(usize, usize)> for Mat<R>
where R: Scalar {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut R {
        &mut self.inner[index]
    }
}

impl<R> Display for Mat<R>
where R: Scalar + Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = (0..self.rows()).map(|i| 
            (0..self.cols()).map(|j| self.inner[(i, j)].to_string()).join(", ")
        ).join("; ");
        write!(f, "[{rows}]")
    }
}
