//! Conversions between host `ndarray` matrices and the native layout.
//!
//! The native library stores matrices column-major with one point per column.
//! Host code usually holds one point per row, so the default
//! [`MatrixLayout::PointsAreRows`] orientation is a plain buffer copy (a
//! row-major points-by-dimensions matrix is bitwise identical to a
//! column-major dimensions-by-points one), while [`MatrixLayout::PointsAreColumns`]
//! requires a transposing copy. The same orientation is applied to every
//! matrix of one invocation, inputs and outputs alike.

use ndarray::{Array2, ArrayView2, ShapeBuilder};

use crate::error::{Error, Result};

/// Orientation of host matrices relative to the native points-as-columns
/// convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixLayout {
    /// Host matrices carry one data point per row (the common case).
    #[default]
    PointsAreRows,
    /// Host matrices carry one data point per column, matching the native
    /// orientation directly.
    PointsAreColumns,
}

/// Converts a host matrix into a native column-major buffer plus its native
/// (rows, cols) dimensions.
pub fn dense_to_native(view: ArrayView2<'_, f64>, layout: MatrixLayout) -> (Vec<f64>, usize, usize) {
    match layout {
        MatrixLayout::PointsAreRows => {
            // Row-major (points, dims) reads out as column-major (dims, points).
            let data: Vec<f64> = view.iter().cloned().collect();
            (data, view.ncols(), view.nrows())
        }
        MatrixLayout::PointsAreColumns => {
            let data: Vec<f64> = view.t().iter().cloned().collect();
            (data, view.nrows(), view.ncols())
        }
    }
}

/// Same conversion for index matrices, at the fixed 64-bit width the native
/// ABI expects.
pub fn index_to_native(view: ArrayView2<'_, u64>, layout: MatrixLayout) -> (Vec<u64>, usize, usize) {
    match layout {
        MatrixLayout::PointsAreRows => {
            let data: Vec<u64> = view.iter().cloned().collect();
            (data, view.ncols(), view.nrows())
        }
        MatrixLayout::PointsAreColumns => {
            let data: Vec<u64> = view.t().iter().cloned().collect();
            (data, view.nrows(), view.ncols())
        }
    }
}

/// Rebuilds a host matrix from a native column-major buffer.
pub fn dense_from_native(
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    layout: MatrixLayout,
) -> Result<Array2<f64>> {
    match layout {
        MatrixLayout::PointsAreRows => Array2::from_shape_vec((cols, rows), data)
            .map_err(|e| Error::DimensionMismatch(e.to_string())),
        MatrixLayout::PointsAreColumns => Array2::from_shape_vec((rows, cols).f(), data)
            .map_err(|e| Error::DimensionMismatch(e.to_string())),
    }
}

/// Rebuilds a host index matrix from a native column-major buffer.
pub fn index_from_native(
    data: Vec<u64>,
    rows: usize,
    cols: usize,
    layout: MatrixLayout,
) -> Result<Array2<u64>> {
    match layout {
        MatrixLayout::PointsAreRows => Array2::from_shape_vec((cols, rows), data)
            .map_err(|e| Error::DimensionMismatch(e.to_string())),
        MatrixLayout::PointsAreColumns => Array2::from_shape_vec((rows, cols).f(), data)
            .map_err(|e| Error::DimensionMismatch(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn points_are_rows_is_a_straight_copy() {
        let host = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let (data, rows, cols) = dense_to_native(host.view(), MatrixLayout::PointsAreRows);
        // 3 points in 2 dimensions: native is 2x3 column-major.
        assert_eq!((rows, cols), (2, 3));
        assert_eq!(data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn points_are_columns_transposes() {
        let host = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let (data, rows, cols) = dense_to_native(host.view(), MatrixLayout::PointsAreColumns);
        assert_eq!((rows, cols), (2, 3));
        // Column-major: first column is the first point (1, 4).
        assert_eq!(data, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn round_trip_preserves_the_host_matrix() {
        let host = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        for layout in [MatrixLayout::PointsAreRows, MatrixLayout::PointsAreColumns] {
            let (data, rows, cols) = dense_to_native(host.view(), layout);
            let back = dense_from_native(data, rows, cols, layout).unwrap();
            assert_eq!(back, host);
        }
    }

    #[test]
    fn index_matrices_round_trip() {
        let host = array![[1u64, 2], [3, 4]];
        let (data, rows, cols) = index_to_native(host.view(), MatrixLayout::PointsAreRows);
        let back = index_from_native(data, rows, cols, MatrixLayout::PointsAreRows).unwrap();
        assert_eq!(back, host);
    }

    #[test]
    fn non_contiguous_views_marshal_by_logical_order() {
        let host = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let sliced = host.slice(ndarray::s![.., ..2]);
        let (data, rows, cols) = dense_to_native(sliced, MatrixLayout::PointsAreRows);
        assert_eq!((rows, cols), (2, 2));
        assert_eq!(data, vec![1.0, 2.0, 4.0, 5.0]);
    }
}
