//! Fixed-capacity integer buffer with bounds-checked access.
//!
//! Every read and write goes through [`IntBuffer::slot`] or
//! [`IntBuffer::slot_mut`]; nothing indexes the backing slice directly.

use super::StoreError;
use crate::logging::{trace, warn};

/// An owned run of `i32` cells whose length is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntBuffer {
    cells: Box<[i32]>,
    ready: bool,
}

impl IntBuffer {
    /// Allocate `capacity` zeroed cells. The buffer is ready once filled.
    pub fn zeroed(capacity: usize) -> Self {
        let cells = vec![0; capacity].into_boxed_slice();
        Self { cells, ready: true }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Read the cell at `index`.
    pub fn read(&self, index: i64) -> Result<i32, StoreError> {
        self.slot(index).copied()
    }

    /// Overwrite the cell at `index` with `value`.
    pub fn write(&mut self, index: i64, value: i32) -> Result<(), StoreError> {
        *self.slot_mut(index)? = value;
        trace!(index, value, "buffer write");
        Ok(())
    }

    /// Sum of the cells in `start..end`, accumulated as `i64`.
    pub fn sum(&self, start: i64, end: i64) -> Result<i64, StoreError> {
        Ok(self.range(start, end)?.iter().map(|&v| i64::from(v)).sum())
    }

    /// Replace the last cell with the sum of all cells. See [`process_data`].
    pub fn fold_into_last(&mut self) -> Result<i64, StoreError> {
        if !self.ready {
            warn!("fold requested on a buffer that never finished initializing");
            return Err(StoreError::NotReady);
        }
        process_data(&mut self.cells)
    }

    /// Copy of the current contents.
    pub fn to_vec(&self) -> Vec<i32> {
        self.cells.to_vec()
    }

    fn slot(&self, index: i64) -> Result<&i32, StoreError> {
        let capacity = self.cells.len();
        usize::try_from(index)
            .ok()
            .and_then(|i| self.cells.get(i))
            .ok_or(StoreError::IndexOutOfRange { index, capacity })
    }

    fn slot_mut(&mut self, index: i64) -> Result<&mut i32, StoreError> {
        let capacity = self.cells.len();
        usize::try_from(index)
            .ok()
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(StoreError::IndexOutOfRange { index, capacity })
    }

    fn range(&self, start: i64, end: i64) -> Result<&[i32], StoreError> {
        if !self.ready {
            warn!("sum requested on a buffer that never finished initializing");
            return Err(StoreError::NotReady);
        }
        if start < 0 || start > end {
            return Err(StoreError::InvalidRange { start, end });
        }
        let capacity = self.cells.len();
        let overflow = StoreError::RangeOverflow { end, capacity };
        // start and end are non-negative here
        let (lo, hi) = match (usize::try_from(start), usize::try_from(end)) {
            (Ok(lo), Ok(hi)) => (lo, hi),
            _ => return Err(overflow),
        };
        self.cells.get(lo..hi).ok_or(overflow)
    }
}

/// Sum every element of `data` and store the sum in its last element.
///
/// Returns the full sum. The value written back saturates to the `i32`
/// range. An empty slice has no last element and is rejected.
pub fn process_data(data: &mut [i32]) -> Result<i64, StoreError> {
    let sum: i64 = data.iter().map(|&v| i64::from(v)).sum();
    let last = data
        .last_mut()
        .ok_or_else(|| StoreError::InvalidArgument("empty data".to_string()))?;
    *last = i32::try_from(sum).unwrap_or(if sum < 0 { i32::MIN } else { i32::MAX });
    Ok(sum)
}
