#[macro_export]
macro_rules! ok_or_continue {
    ( $e:expr ) => {
        match $e {
            Ok(value) => value,
            Err(e) => {
                log::debug!("Skipping: {}", e);
                continue;
            }
        }
    };
}

/// Fixed-size row-major grid. Out-of-range reads return `None` and out-of-range writes are
/// dropped, which is what clipped drawing wants.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Array2d<T: Default + Copy> {
    width: usize,
    height: usize,
    vec: Vec<T>,
}

impl<T: Default + Copy> Array2d<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, vec: vec![T::default(); width * height] }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.vec[y * self.width + x])
    }

    /// Returns whether the write landed inside the grid
    pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.vec[y * self.width + x] = value;
        true
    }
}
