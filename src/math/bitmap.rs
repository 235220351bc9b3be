// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f };

use std::ops;
use std::vec::Vec;

/// Row-major buffer of linear RGB radiance, one `Vector3f` per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    data: Vec<Vector3f>,
    height: usize,
    width: usize
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = Vector3f;

    fn index(&self, index: (usize, usize)) -> &Vector3f {
        assert!(index.0 < self.width && index.1 < self.height);
        &self.data[index.0 + self.width * index.1]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Vector3f {
        assert!(index.0 < self.width && index.1 < self.height);
        &mut self.data[index.0 + self.width * index.1]
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_number = width * height;
        Self { data: vec!(Vector3f::new(0.0, 0.0, 0.0);
                          pixel_number),
               width: width,
               height: height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Vector3f] {
        &self.data
    }

    pub fn row(&self, y: usize) -> &[Vector3f] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Copies a finished scanline into row `y`.
    pub fn set_row(&mut self, y: usize, row: &[Vector3f]) {
        assert_eq!(row.len(), self.width);
        let start = y * self.width;
        self.data[start..start + self.width].copy_from_slice(row);
    }

    pub fn raw_copy(&self) -> Vec<(Float, Float, Float)> {
        self.data.iter().map(|c| (c.x, c.y, c.z)).collect()
    }
}

/* Test for Bitmap */
#[cfg(test)]
mod tests {
    use super::Bitmap;
    use super::{ Vector3f };

    #[test]
    fn test_bitmap_basic_functions() {
        let mut bitmap = Bitmap::new(256usize, 128usize);
        assert_eq!(bitmap.width(), 256);
        assert_eq!(bitmap.height(), 128);
        assert!(bitmap.pixels().iter().all(|p| *p == Vector3f::zeros()));

        bitmap[(5, 6)] = Vector3f::new(1.0, 0.5, 0.6);
        assert_eq!(bitmap[(5, 6)], Vector3f::new(1.0, 0.5, 0.6));
        assert_eq!(bitmap[(2, 6)], Vector3f::zeros());
    }

    #[test]
    fn test_bitmap_rows() {
        let mut bitmap = Bitmap::new(3, 2);
        let row = [Vector3f::new(1.0, 0.0, 0.0),
                   Vector3f::new(0.0, 1.0, 0.0),
                   Vector3f::new(0.0, 0.0, 1.0)];
        bitmap.set_row(1, &row);
        assert_eq!(bitmap.row(1), &row[..]);
        assert_eq!(bitmap[(1, 1)], Vector3f::new(0.0, 1.0, 0.0));
        assert_eq!(bitmap.row(0), &[Vector3f::zeros(); 3][..]);
        assert_eq!(bitmap.raw_copy()[5], (0.0, 0.0, 1.0));
    }
}
