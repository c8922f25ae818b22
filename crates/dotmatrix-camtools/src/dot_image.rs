//! Dot images
//!
//! A dot image is a row-major grid of single-byte samples. A sample of `0`
//! is a dot to press; any other value is left blank. Images arrive already
//! thresholded, so no tone mapping happens here.

use anyhow::{Context, Result};
use dotmatrix_core::ImageError;
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Monochrome image to print, one sample per dot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl DotImage {
    /// Create an image from row-major samples
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = width
            .checked_mul(height)
            .ok_or(ImageError::DimensionsOverflow { width, height })?;
        if data.len() != expected {
            return Err(ImageError::DataLengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an image from rows of samples
    ///
    /// Every row must have the same length.
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, ImageError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let data: Vec<u8> = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Self::new(width, height, data)
    }

    /// Create an image from an 8-bit luma buffer
    pub fn from_gray(image: &GrayImage) -> Self {
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            data: image.as_raw().clone(),
        }
    }

    /// Create an image from any decoded image, converting it to luma
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::from_gray(&image.to_luma8())
    }

    /// Load an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("Failed to load image file {}", path.display()))?;
        Ok(Self::from_dynamic(&img))
    }

    /// Width in dots
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in dots
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw samples, row-major
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Sample at column `col` of row `row`
    pub fn sample(&self, col: usize, row: usize) -> Option<u8> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    /// Whether the sample at (`col`, `row`) is a dot
    pub fn is_dot(&self, col: usize, row: usize) -> bool {
        self.sample(col, row) == Some(0)
    }

    /// Number of dots in the image
    pub fn dot_count(&self) -> usize {
        self.data.iter().filter(|&&sample| sample == 0).count()
    }
}
