//! Deterministic image normalization ahead of OCR.
//!
//! Scanned disclosures arrive as small, noisy photographs of printed tables.
//! The normalization chain (2x upscale, luminance, Gaussian blur, Otsu
//! binarization) is a pure function over the input bytes: same bytes in,
//! same PNG bytes out.

use crate::utils::error::Result;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, GrayImage, ImageFormat, Luma};
use std::io::Cursor;

/// Magnification factor; small glyph sizes are the dominant recognition
/// failure on these scans.
const SCALE: u32 = 2;
const BLUR_SIGMA: f32 = 1.0;

pub fn normalize(raw: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(raw)?;
    let (w, h) = decoded.dimensions();

    let upscaled = decoded.resize_exact(w * SCALE, h * SCALE, FilterType::CatmullRom);
    let gray = upscaled.to_luma8();
    let blurred = imageops::blur(&gray, BLUR_SIGMA);
    let binary = binarize(&blurred);

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(binary).write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Global two-level thresholding at the Otsu optimum.
fn binarize(gray: &GrayImage) -> GrayImage {
    let mut histogram = [0u32; 256];
    for Luma([v]) in gray.pixels() {
        histogram[*v as usize] += 1;
    }

    let threshold = otsu_threshold(&histogram);
    let mut out = gray.clone();
    for Luma([v]) in out.pixels_mut() {
        *v = if *v > threshold { 255 } else { 0 };
    }
    out
}

/// Threshold maximizing between-class variance over the global histogram.
fn otsu_threshold(histogram: &[u32; 256]) -> u8 {
    let total: u64 = histogram.iter().map(|&c| c as u64).sum();
    if total == 0 {
        return 0;
    }

    let weighted_sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(v, &c)| v as u64 * c as u64)
        .sum();

    let mut best_threshold = 0u8;
    let mut best_variance = 0.0f64;
    let mut background_count = 0u64;
    let mut background_sum = 0u64;

    for v in 0..256usize {
        background_count += histogram[v] as u64;
        if background_count == 0 {
            continue;
        }
        let foreground_count = total - background_count;
        if foreground_count == 0 {
            break;
        }

        background_sum += v as u64 * histogram[v] as u64;
        let mean_bg = background_sum as f64 / background_count as f64;
        let mean_fg = (weighted_sum - background_sum) as f64 / foreground_count as f64;

        let variance = background_count as f64 * foreground_count as f64 * (mean_bg - mean_fg).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_threshold = v as u8;
        }
    }

    best_threshold
}
