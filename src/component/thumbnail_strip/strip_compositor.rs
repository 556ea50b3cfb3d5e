use crate::config::{StripFormat, StripSettings};
use crate::error::{PipelineError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};
use log::debug;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// 每格寬度：`round(row_height * aspect_ratio)`，至少 1
#[must_use]
pub fn frame_width(row_height: u32, aspect_ratio: f64) -> u32 {
    let width = (f64::from(row_height) * aspect_ratio).round();
    if width.is_finite() && width >= 1.0 {
        width as u32
    } else {
        1
    }
}

/// 縮圖條最終尺寸
#[must_use]
pub const fn strip_size(frame_width: u32, row_height: u32, count: u32) -> (u32, u32) {
    (frame_width * count, row_height)
}

/// 平行縮放所有畫格到同一尺寸，回傳順序與輸入相同
pub fn resize_frames(frames: &[PathBuf], width: u32, height: u32) -> Result<Vec<RgbImage>> {
    frames
        .par_iter()
        .map(|path| {
            let img = image::open(path)
                .map_err(|e| PipelineError::encode("resize_frame", path, e.to_string()))?;
            Ok(img.resize_exact(width, height, FilterType::Triangle).to_rgb8())
        })
        .collect()
}

/// 由左至右排列，第 i 格位於 `x = i * frame_width, y = 0`
#[must_use]
pub fn compose_strip(frames: &[RgbImage], frame_width: u32, row_height: u32) -> RgbImage {
    let count = u32::try_from(frames.len()).unwrap_or(u32::MAX);
    let (width, height) = strip_size(frame_width, row_height, count);
    let mut canvas = RgbImage::new(width, height);

    for (index, frame) in (0u32..).zip(frames) {
        imageops::replace(&mut canvas, frame, i64::from(index * frame_width), 0);
    }

    debug!("縮圖條 {width}x{height}，共 {count} 格");
    canvas
}

/// 依設定的格式寫出縮圖條
///
/// 先編碼到同目錄的暫存檔再 rename，失敗時不留下不完整的檔案。
pub fn write_strip(canvas: &RgbImage, path: &Path, settings: &StripSettings) -> Result<()> {
    let file_name = path
        .file_name()
        .map_or_else(|| "strip".to_string(), |n| n.to_string_lossy().to_string());
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    let written = encode_strip(canvas, &temp_path, settings)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| PipelineError::io(path, e)));
    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

fn encode_strip(canvas: &RgbImage, path: &Path, settings: &StripSettings) -> Result<()> {
    let encode_err = |reason: String| PipelineError::encode("write_strip", path, reason);

    match settings.format {
        StripFormat::Webp => canvas
            .save_with_format(path, ImageFormat::WebP)
            .map_err(|e| encode_err(e.to_string())),
        StripFormat::Jpg => {
            let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
            let mut writer = BufWriter::new(file);
            JpegEncoder::new_with_quality(&mut writer, settings.jpeg_quality)
                .encode_image(canvas)
                .map_err(|e| encode_err(e.to_string()))?;
            writer.flush().map_err(|e| PipelineError::io(path, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    #[test]
    fn test_frame_width_16_9() {
        assert_eq!(frame_width(100, 1920.0 / 1080.0), 178);
        assert_eq!(strip_size(178, 100, 5), (890, 100));
    }

    #[test]
    fn test_frame_width_portrait_and_degenerate() {
        assert_eq!(frame_width(100, 1080.0 / 1920.0), 56);
        assert_eq!(frame_width(100, 0.0), 1);
        assert_eq!(frame_width(100, f64::INFINITY), 1);
    }

    #[test]
    fn test_compose_strip_places_frames_left_to_right() {
        let colors = [Rgb([255, 0, 0]), Rgb([0, 255, 0]), Rgb([0, 0, 255])];
        let frames: Vec<RgbImage> = colors
            .iter()
            .map(|c| RgbImage::from_pixel(4, 2, *c))
            .collect();

        let canvas = compose_strip(&frames, 4, 2);
        assert_eq!(canvas.dimensions(), (12, 2));
        for (i, color) in colors.iter().enumerate() {
            let x = u32::try_from(i).unwrap() * 4;
            assert_eq!(canvas.get_pixel(x, 0), color);
            assert_eq!(canvas.get_pixel(x + 3, 1), color);
        }
    }

    #[test]
    fn test_resize_frames_keeps_input_order() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..6u8)
            .map(|i| {
                let path = dir.path().join(format!("frame_{i:04}.png"));
                RgbImage::from_pixel(32, 18, Rgb([i * 40, 0, 0]))
                    .save(&path)
                    .unwrap();
                path
            })
            .collect();

        let resized = resize_frames(&paths, 16, 9).unwrap();
        assert_eq!(resized.len(), 6);
        for (i, frame) in resized.iter().enumerate() {
            assert_eq!(frame.dimensions(), (16, 9));
            assert_eq!(frame.get_pixel(8, 4)[0], u8::try_from(i).unwrap() * 40);
        }
    }

    #[test]
    fn test_resize_missing_frame_fails() {
        let result = resize_frames(&[PathBuf::from("/nonexistent/frame_0000.jpg")], 16, 9);
        assert!(matches!(result, Err(PipelineError::Encode { .. })));
    }

    #[test]
    fn test_write_strip_formats() {
        let dir = TempDir::new().unwrap();
        let canvas = RgbImage::from_pixel(20, 10, Rgb([10, 20, 30]));

        let webp = dir.path().join("strip.webp");
        write_strip(&canvas, &webp, &StripSettings::default()).unwrap();
        assert_eq!(image::open(&webp).unwrap().width(), 20);

        let jpg = dir.path().join("strip.jpg");
        let settings = StripSettings {
            format: StripFormat::Jpg,
            ..StripSettings::default()
        };
        write_strip(&canvas, &jpg, &settings).unwrap();
        assert_eq!(image::open(&jpg).unwrap().height(), 10);

        assert!(!dir.path().join(".strip.webp.tmp").exists());
        assert!(!dir.path().join(".strip.jpg.tmp").exists());
    }

    #[test]
    fn test_failed_encode_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        // JPEG 寬度上限為 65535
        let canvas = RgbImage::new(70_000, 1);
        let settings = StripSettings {
            format: StripFormat::Jpg,
            ..StripSettings::default()
        };
        let path = dir.path().join("strip.jpg");

        let result = write_strip(&canvas, &path, &settings);

        assert!(matches!(result, Err(PipelineError::Encode { .. })));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_strip_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("strip.webp");
        fs::write(&path, b"stale").unwrap();

        write_strip(&RgbImage::new(8, 4), &path, &StripSettings::default()).unwrap();
        assert_eq!(image::open(&path).unwrap().width(), 8);
    }
}
