use crate::manifest::Manifest;

const BYTE_UNITS: [&str; 4] = ["b", "kb", "mb", "gb"];

/// 單一輸出版本相對來源檔的大小變化
#[derive(Debug, Clone, PartialEq)]
pub struct RenditionSavings {
    pub mime_type: String,
    pub byte_size: u64,
    /// 相對來源縮減的百分比，輸出較大時為負值
    pub reduction_percent: f64,
}

#[must_use]
pub fn rendition_savings(manifest: &Manifest) -> Vec<RenditionSavings> {
    manifest
        .sources
        .iter()
        .map(|rendition| {
            let reduction_percent = if manifest.size == 0 {
                0.0
            } else {
                (1.0 - rendition.byte_size as f64 / manifest.size as f64) * 100.0
            };
            RenditionSavings {
                mime_type: rendition.mime_type.clone(),
                byte_size: rendition.byte_size,
                reduction_percent,
            }
        })
        .collect()
}

/// 來源大小減去各版本平均大小，輸出較大時為 0
#[must_use]
pub fn bytes_saved(manifest: &Manifest) -> u64 {
    let count = manifest.sources.len() as u64;
    if count == 0 {
        return 0;
    }
    let average = manifest.sources.iter().map(|r| r.byte_size).sum::<u64>() / count;
    manifest.size.saturating_sub(average)
}

#[must_use]
pub fn total_bytes_saved(manifests: &[Manifest]) -> u64 {
    manifests.iter().map(bytes_saved).sum()
}

/// 以 1024 進位、不帶小數顯示
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.0}{}", BYTE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Rendition, ThumbnailStrip};

    fn manifest_with(size: u64, renditions: &[u64]) -> Manifest {
        Manifest {
            id: "clip".to_string(),
            hash: "ff".repeat(32),
            sources: renditions
                .iter()
                .map(|&byte_size| Rendition {
                    path: "/clip.ffffffff.mp4".to_string(),
                    mime_type: "video/mp4".to_string(),
                    byte_size,
                })
                .collect(),
            poster: "/clip_poster.ffffffff.jpg".to_string(),
            thumbnails: ThumbnailStrip {
                path: "/clip_strip.ffffffff.webp".to_string(),
                interval_count: 30,
                width: 5340,
                height: 100,
            },
            width: 1920,
            height: 1080,
            duration: 10.0,
            size,
            fps: 25.0,
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0b");
        assert_eq!(format_bytes(1023), "1023b");
        assert_eq!(format_bytes(1024), "1kb");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5mb");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024 * 1024), "3072gb");
    }

    #[test]
    fn test_bytes_saved_uses_average_rendition() {
        let manifest = manifest_with(1000, &[200, 400]);
        assert_eq!(bytes_saved(&manifest), 700);

        let grown = manifest_with(100, &[200]);
        assert_eq!(bytes_saved(&grown), 0);

        assert_eq!(total_bytes_saved(&[manifest, grown]), 700);
    }

    #[test]
    fn test_rendition_savings_percent() {
        let savings = rendition_savings(&manifest_with(1000, &[250, 1500]));
        assert!((savings[0].reduction_percent - 75.0).abs() < 1e-9);
        assert!((savings[1].reduction_percent + 50.0).abs() < 1e-9);
    }
}
