/// 取樣時間點與影片結尾的最小距離（秒）
pub const SAMPLE_EPSILON: f64 = 0.001;

/// 在 `[0, duration)` 內均勻取 `count` 個時間點
///
/// 第 i 個為 `min(i * duration / count, duration - ε)`，不會落在結尾或之後。
/// 片長很短時相鄰時間點可能解出同一個畫格，這是允許的。
#[must_use]
pub fn sample_timestamps(duration: f64, count: u32) -> Vec<f64> {
    if count == 0 || !duration.is_finite() || duration <= 0.0 {
        return Vec::new();
    }

    let step = duration / f64::from(count);
    let last_allowed = (duration - SAMPLE_EPSILON).max(0.0);

    (0..count)
        .map(|i| (f64::from(i) * step).min(last_allowed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_seconds_five_intervals() {
        let timestamps = sample_timestamps(10.0, 5);
        assert_eq!(timestamps.len(), 5);
        for (t, expected) in timestamps.iter().zip([0.0, 2.0, 4.0, 6.0, 8.0]) {
            assert!((t - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_all_timestamps_inside_duration() {
        for (duration, count) in [(10.0, 30), (2.0, 30), (0.0005, 3), (3600.5, 7)] {
            let timestamps = sample_timestamps(duration, count);
            assert_eq!(timestamps.len(), count as usize);
            for t in &timestamps {
                assert!(*t >= 0.0 && *t < duration, "{t} not in [0, {duration})");
            }
        }
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let timestamps = sample_timestamps(2.0, 30);
        for pair in timestamps.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_edge_cases() {
        assert!(sample_timestamps(0.0, 10).is_empty());
        assert!(sample_timestamps(-1.0, 10).is_empty());
        assert!(sample_timestamps(f64::NAN, 10).is_empty());
        assert!(sample_timestamps(100.0, 0).is_empty());
    }
}
