use std::path::Path;
use std::time::{Duration, SystemTime};

/// Drop sub-second precision so ages compare the way they are logged.
pub fn truncate_to_secs(duration: Duration) -> Duration {
    Duration::from_secs(duration.as_secs())
}

/// Time since `path` was last modified, truncated to whole seconds.
///
/// Returns `None` when the file is missing or its metadata cannot be read.
/// A modification time in the future counts as age zero.
pub fn file_age(path: &Path) -> Option<Duration> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(age_at(modified, SystemTime::now()))
}

fn age_at(modified: SystemTime, now: SystemTime) -> Duration {
    truncate_to_secs(now.duration_since(modified).unwrap_or_default())
}

/// Whether a copy of the given age is still usable under `max_age`.
///
/// A zero `max_age` never reports fresh.
pub fn is_fresh(age: Duration, max_age: Duration) -> bool { age < max_age }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_subsecond_part() {
        assert_eq!(
            truncate_to_secs(Duration::from_millis(2_999)),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn future_mtime_is_zero_age() {
        let now = SystemTime::now();
        let later = now + Duration::from_secs(60);
        assert_eq!(age_at(later, now), Duration::ZERO);
    }

    #[test]
    fn age_from_past_mtime() {
        let now = SystemTime::now();
        let earlier = now - Duration::from_millis(90_500);
        assert_eq!(age_at(earlier, now), Duration::from_secs(90));
    }

    #[test]
    fn freshness_threshold_is_exclusive() {
        let hour = Duration::from_secs(3600);
        assert!(is_fresh(Duration::from_secs(3599), hour));
        assert!(!is_fresh(hour, hour));
        assert!(!is_fresh(Duration::ZERO, Duration::ZERO));
    }

    #[test]
    fn missing_file_has_no_age() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(file_age(&dir.path().join("absent")), None);
    }

    #[test]
    fn new_file_is_young() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f");
        std::fs::write(&path, b"x").unwrap();
        let age = file_age(&path).unwrap();
        assert!(age < Duration::from_secs(5));
    }
}
