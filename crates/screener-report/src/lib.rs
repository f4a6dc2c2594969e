//! screener-report: Rendering of interview reports and résumé rankings.
//!
//! `html` produces self-contained pages, `markdown` produces text suitable
//! for pasting into a ticket or pull request.

pub mod html;
pub mod markdown;

#[cfg(test)]
mod fixtures;

use std::path::Path;

use anyhow::{Context, Result};

/// Format whole seconds as `MM:SS`, or `H:MM:SS` past the hour.
pub fn format_clock(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Format a score with one decimal place.
pub fn format_points(points: f64) -> String {
    format!("{points:.1}")
}

/// Write rendered output, creating parent directories.
pub fn write_output(contents: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(1200), "20:00");
        assert_eq!(format_clock(3725), "1:02:05");
    }

    #[test]
    fn points_formatting() {
        assert_eq!(format_points(7.5), "7.5");
        assert_eq!(format_points(10.0), "10.0");
    }

    #[test]
    fn write_output_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.md");
        write_output("# hi", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# hi");
    }
}
