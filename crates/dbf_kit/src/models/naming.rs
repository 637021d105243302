use std::path::{Path, PathBuf};

/// Find a non-colliding output path in `dir`.
///
/// Tries `stem.ext` first, then `stem_1.ext`, `stem_2.ext`, and so on
/// until a name does not exist. Check-then-name: two callers racing for
/// the same name can still collide, so this is single-caller only; a
/// concurrent variant would need an `OpenOptions::create_new` loop.
pub fn unique_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{stem}.{extension}"));
    let mut counter = 1u64;
    while candidate.exists() {
        candidate = dir.join(format!("{stem}_{counter}.{extension}"));
        counter += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_free_name_is_used_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = unique_path(dir.path(), "report", "csv");
        assert_eq!(path, dir.path().join("report.csv"));
    }

    #[test]
    fn test_taken_name_gets_counter_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report.csv"), "x").unwrap();

        let path = unique_path(dir.path(), "report", "csv");
        assert_eq!(path, dir.path().join("report_1.csv"));
    }

    #[test]
    fn test_counter_skips_every_taken_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report.csv"), "x").unwrap();
        fs::write(dir.path().join("report_1.csv"), "x").unwrap();

        let path = unique_path(dir.path(), "report", "csv");
        assert_eq!(path, dir.path().join("report_2.csv"));
    }

    #[test]
    fn test_extension_is_not_part_of_the_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report.csv"), "x").unwrap();

        // A taken .csv name does not affect the .xlsx namespace
        let path = unique_path(dir.path(), "report", "xlsx");
        assert_eq!(path, dir.path().join("report.xlsx"));
    }
}
