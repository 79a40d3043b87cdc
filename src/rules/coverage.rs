//! Test coverage checks: test presence and test file mirroring.

use std::collections::HashSet;

use crate::pr::FileChangeSet;
use crate::rules::Finding;

/// Path prefix that marks a file as a test.
pub const TESTS_DIR: &str = "tests/";

/// Python package marker files, exempt from mirroring.
const INIT_FILE: &str = "__init__.py";

/// Warn when code changes arrive without any change under `tests/`.
///
/// Every touched path outside `tests/` counts as a code change,
/// whatever its extension.
pub fn check_test_presence(files: &FileChangeSet) -> Vec<Finding> {
    let test_changes = files.all_paths().filter(|p| p.starts_with(TESTS_DIR)).count();
    let code_changes = files.all_paths().filter(|p| !p.starts_with(TESTS_DIR)).count();

    if code_changes > 0 && test_changes == 0 {
        vec![Finding::warning(format!(
            "This PR modifies code ({} file(s)) but does not include any changes in the **tests/** folder.\n\n\
             Please consider adding or updating tests to cover your changes.",
            code_changes
        ))]
    } else {
        vec![]
    }
}

/// Every Python source file created by the PR must come with a test
/// file created in the same PR, mirroring its path under `tests/` with
/// a `test_` prefix.
///
/// Only created files are considered, on both sides. `__init__.py`
/// files are exempt.
pub fn check_test_mirroring(files: &FileChangeSet) -> Vec<Finding> {
    let added_tests: HashSet<&str> = files
        .created
        .iter()
        .map(String::as_str)
        .filter(|p| p.starts_with(TESTS_DIR) && p.ends_with(".py") && !is_init(p))
        .collect();

    let added_code = files
        .created
        .iter()
        .map(String::as_str)
        .filter(|p| p.ends_with(".py") && !p.starts_with(TESTS_DIR) && !is_init(p));

    let mismatches: Vec<(String, String)> = added_code
        .filter_map(|code_path| {
            let expected = expected_test_path(code_path);
            if added_tests.contains(expected.as_str()) {
                None
            } else {
                Some((code_path.to_string(), expected))
            }
        })
        .collect();

    if mismatches.is_empty() {
        return vec![];
    }

    let mut table = vec![
        "| Added source file | Expected test (added in this PR) |".to_string(),
        "|---|---|".to_string(),
    ];
    table.extend(
        mismatches
            .iter()
            .map(|(code, expected)| format!("| `{}` | `{}` |", code, expected)),
    );

    vec![
        Finding::warning(
            "Some newly added source files do not have corresponding tests in the `tests/` folder \
             with matching structure and the `test_` prefix.",
        ),
        Finding::info(format!(
            "### Tests mirroring check (created files only)\n{}",
            table.join("\n")
        )),
    ]
}

fn is_init(path: &str) -> bool {
    path.ends_with(INIT_FILE)
}

/// Mirror a source path into the expected test path.
///
/// The first path component is treated as the source root and dropped:
/// `src/pkg/util.py` maps to `tests/pkg/test_util.py`, and a root-level
/// `app.py` maps to `tests/test_app.py`.
fn expected_test_path(code_path: &str) -> String {
    let parts: Vec<&str> = code_path.split('/').collect();
    let file_name = parts.last().copied().unwrap_or(code_path);

    let subdirs = if parts.len() >= 2 {
        parts[1..parts.len() - 1].join("/")
    } else {
        String::new()
    };

    if subdirs.is_empty() {
        format!("{}test_{}", TESTS_DIR, file_name)
    } else {
        format!("{}{}/test_{}", TESTS_DIR, subdirs, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changes(created: &[&str], modified: &[&str], deleted: &[&str]) -> FileChangeSet {
        FileChangeSet::new(
            created.iter().map(|s| s.to_string()).collect(),
            modified.iter().map(|s| s.to_string()).collect(),
            deleted.iter().map(|s| s.to_string()).collect(),
        )
    }

    // ------------------------------------------------------------------
    // Test presence
    // ------------------------------------------------------------------

    #[test]
    fn test_code_without_tests_warns() {
        let files = changes(&[], &["src/logic.py", "src/io.py"], &[]);
        let findings = check_test_presence(&files);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_warning());
        assert!(findings[0].text().contains("(2 file(s))"));
    }

    #[test]
    fn test_code_with_tests_is_silent() {
        let files = changes(&[], &["src/logic.py", "tests/test_logic.py"], &[]);
        assert!(check_test_presence(&files).is_empty());
    }

    #[test]
    fn test_presence_counts_all_change_kinds() {
        // A deleted code file with only a created test still passes.
        let files = changes(&["tests/test_new.py"], &[], &["src/old.py"]);
        assert!(check_test_presence(&files).is_empty());
    }

    #[test]
    fn test_tests_only_pr_is_silent() {
        let files = changes(&[], &["tests/test_logic.py"], &[]);
        assert!(check_test_presence(&files).is_empty());
    }

    #[test]
    fn test_empty_pr_is_silent() {
        assert!(check_test_presence(&FileChangeSet::default()).is_empty());
    }

    #[test]
    fn test_non_python_files_count_as_code() {
        let files = changes(&[], &["README.md"], &[]);
        let findings = check_test_presence(&files);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].text().contains("(1 file(s))"));
    }

    #[test]
    fn test_nested_tests_dir_does_not_count() {
        // Only a top-level tests/ prefix counts as test changes.
        let files = changes(&[], &["pkg/tests/test_logic.py"], &[]);
        assert_eq!(check_test_presence(&files).len(), 1);
    }

    // ------------------------------------------------------------------
    // Test mirroring
    // ------------------------------------------------------------------

    #[test]
    fn test_expected_path_drops_source_root() {
        assert_eq!(expected_test_path("src/util.py"), "tests/test_util.py");
        assert_eq!(
            expected_test_path("src/pkg/util.py"),
            "tests/pkg/test_util.py"
        );
        assert_eq!(
            expected_test_path("src/pkg/sub/deep.py"),
            "tests/pkg/sub/test_deep.py"
        );
    }

    #[test]
    fn test_expected_path_for_root_level_file() {
        assert_eq!(expected_test_path("app.py"), "tests/test_app.py");
    }

    #[test]
    fn test_mirrored_file_is_silent() {
        let files = changes(&["src/util.py", "tests/test_util.py"], &[], &[]);
        assert!(check_test_mirroring(&files).is_empty());
    }

    #[test]
    fn test_missing_mirror_warns_with_table() {
        let files = changes(&["src/pkg/util.py"], &[], &[]);
        let findings = check_test_mirroring(&files);

        assert_eq!(findings.len(), 2);
        assert!(findings[0].is_warning());
        assert!(findings[0].text().contains("matching structure"));

        let table = findings[1].text();
        assert!(table.starts_with("### Tests mirroring check (created files only)"));
        assert!(table.contains("| Added source file | Expected test (added in this PR) |"));
        assert!(table.contains("| `src/pkg/util.py` | `tests/pkg/test_util.py` |"));
    }

    #[test]
    fn test_modified_files_are_ignored() {
        // Mirroring looks at created files only.
        let files = changes(&[], &["src/util.py"], &[]);
        assert!(check_test_mirroring(&files).is_empty());
    }

    #[test]
    fn test_pre_existing_test_does_not_satisfy_mirroring() {
        // The matching test must be created in this PR, not merely touched.
        let files = changes(&["src/util.py"], &["tests/test_util.py"], &[]);
        let findings = check_test_mirroring(&files);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_init_files_are_exempt() {
        let files = changes(&["src/pkg/__init__.py"], &[], &[]);
        assert!(check_test_mirroring(&files).is_empty());
    }

    #[test]
    fn test_init_test_file_cannot_satisfy_a_mirror() {
        let files = changes(&["src/pkg/x.py", "tests/pkg/__init__.py"], &[], &[]);
        let findings = check_test_mirroring(&files);
        assert!(!findings.is_empty());
    }

    #[test]
    fn test_non_python_created_files_are_ignored() {
        let files = changes(&["assets/logo.svg", "Makefile"], &[], &[]);
        assert!(check_test_mirroring(&files).is_empty());
    }

    #[test]
    fn test_multiple_mismatches_all_listed() {
        let files = changes(&["src/a.py", "src/pkg/b.py", "src/c.py", "tests/test_c.py"], &[], &[]);
        let findings = check_test_mirroring(&files);
        assert_eq!(findings.len(), 2);

        let table = findings[1].text();
        assert!(table.contains("| `src/a.py` | `tests/test_a.py` |"));
        assert!(table.contains("| `src/pkg/b.py` | `tests/pkg/test_b.py` |"));
        assert!(!table.contains("`src/c.py`"));
    }
}
