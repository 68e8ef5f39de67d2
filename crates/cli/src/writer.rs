//! Materializing a manifest on disk, or diffing it against what is there.

use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use strapi_ts_core::{Manifest, OutputUnit};
use tracing::debug;

const EXTENSION: &str = "ts";

/// File path of a unit below the output root.
pub fn unit_file(out: &Path, unit: &OutputUnit) -> PathBuf {
    let mut path = out.to_path_buf();
    let mut segments = unit.path.split('/').filter(|s| !s.is_empty()).peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            path.push(segment);
        } else {
            path.push(format!("{segment}.{EXTENSION}"));
        }
    }
    path
}

/// Write the index and every unit. The first failure aborts; files already
/// written stay in place.
pub fn write_manifest(out: &Path, manifest: &Manifest) -> Result<(), String> {
    fs::create_dir_all(out)
        .map_err(|err| format!("Failed to create output folder {}: {err}", out.display()))?;

    for unit in manifest.all_units() {
        let path = unit_file(out, unit);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("Failed to create folder {}: {err}", parent.display()))?;
        }
        fs::write(&path, &unit.content)
            .map_err(|err| format!("Failed to write {}: {err}", path.display()))?;
        debug!("Wrote {}", path.display());
    }
    Ok(())
}

/// Whether the `--check` report carries ANSI colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// No escape codes
    Plain,
    /// Bold headers, red removals, green additions
    Ansi,
}

const BOLD: &str = "1";
const RED: &str = "31";
const GREEN: &str = "32";
const CYAN: &str = "36";

const CONTEXT_LINES: usize = 3;

impl Style {
    /// Colours only when stdout is a terminal.
    pub fn for_stdout() -> Self {
        if io::stdout().is_terminal() {
            Self::Ansi
        } else {
            Self::Plain
        }
    }

    fn paint(self, code: &str, text: &str) -> String {
        match self {
            Self::Plain => text.to_string(),
            Self::Ansi => format!("\x1b[{code}m{text}\x1b[0m"),
        }
    }
}

/// A generated file that is missing or differs from the one on disk.
#[derive(Debug)]
pub struct FileChange {
    /// Path relative to the output root
    pub rel_path: String,
    /// What the generator would write
    pub new_content: String,
    /// Existing content (None if file doesn't exist)
    pub existing_content: Option<String>,
}

impl FileChange {
    /// One `--check` entry: a status line, then for an existing file the
    /// unified diff from disk to the generated content.
    pub fn report(&self, style: Style) -> String {
        let Some(existing) = self.existing_content.as_deref() else {
            return format!("{}\n", style.paint(BOLD, &format!("missing: {}", self.rel_path)));
        };

        let mut output = format!("{}\n", style.paint(BOLD, &format!("stale: {}", self.rel_path)));
        let diff = TextDiff::from_lines(existing, self.new_content.as_str());
        let mut unified = diff.unified_diff();
        unified.context_radius(CONTEXT_LINES);
        for hunk in unified.iter_hunks() {
            output.push_str(&style.paint(CYAN, &hunk.header().to_string()));
            output.push('\n');
            for change in hunk.iter_changes() {
                let line = change.value().trim_end_matches('\n');
                let painted = match change.tag() {
                    ChangeTag::Delete => style.paint(RED, &format!("-{line}")),
                    ChangeTag::Insert => style.paint(GREEN, &format!("+{line}")),
                    ChangeTag::Equal => format!(" {line}"),
                };
                output.push_str(&painted);
                output.push('\n');
            }
        }
        output
    }
}

/// Units whose file is missing or differs, sorted by path.
pub fn pending_changes(out: &Path, manifest: &Manifest) -> Result<Vec<FileChange>, String> {
    let mut changes = Vec::new();
    for unit in manifest.all_units() {
        let path = unit_file(out, unit);
        let existing_content = match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(format!("Failed to read {}: {err}", path.display())),
        };
        if existing_content.as_deref() == Some(unit.content.as_str()) {
            continue;
        }
        changes.push(FileChange {
            rel_path: format!("{}.{EXTENSION}", unit.path),
            new_content: unit.content.clone(),
            existing_content,
        });
    }
    changes.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    Ok(changes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn manifest() -> Manifest {
        let units = vec![
            OutputUnit {
                path: "article".into(),
                content: "export interface Article {\n}\n".into(),
            },
            OutputUnit {
                path: "layout/hero".into(),
                content: "export interface LayoutHero {\n}\n".into(),
            },
        ];
        Manifest {
            index: strapi_ts_core::render_index(&units),
            units,
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_unit_file() {
        let unit = OutputUnit {
            path: "layout/hero.v2".into(),
            content: String::new(),
        };
        assert_eq!(
            unit_file(Path::new("out"), &unit),
            Path::new("out").join("layout").join("hero.v2.ts")
        );
    }

    #[test]
    fn test_write_then_check_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("types");
        let manifest = manifest();

        assert_eq!(pending_changes(&out, &manifest).unwrap().len(), 3);
        write_manifest(&out, &manifest).unwrap();
        assert_eq!(
            fs::read_to_string(out.join("layout/hero.ts")).unwrap(),
            "export interface LayoutHero {\n}\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("index.ts")).unwrap(),
            "export * from './article';\nexport * from './layout/hero';\n"
        );
        assert!(pending_changes(&out, &manifest).unwrap().is_empty());
    }

    #[test]
    fn test_modified_file_produces_diff() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = manifest();
        write_manifest(dir.path(), &manifest).unwrap();
        fs::write(dir.path().join("article.ts"), "export interface Old {\n}\n").unwrap();

        let changes = pending_changes(dir.path(), &manifest).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].rel_path, "article.ts");
        assert!(changes[0].existing_content.is_some());

        let report = changes[0].report(Style::Plain);
        assert!(report.starts_with("stale: article.ts\n@@ -1,2 +1,2 @@\n"));
        assert!(report.ends_with("-export interface Old {\n+export interface Article {\n }\n"));
        assert!(!report.contains('\x1b'));

        let report = changes[0].report(Style::Ansi);
        assert!(report.starts_with("\x1b[1mstale: article.ts\x1b[0m\n"));
        assert!(report.contains("\x1b[31m-export interface Old {\x1b[0m\n"));
        assert!(report.contains("\x1b[32m+export interface Article {\x1b[0m\n"));
    }

    #[test]
    fn test_missing_file_report() {
        let dir = tempfile::tempdir().unwrap();
        let changes = pending_changes(dir.path(), &manifest()).unwrap();
        let reports: Vec<String> = changes.iter().map(|c| c.report(Style::Plain)).collect();
        assert_eq!(
            reports,
            vec!["missing: article.ts\n", "missing: index.ts\n", "missing: layout/hero.ts\n"]
        );
    }
}
