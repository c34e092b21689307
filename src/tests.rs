/*!
 * End-to-end tests: scan, select, assemble and export real directory trees
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::tempdir;

use crate::export::tests::RecordingClipboard;
use crate::export::{ClipboardSink, ExportSink, FileSink};
use crate::exporter::Exporter;
use crate::project::BUILTIN_CATALOG;
use crate::recent::RecentDirectoryStore;
use crate::scanner::Scanner;
use crate::writer::MarkdownWriter;

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}

// Helper function to create a small mixed project
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();

    write_file(&root.join("requirements.txt"), "requests\n")?;
    write_file(&root.join("main.py"), "import app\n")?;
    write_file(&root.join("app").join("__init__.py"), "")?;
    write_file(&root.join("app").join("views.PY"), "def index(): pass\n")?;
    write_file(&root.join("app").join("static").join("site.js"), "let x;\n")?;
    write_file(&root.join(".venv").join("lib").join("six.py"), "# vendored\n")?;
    write_file(&root.join(".hidden.py"), "secret = 1\n")?;
    write_file(&root.join("README"), "docs\n")?;

    Ok(temp_dir)
}

fn scanner(max_files: usize) -> Scanner {
    Scanner::new(max_files, Arc::new(ProgressBar::hidden()))
}

#[test]
fn test_python_scenario() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("a.py"), "x=1")?;
    write_file(&temp_dir.path().join("b.txt"), "not python")?;
    write_file(&temp_dir.path().join(".env"), "KEY=1")?;

    let python = BUILTIN_CATALOG.get(2).unwrap();
    assert_eq!(python.extensions, ["py", "pyw", "pyx", "pyd"]);

    let session = scanner(500).scan(temp_dir.path(), Some(python))?;
    let names: Vec<_> = session.entries().collect();
    assert_eq!(names, [("a.py", true)]);

    let doc = MarkdownWriter::new().assemble(&session, temp_dir.path())?;
    assert_eq!(doc.to_text(), "- a.py\n```py\nx=1\n```\n\n");

    Ok(())
}

#[test]
fn test_scan_results_match_active_type() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    for (index, project_type) in BUILTIN_CATALOG.types().iter().enumerate() {
        let session = scanner(500).scan(temp_dir.path(), BUILTIN_CATALOG.get(index))?;
        for record in session.records() {
            assert!(
                project_type.matches(&record.display_name),
                "{} does not belong to {}",
                record.display_name,
                project_type.name
            );
        }
    }

    Ok(())
}

#[test]
fn test_hidden_entries_never_surface() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let session = scanner(500).scan(temp_dir.path(), None)?;

    for record in session.records() {
        let rel = record.path.strip_prefix(temp_dir.path()).unwrap();
        assert!(
            rel.components()
                .all(|c| !c.as_os_str().to_string_lossy().starts_with('.')),
            "hidden component in {}",
            rel.display()
        );
    }
    assert_eq!(session.len(), 6);

    Ok(())
}

#[test]
fn test_detect_then_scan() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let detected = BUILTIN_CATALOG.detect(temp_dir.path());
    assert_eq!(detected, Some(2));

    let session = scanner(500).scan(temp_dir.path(), detected.and_then(|i| BUILTIN_CATALOG.get(i)))?;
    let paths: Vec<_> = session
        .records()
        .iter()
        .map(|r| r.relative_path(temp_dir.path()))
        .collect();
    assert_eq!(paths, ["main.py", "app/__init__.py", "app/views.PY"]);

    Ok(())
}

#[test]
fn test_cap_holds_for_large_trees() -> io::Result<()> {
    let temp_dir = tempdir()?;
    for dir in 0..5 {
        for file in 0..30 {
            write_file(
                &temp_dir.path().join(format!("d{}", dir)).join(format!("f{}.go", file)),
                "package main\n",
            )?;
        }
    }

    let session = scanner(100).scan(temp_dir.path(), BUILTIN_CATALOG.get(4))?;
    assert_eq!(session.len(), 100);
    assert_eq!(session.dropped, 50);

    Ok(())
}

#[test]
fn test_select_all_and_clear_all_drive_the_document() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut session = scanner(500).scan(temp_dir.path(), BUILTIN_CATALOG.get(2))?;
    let writer = MarkdownWriter::new();

    session.clear_all();
    assert!(writer.assemble(&session, temp_dir.path())?.is_empty());

    session.select_all();
    let doc = writer.assemble(&session, temp_dir.path())?;
    assert_eq!(doc.file_count(), session.len());
    let text = doc.to_text();
    for record in session.records() {
        let header = format!("- {}\n", record.relative_path(temp_dir.path()));
        assert!(text.contains(&header), "missing {}", header);
    }

    Ok(())
}

#[test]
fn test_round_trip_body_matches_file() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let body = "fn main() {\n    println!(\"hi\");\n}";
    write_file(&temp_dir.path().join("src").join("main.rs"), body)?;

    let session = scanner(500).scan(temp_dir.path(), BUILTIN_CATALOG.get(5))?;
    let doc = MarkdownWriter::new().assemble(&session, temp_dir.path())?;
    let text = doc.to_text();

    let open = "- src/main.rs\n```rs\n";
    assert!(text.starts_with(open));
    let inner = &text[open.len()..text.len() - "\n```\n\n".len()];
    assert_eq!(inner, body);

    Ok(())
}

#[test]
fn test_exporter_end_to_end() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config_dir = tempdir()?;
    let store = RecentDirectoryStore::open(config_dir.path().join("codebase-exporter"))?;

    let exporter = Exporter::new(BUILTIN_CATALOG.clone(), scanner(500), Some(store.clone()));
    let detected = exporter.detect(temp_dir.path());
    let mut exporter = exporter.with_project_type(detected);
    exporter.open_folder(temp_dir.path());
    assert_eq!(exporter.status(), "Loaded 3 files. Ready.");
    assert_eq!(store.read(), Some(fs::canonicalize(temp_dir.path())?));

    assert_eq!(exporter.set_included_by_name("app/__init__.py", false), 1);

    let out = temp_dir.path().join("custom-codebase.md");
    let sink = FileSink::new(&out);
    exporter.export(&sink)?;
    assert_eq!(
        fs::read_to_string(&out)?,
        "- main.py\n```py\nimport app\n\n```\n\n- app/views.PY\n```PY\ndef index(): pass\n\n```\n\n"
    );
    assert_eq!(exporter.status(), sink.success_message(2));

    let clip = ClipboardSink::new(RecordingClipboard::default());
    exporter.export(&clip)?;
    assert_eq!(
        clip.clipboard().contents.borrow().as_deref(),
        Some(fs::read_to_string(&out)?.as_str())
    );

    Ok(())
}

#[test]
fn test_rescan_discards_selection() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut exporter = Exporter::new(BUILTIN_CATALOG.clone(), scanner(500), None)
        .with_project_type(Some(2));
    exporter.open_folder(temp_dir.path());
    exporter.clear_all();
    assert_eq!(exporter.session().included_count(), 0);

    write_file(&temp_dir.path().join("new.py"), "y = 2\n")?;
    exporter.rescan();
    assert_eq!(exporter.session().len(), 4);
    assert_eq!(exporter.session().included_count(), 4);

    Ok(())
}
