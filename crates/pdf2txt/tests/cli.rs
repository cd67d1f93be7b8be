//! End-to-end tests driving the `pdf2txt` binary.

use std::path::Path;
use std::process::{Command, Output};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Write a one-page PDF showing `text` to `path`.
fn write_pdf(path: &Path, text: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::from(page_id)],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    doc.save(path).unwrap();
}

fn pdf2txt(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdf2txt"))
        .env_remove("RUST_LOG")
        .arg("--no-progress")
        .args(args)
        .output()
        .expect("failed to run pdf2txt")
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_help() {
    let cases: [&[&str]; 3] = [&["--help"], &["extract", "--help"], &["extract-all", "--help"]];
    for args in cases {
        let out = pdf2txt(args);
        assert!(out.status.success(), "{:?} failed", args);
    }
}

#[test]
fn test_extract_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.pdf");
    write_pdf(&input, "Lorem Ipsum");
    let dest = dir.path().join("extract");

    let out = pdf2txt(&["extract", arg(&input), arg(&dest)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let text = std::fs::read_to_string(dest.join("sample.txt")).unwrap();
    assert!(text.contains("Ipsum"));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Task completed in"));
}

#[test]
fn test_clean_extract_is_quiet_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.pdf");
    write_pdf(&input, "Quiet please");

    let out = pdf2txt(&["extract", arg(&input), arg(dir.path())]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stderr), "");
}

#[test]
fn test_extract_with_file_name_and_quiet() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.pdf");
    write_pdf(&input, "Named output");

    let out = pdf2txt(&[
        "extract",
        arg(&input),
        arg(dir.path()),
        "--file-name",
        "renamed.txt",
        "--suppress-status-msgs",
    ]);
    assert!(out.status.success());
    assert!(dir.path().join("renamed.txt").is_file());
    assert!(!String::from_utf8_lossy(&out.stdout).contains("Task completed"));
}

#[test]
fn test_extract_refuses_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.pdf");
    write_pdf(&input, "New text");
    let output = dir.path().join("sample.txt");
    std::fs::write(&output, "original").unwrap();

    let out = pdf2txt(&["extract", arg(&input), arg(dir.path())]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "original");

    let out = pdf2txt(&["extract", arg(&input), arg(dir.path()), "--overwrite"]);
    assert!(out.status.success());
    assert!(std::fs::read_to_string(&output).unwrap().contains("New text"));
}

#[test]
fn test_extract_overwrite_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.pdf");
    write_pdf(&input, "Stable");
    let output = dir.path().join("sample.txt");

    let args = ["extract", arg(&input), arg(dir.path()), "--overwrite"];
    assert!(pdf2txt(&args).status.success());
    let first = std::fs::read(&output).unwrap();
    assert!(pdf2txt(&args).status.success());
    assert_eq!(first, std::fs::read(&output).unwrap());
}

#[test]
fn test_extract_all_recursion() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("in");
    write_pdf(&root.join("a.pdf"), "Alpha");
    write_pdf(&root.join("sub/b.pdf"), "Bravo");
    let dest = dir.path().join("out");

    let out = pdf2txt(&["extract-all", arg(&root), arg(&dest)]);
    assert!(out.status.success());
    assert!(dest.join("a.txt").is_file());
    assert!(!dest.join("sub").exists());

    let out = pdf2txt(&["extract-all", arg(&root), arg(&dest), "--recurse", "--overwrite"]);
    assert!(out.status.success());
    let text = std::fs::read_to_string(dest.join("sub/b.txt")).unwrap();
    assert!(text.contains("Bravo"));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Extracted 2 of 2 files"));
}

#[test]
fn test_extract_all_skips_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("in");
    write_pdf(&root.join("a.pdf"), "Alpha");
    std::fs::write(root.join("b.pdf"), "not really a pdf").unwrap();
    write_pdf(&root.join("c.pdf"), "Charlie");
    let dest = dir.path().join("out");

    let out = pdf2txt(&["extract-all", arg(&root), arg(&dest)]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Skipping"));
    assert!(stdout.contains("Extracted 2 of 3 files, 1 failed"));
    assert_eq!(stdout.matches("Skipping").count(), 1);
    assert!(!String::from_utf8_lossy(&out.stderr).contains("Skipping"));
    assert!(dest.join("c.txt").is_file());
    assert!(!dest.join("b.txt").exists());
}

#[test]
fn test_extract_all_halt_on_fail() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("in");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("a.pdf"), "not really a pdf").unwrap();
    write_pdf(&root.join("b.pdf"), "Bravo");
    let dest = dir.path().join("out");

    let out = pdf2txt(&["extract-all", arg(&root), arg(&dest), "--halt-on-fail"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Batch aborted"));
    assert!(!dest.join("b.txt").exists());
}

#[test]
fn test_extract_all_without_pdfs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

    let out = pdf2txt(&["extract-all", arg(dir.path()), arg(&dir.path().join("out"))]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("No pdf files were found"));
}

#[test]
fn test_extract_all_destination_is_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("in");
    write_pdf(&root.join("a.pdf"), "Alpha");
    let dest = dir.path().join("out.txt");
    std::fs::write(&dest, "x").unwrap();

    let out = pdf2txt(&["extract-all", arg(&root), arg(&dest)]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "x");
}

#[test]
fn test_wrong_input_kind() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("a.pdf");
    write_pdf(&input, "Alpha");

    assert_eq!(
        pdf2txt(&["extract", arg(dir.path()), arg(dir.path())]).status.code(),
        Some(1)
    );
    assert_eq!(
        pdf2txt(&["extract-all", arg(&input), arg(dir.path())]).status.code(),
        Some(1)
    );
    assert_eq!(
        pdf2txt(&["extract", arg(&dir.path().join("missing.pdf")), arg(dir.path())])
            .status
            .code(),
        Some(1)
    );
}

#[test]
fn test_dump_config() {
    let out = pdf2txt(&["--dump-config"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("halt_on_fail"));
    assert!(stdout.contains("[layout]"));
}
