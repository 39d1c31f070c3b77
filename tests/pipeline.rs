//! End-to-end tests for the booktree pipeline.
//!
//! These tests write real `.docx` packages into a scratch directory, run
//! the scan/render/write pipeline over them, and check the grouping and
//! the files produced.

use std::io::{Cursor, Write};
use std::path::Path;

use booktree::config::BuildConfig;
use booktree::library::{LibraryError, scan_directory};
use booktree::newick::{FixedDistance, TreeStyle, render_tree};
use booktree::pipeline::build_with;

fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn write_doc(dir: &Path, name: &str, paragraphs: &[&str]) {
    std::fs::write(dir.join(name), docx(paragraphs)).unwrap();
}

fn config_for(root: &Path) -> BuildConfig {
    BuildConfig {
        source_dir: root.join("data"),
        tree_output: root.join("phylogenetic_tree_indented.txt"),
        report_output: root.join("books_report.txt"),
        ..Default::default()
    }
}

#[test]
fn two_documents_grouped_by_subject_and_decade() {
    let tmp = tempfile::TempDir::new().unwrap();
    let data = tmp.path().join("data");
    std::fs::create_dir(&data).unwrap();
    write_doc(&data, "a.docx", &["结构力学1995", "工程/力学"]);
    write_doc(&data, "b.docx", &["建筑材料2001[王五]", "材料"]);

    let scan = scan_directory(&data);
    assert!(scan.diagnostics.is_empty());

    let mechanics = scan.grouping.bucket("力学", 1990).unwrap();
    assert_eq!(mechanics.len(), 1);
    assert_eq!(mechanics[0].title, "结构力学1995");
    assert_eq!(mechanics[0].year, 1995);

    let building = scan.grouping.bucket("建筑", 2000).unwrap();
    assert_eq!(building.len(), 1);
    assert_eq!(building[0].author, "王五");
    assert_eq!(building[0].title, "建筑材料2001");

    let subjects: Vec<_> = scan.grouping.subjects().map(|(s, _)| s).collect();
    assert_eq!(subjects, vec!["力学", "建筑"]);
}

#[test]
fn build_writes_tree_and_report() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = config_for(tmp.path());
    std::fs::create_dir(&config.source_dir).unwrap();
    write_doc(&config.source_dir, "a.docx", &["结构力学1995", "工程/力学"]);
    write_doc(&config.source_dir, "b.docx", &["建筑材料2001[王五]", "材料"]);
    write_doc(&config.source_dir, "c.docx", &["钢筋混凝土结构", "建筑"]);
    write_doc(&config.source_dir, "d.docx", &["只有一段"]);

    let outcome = build_with(&config, &mut FixedDistance(0.2));
    assert_eq!(outcome.scan.loaded.len(), 3);
    assert!(matches!(
        outcome.scan.diagnostics.as_slice(),
        [LibraryError::TooFewParagraphs { .. }]
    ));
    let export = outcome.export.expect("outputs written");
    assert!(export.is_complete());

    let tree = std::fs::read_to_string(&config.tree_output).unwrap();
    let expected_tree = "\
(
(
  (
    结构力学1995 [1995]:0.2
    )1990:0.2
  )力学:0.2,
(
  (
    建筑材料2001 (王五) [2001]:0.2
    )2000:0.2,
  (
    钢筋混凝土结构:0.2
    )9990:0.2
  )建筑:0.2
);";
    assert_eq!(tree, expected_tree);

    let report = std::fs::read_to_string(&config.report_output).unwrap();
    assert!(report.contains("\n力学类书籍：\n"));
    assert!(report.contains("\n2000年代：\n- 建筑材料2001 (作者：王五) [2001]\n"));
    assert!(report.contains("\n年代未知：\n- 钢筋混凝土结构\n"));
}

#[test]
fn missing_source_writes_nothing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = config_for(tmp.path());

    let outcome = build_with(&config, &mut FixedDistance(0.2));
    assert!(outcome.scan.is_empty());
    assert!(outcome.export.is_none());
    assert!(matches!(
        outcome.scan.diagnostics.as_slice(),
        [LibraryError::SourceMissing { .. }]
    ));
    assert!(!config.tree_output.exists());
    assert!(!config.report_output.exists());
}

#[test]
fn empty_source_writes_nothing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = config_for(tmp.path());
    std::fs::create_dir(&config.source_dir).unwrap();

    let outcome = build_with(&config, &mut FixedDistance(0.2));
    assert!(outcome.export.is_none());
    assert!(matches!(
        outcome.scan.diagnostics.as_slice(),
        [LibraryError::NoDocuments { .. }]
    ));
    assert!(!config.tree_output.exists());
}

#[test]
fn unreadable_documents_only_writes_nothing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = config_for(tmp.path());
    std::fs::create_dir(&config.source_dir).unwrap();
    std::fs::write(config.source_dir.join("broken.docx"), b"garbage").unwrap();

    let outcome = build_with(&config, &mut FixedDistance(0.2));
    assert!(outcome.export.is_none());
    assert_eq!(outcome.scan.diagnostics.len(), 1);
    assert!(!config.report_output.exists());
}

#[test]
fn compact_render_of_scanned_directory() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_doc(tmp.path(), "x.docx", &["材料力学[张三]", "力学"]);
    write_doc(tmp.path(), "y.docx", &["高等数学2010，李四编", "数学"]);

    let scan = scan_directory(tmp.path());
    let style = TreeStyle::COMPACT.without_distance();
    let tree = render_tree(&scan.grouping, style, &mut FixedDistance(0.1));
    assert_eq!(
        tree,
        "(((高等数学2010，李四编 (李四) [2010])2010)其他,((材料力学 (张三))9990)力学);"
    );
}
