//! DOCX parser built on `zip` + `quick-xml`.
//!
//! Only body-level paragraphs of `word/document.xml` are returned, in
//! document order. Paragraphs nested in tables, text boxes or content
//! controls are not part of the body sequence and are skipped.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::library::error::{LibraryError, LibraryResult};
use crate::library::model::{ContentFormat, ParsedDocument};
use crate::library::parser::ContentParser;

const DOCUMENT_PART: &str = "word/document.xml";

/// Office Open XML word-processor parser.
pub struct DocxParser;

impl ContentParser for DocxParser {
    fn format(&self) -> ContentFormat {
        ContentFormat::Docx
    }

    fn parse(&self, data: &[u8]) -> LibraryResult<ParsedDocument> {
        let xml = read_document_part(data)?;
        let paragraphs = body_paragraphs(&xml)?;
        Ok(ParsedDocument { paragraphs })
    }
}

fn parse_error(message: String) -> LibraryError {
    LibraryError::ParseError {
        format: ContentFormat::Docx.as_str().into(),
        message,
    }
}

/// Pull `word/document.xml` out of the ZIP container.
fn read_document_part(data: &[u8]) -> LibraryResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| parse_error(format!("failed to open DOCX as ZIP: {e}")))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| parse_error(format!("missing {DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| parse_error(format!("read {DOCUMENT_PART}: {e}")))?;
    Ok(xml)
}

/// Collect the text of every body-level paragraph.
///
/// Run text comes from `w:t`; `w:tab` becomes a tab and `w:br`/`w:cr` a
/// newline. Element names are compared by local name so the namespace
/// prefix does not matter.
fn body_paragraphs(xml: &str) -> LibraryResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    // Local names from the root element down to the current one.
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.local_name().as_ref().to_vec();
                if name.as_slice() == b"p" && at_body_level(&stack) {
                    current = Some(String::new());
                }
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"p" if at_body_level(&stack) => paragraphs.push(String::new()),
                    b"tab" if in_run(below_body(&stack)) => push_char(&mut current, '\t'),
                    b"br" | b"cr" if in_run(below_body(&stack)) => push_char(&mut current, '\n'),
                    _ => {}
                }
            }
            Ok(Event::Text(t)) => {
                if in_run_text(below_body(&stack)) {
                    let text = t
                        .unescape()
                        .map_err(|e| parse_error(format!("bad text in {DOCUMENT_PART}: {e}")))?;
                    if let Some(paragraph) = current.as_mut() {
                        paragraph.push_str(&text);
                    }
                }
            }
            Ok(Event::End(_)) => {
                if let Some(name) = stack.pop() {
                    if name.as_slice() == b"p" && at_body_level(&stack) {
                        if let Some(paragraph) = current.take() {
                            paragraphs.push(paragraph);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(parse_error(format!(
                    "malformed {DOCUMENT_PART} at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn push_char(current: &mut Option<String>, ch: char) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push(ch);
    }
}

/// Whether the innermost open element is the document body.
fn at_body_level(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|name| name.as_slice() == b"body")
}

/// The open elements below the body, outermost first.
fn below_body(stack: &[Vec<u8>]) -> &[Vec<u8>] {
    match stack.iter().rposition(|name| name.as_slice() == b"body") {
        Some(pos) => &stack[pos + 1..],
        None => &[],
    }
}

/// `p > r` or `p > hyperlink > r`.
fn in_run(path: &[Vec<u8>]) -> bool {
    match path {
        [p, r] => p.as_slice() == b"p" && r.as_slice() == b"r",
        [p, link, r] => {
            p.as_slice() == b"p" && link.as_slice() == b"hyperlink" && r.as_slice() == b"r"
        }
        _ => false,
    }
}

fn in_run_text(path: &[Vec<u8>]) -> bool {
    match path.split_last() {
        Some((t, run)) => t.as_slice() == b"t" && in_run(run),
        None => false,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use super::*;

    /// Build a minimal DOCX whose body holds the given paragraphs.
    pub(crate) fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{p}</w:t></w:r></w:p>"#))
            .collect();
        docx_from_body(&body)
    }

    pub(crate) fn docx_from_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn reads_body_paragraphs_in_order() {
        let data = docx_bytes(&["材料力学[张三]", "工程/力学"]);
        let doc = DocxParser.parse(&data).unwrap();
        assert_eq!(doc.paragraphs, vec!["材料力学[张三]", "工程/力学"]);
    }

    #[test]
    fn joins_runs_and_keeps_empty_paragraphs() {
        let body = concat!(
            "<w:p/>",
            "<w:p><w:r><w:t>结构</w:t></w:r><w:r><w:t>力学</w:t></w:r></w:p>",
            "<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr></w:p>",
        );
        let doc = DocxParser.parse(&docx_from_body(body)).unwrap();
        assert_eq!(doc.paragraphs, vec!["", "结构力学", ""]);
    }

    #[test]
    fn tabs_breaks_and_hyperlinks() {
        let body = concat!(
            "<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>",
            "<w:p><w:hyperlink><w:r><w:t>link</w:t></w:r></w:hyperlink></w:p>",
        );
        let doc = DocxParser.parse(&docx_from_body(body)).unwrap();
        assert_eq!(doc.paragraphs, vec!["A\tB\nC", "link"]);
    }

    #[test]
    fn table_paragraphs_are_not_body_paragraphs() {
        let body = concat!(
            "<w:p><w:r><w:t>first</w:t></w:r></w:p>",
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
            "<w:p><w:r><w:t>second</w:t></w:r></w:p>",
        );
        let doc = DocxParser.parse(&docx_from_body(body)).unwrap();
        assert_eq!(doc.paragraphs, vec!["first", "second"]);
    }

    #[test]
    fn unescapes_entities() {
        let data = docx_bytes(&["A &amp; B", "x/y"]);
        let doc = DocxParser.parse(&data).unwrap();
        assert_eq!(doc.paragraphs[0], "A & B");
    }

    #[test]
    fn not_a_zip_is_a_parse_error() {
        let err = DocxParser.parse(b"plain text, not a package").unwrap_err();
        assert!(matches!(err, LibraryError::ParseError { .. }));
    }

    #[test]
    fn zip_without_document_part_is_a_parse_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("hello.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hi").unwrap();
        let data = writer.finish().unwrap().into_inner();

        let err = DocxParser.parse(&data).unwrap_err();
        match err {
            LibraryError::ParseError { message, .. } => assert!(message.contains(DOCUMENT_PART)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
