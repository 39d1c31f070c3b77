//! Plain-text classification report.
//!
//! Subjects in lexical order, decades in numeric order, books by year.
//! The decade of unknown years is labelled instead of printed as a number.

use crate::library::model::{BookRecord, UNKNOWN_DECADE};
use crate::library::registry::Grouping;

const REPORT_TITLE: &str = "力学书籍分类报告";
const UNKNOWN_DECADE_LABEL: &str = "年代未知";

/// `- title[ (作者：author)][ [year]]`.
pub fn report_line(book: &BookRecord) -> String {
    let mut line = format!("- {}", book.title);
    if book.has_author() {
        line.push_str(&format!(" (作者：{})", book.author));
    }
    if book.has_year() {
        line.push_str(&format!(" [{}]", book.year));
    }
    line
}

/// Heading for a decade bucket.
pub fn decade_heading(decade: u32) -> String {
    if decade == UNKNOWN_DECADE {
        format!("{UNKNOWN_DECADE_LABEL}：")
    } else {
        format!("{decade}年代：")
    }
}

/// Render the whole report. Subjects and decades without books are left
/// out.
pub fn render_report(grouping: &Grouping) -> String {
    let mut out = format!("{REPORT_TITLE}\n{}\n\n", "=".repeat(50));

    for (subject, decades) in grouping.subjects() {
        if decades.values().all(Vec::is_empty) {
            continue;
        }
        out.push_str(&format!("\n{subject}类书籍：\n{}\n", "-".repeat(30)));

        for (decade, books) in decades {
            if books.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{}\n", decade_heading(*decade)));

            let mut books: Vec<&BookRecord> = books.iter().collect();
            books.sort_by_key(|book| book.year);
            for book in books {
                out.push_str(&report_line(book));
                out.push('\n');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::model::UNKNOWN_YEAR;

    fn book(title: &str, author: &str, year: u32) -> BookRecord {
        BookRecord {
            title: title.into(),
            author: author.into(),
            year,
            classification: vec![],
        }
    }

    #[test]
    fn line_formats() {
        assert_eq!(report_line(&book("材料力学", "张三", 1987)), "- 材料力学 (作者：张三) [1987]");
        assert_eq!(report_line(&book("材料力学", "", UNKNOWN_YEAR)), "- 材料力学");
    }

    #[test]
    fn decade_headings() {
        assert_eq!(decade_heading(1980), "1980年代：");
        assert_eq!(decade_heading(UNKNOWN_DECADE), "年代未知：");
    }

    #[test]
    fn full_report() {
        let mut grouping = Grouping::new();
        grouping.insert("建筑", book("建筑材料2001", "王五", 2001));
        grouping.insert("力学", book("理论力学", "", UNKNOWN_YEAR));
        grouping.insert("力学", book("结构力学1995", "", 1995));
        grouping.insert("力学", book("工程力学1991", "李四", 1991));

        let expected = "\
力学书籍分类报告
==================================================


力学类书籍：
------------------------------

1990年代：
- 工程力学1991 (作者：李四) [1991]
- 结构力学1995 [1995]

年代未知：
- 理论力学

建筑类书籍：
------------------------------

2000年代：
- 建筑材料2001 (作者：王五) [2001]
";
        assert_eq!(render_report(&grouping), expected);
    }

    #[test]
    fn empty_subjects_are_skipped() {
        let mut grouping = Grouping::new();
        grouping.add_subject("材料");
        let report = render_report(&grouping);
        assert!(!report.contains("材料类书籍"));
        assert!(report.starts_with(REPORT_TITLE));
    }
}
