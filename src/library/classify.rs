//! Keyword-based subject classification.
//!
//! A fixed, ordered table of subjects; the first subject with a keyword
//! occurring in the title wins. Titles matching nothing fall into
//! [`DEFAULT_SUBJECT`].

/// Catch-all subject for titles that match no keyword.
pub const DEFAULT_SUBJECT: &str = "其他";

/// A subject and the keywords that select it.
#[derive(Debug, Clone, Copy)]
pub struct SubjectRule {
    pub subject: &'static str,
    pub keywords: &'static [&'static str],
}

/// Rules in match order. `建筑` is checked before `材料`, so a title such
/// as `建筑材料` is filed under `建筑`.
pub const SUBJECT_RULES: &[SubjectRule] = &[
    SubjectRule {
        subject: "力学",
        keywords: &["力学", "静力学", "动力学"],
    },
    SubjectRule {
        subject: "建筑",
        keywords: &["建筑", "构造", "钢筋", "混凝土"],
    },
    SubjectRule {
        subject: "材料",
        keywords: &["材料", "耐力"],
    },
];

impl SubjectRule {
    /// Whether any keyword occurs in the already lower-cased text.
    fn matches(&self, folded: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| folded.contains(&keyword.to_lowercase()))
    }
}

/// Map a title to exactly one subject.
pub fn classify_subject(text: &str) -> &'static str {
    let folded = text.to_lowercase();
    SUBJECT_RULES
        .iter()
        .find(|rule| rule.matches(&folded))
        .map_or(DEFAULT_SUBJECT, |rule| rule.subject)
}
