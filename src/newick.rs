//! Newick-style bracket notation for a [`Grouping`].
//!
//! The grouping becomes a two-level tree (subject, then decade) whose
//! leaves are books. Every leaf and every named internal node may carry a
//! `:distance` suffix. Distances are cosmetic: they come from a
//! [`DistanceSource`], random by default, fixed or seeded for tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::library::model::BookRecord;
use crate::library::registry::Grouping;

/// Smallest generated distance.
pub const MIN_DISTANCE: f64 = 0.1;
/// Largest generated distance.
pub const MAX_DISTANCE: f64 = 0.5;

/// Supplies the `:distance` values, one call per annotated node.
pub trait DistanceSource {
    fn next_distance(&mut self) -> f64;
}

/// Uniform distances in `[MIN_DISTANCE, MAX_DISTANCE]`, rounded to two
/// decimals.
pub struct RandomDistance<R = StdRng> {
    rng: R,
}

impl RandomDistance<StdRng> {
    /// Fresh, non-reproducible distances.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible distances for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomDistance<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DistanceSource for RandomDistance<R> {
    fn next_distance(&mut self) -> f64 {
        let raw = self.rng.gen_range(MIN_DISTANCE..=MAX_DISTANCE);
        (raw * 100.0).round() / 100.0
    }
}

/// The same distance everywhere.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistance(pub f64);

impl DistanceSource for FixedDistance {
    fn next_distance(&mut self) -> f64 {
        self.0
    }
}

/// Layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStyle {
    /// One child per line, indented two spaces per nesting level.
    pub indented: bool,
    /// Append `:distance` to leaves and named nodes.
    pub show_distance: bool,
}

impl TreeStyle {
    pub const INDENTED: Self = Self {
        indented: true,
        show_distance: true,
    };

    pub const COMPACT: Self = Self {
        indented: false,
        show_distance: true,
    };

    pub fn without_distance(self) -> Self {
        Self {
            show_distance: false,
            ..self
        }
    }
}

/// A tree node: books at the bottom, named children above.
#[derive(Debug, Clone)]
pub enum Node<'a> {
    Leaf(Vec<&'a BookRecord>),
    /// Children in render order.
    Branch(Vec<(String, Node<'a>)>),
}

impl<'a> Node<'a> {
    /// Root -> subject (lexical) -> decade (numeric) -> books.
    pub fn from_grouping(grouping: &'a Grouping) -> Self {
        Node::Branch(
            grouping
                .subjects()
                .map(|(subject, decades)| {
                    let decade_nodes = decades
                        .iter()
                        .map(|(decade, books)| {
                            (decade.to_string(), Node::Leaf(books.iter().collect()))
                        })
                        .collect();
                    (subject.to_string(), Node::Branch(decade_nodes))
                })
                .collect(),
        )
    }

    /// Whether the subtree holds no book at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Leaf(books) => books.is_empty(),
            Node::Branch(children) => children.iter().all(|(_, child)| child.is_empty()),
        }
    }
}

/// `title[ (author)][ [year]]`.
pub fn book_label(book: &BookRecord) -> String {
    let mut label = book.title.clone();
    if book.has_author() {
        label.push_str(&format!(" ({})", book.author));
    }
    if book.has_year() {
        label.push_str(&format!(" [{}]", book.year));
    }
    label
}

/// Render with random distances.
pub fn render(grouping: &Grouping, indented: bool, show_distance: bool) -> String {
    let style = TreeStyle {
        indented,
        show_distance,
    };
    render_tree(grouping, style, &mut RandomDistance::from_entropy())
}

/// Render a grouping, terminated by `;`.
///
/// Subtrees without books are left out, so an empty grouping renders as
/// a bare `;`.
pub fn render_tree(
    grouping: &Grouping,
    style: TreeStyle,
    distances: &mut dyn DistanceSource,
) -> String {
    let root = Node::from_grouping(grouping);
    let mut out = render_node(&root, None, 0, style, distances).unwrap_or_default();
    out.push(';');
    out
}

fn render_node(
    node: &Node<'_>,
    name: Option<&str>,
    level: usize,
    style: TreeStyle,
    distances: &mut dyn DistanceSource,
) -> Option<String> {
    let children: Vec<String> = match node {
        Node::Leaf(books) => {
            let mut books = books.clone();
            books.sort_by_key(|book| book.year);
            books
                .into_iter()
                .map(|book| {
                    let mut label = book_label(book);
                    push_distance(&mut label, style, distances);
                    label
                })
                .collect()
        }
        Node::Branch(children) => children
            .iter()
            .filter_map(|(child_name, child)| {
                render_node(child, Some(child_name.as_str()), level + 1, style, distances)
            })
            .collect(),
    };

    if children.is_empty() {
        return None;
    }

    let mut out = wrap(&children, level, style.indented);
    if let Some(name) = name {
        out.push_str(name);
        push_distance(&mut out, style, distances);
    }
    Some(out)
}

fn push_distance(out: &mut String, style: TreeStyle, distances: &mut dyn DistanceSource) {
    if style.show_distance {
        out.push_str(&format!(":{}", distances.next_distance()));
    }
}

/// Parenthesize comma-joined children.
fn wrap(children: &[String], level: usize, indented: bool) -> String {
    if indented {
        let indent = format!("\n{}", "  ".repeat(level));
        format!("({indent}{}{indent})", children.join(&format!(",{indent}")))
    } else {
        format!("({})", children.join(","))
    }
}
