//! Parse free-text model output into product records
//!
//! The model is asked to describe each product with four marker lines:
//!
//! ```text
//! - Product name: Bamboo Toothbrush
//! - Brief description: Biodegradable handle, soft bristles
//! - Environmental impact reduction: Replaces ~4 plastic brushes a year
//! - Price range: $4-$6
//! ```
//!
//! A `Product name` line opens a new record and seals the previous one. The
//! other three markers fill fields of the open record, last write wins.
//! Field markers seen before any name, and every non-marker line, are
//! dropped. The record still open at end of input is always kept, even if
//! only its name is set.
//!
//! Parsing never fails: any string produces a (possibly empty) list.

use serde::{Deserialize, Serialize};
use tracing::debug;
use verdant_domain::{ProductField, ProductRecord, RecommendationList};

/// Exact marker prefixes, matched case-sensitively at line start
const EXACT_MARKERS: [(&str, ProductField); 4] = [
    ("- Product name:", ProductField::Name),
    ("- Brief description:", ProductField::Description),
    ("- Environmental impact reduction:", ProductField::ImpactReduction),
    ("- Price range:", ProductField::PriceRange),
];

/// Bullets accepted in lenient mode
const LENIENT_BULLETS: [char; 3] = ['-', '*', '•'];

/// How marker lines are recognized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerMatching {
    /// `- Label:` exactly, at column zero, case-sensitive
    #[default]
    Exact,

    /// Also accept indentation, `*`/`•` bullets, any label case, markdown
    /// bold around the label and spaces before the colon.
    ///
    /// This changes which lines count as markers, so it can change output
    /// for the same completion. Sealing and last-write-wins are unchanged.
    Lenient,
}

/// Line-oriented extractor for recommendation completions
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationParser {
    matching: MarkerMatching,
}

impl RecommendationParser {
    /// Create a parser with the given marker matching mode
    pub fn new(matching: MarkerMatching) -> Self {
        Self { matching }
    }

    /// Matching mode in use
    pub fn matching(&self) -> MarkerMatching {
        self.matching
    }

    /// Convert a completion into product records, in order of appearance
    pub fn parse(&self, text: &str) -> RecommendationList {
        let mut records = Vec::new();
        let mut current: Option<ProductRecord> = None;
        let mut ignored = 0usize;

        for line in text.lines() {
            match self.match_line(line) {
                Some((ProductField::Name, value)) => {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                    current = Some(ProductRecord::named(value));
                }
                Some((field, value)) => match current.as_mut() {
                    Some(record) => record.set(field, value),
                    None => ignored += 1,
                },
                None => ignored += 1,
            }
        }

        if let Some(record) = current {
            records.push(record);
        }

        debug!(
            "Parsed {} product records, ignored {} lines",
            records.len(),
            ignored
        );

        records
    }

    /// Recognize a marker line, returning its field and trimmed value
    fn match_line<'a>(&self, line: &'a str) -> Option<(ProductField, &'a str)> {
        match self.matching {
            MarkerMatching::Exact => match_exact(line),
            MarkerMatching::Lenient => match_lenient(line),
        }
    }
}

/// Parse with exact markers
///
/// # Examples
///
/// ```
/// use verdant_assistant::parse_recommendations;
///
/// let products = parse_recommendations("- Product name: Bamboo Toothbrush");
/// assert_eq!(products.len(), 1);
/// assert_eq!(products[0].name.as_deref(), Some("Bamboo Toothbrush"));
/// assert!(products[0].price_range.is_none());
/// ```
pub fn parse_recommendations(text: &str) -> RecommendationList {
    RecommendationParser::default().parse(text)
}

fn match_exact(line: &str) -> Option<(ProductField, &str)> {
    EXACT_MARKERS.iter().find_map(|(prefix, field)| {
        line.strip_prefix(*prefix)
            .map(|value| (*field, value.trim()))
    })
}

fn match_lenient(line: &str) -> Option<(ProductField, &str)> {
    let rest = line.trim_start().strip_prefix(LENIENT_BULLETS)?;

    // Bold markup may wrap the label alone or the label and colon
    let rest = rest.trim_start().trim_start_matches('*');
    let (label, value) = rest.split_once(':')?;
    let label = label.trim().trim_end_matches('*').trim_end();

    let field = ProductField::ALL
        .into_iter()
        .find(|f| f.label().eq_ignore_ascii_case(label))?;

    Some((field, value.trim_start().trim_start_matches('*').trim()))
}
