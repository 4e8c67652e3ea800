//! Translation of a [`VisitFilter`] into a parameterised SQL predicate.
//!
//! Clause text is restricted to `&'static str`, so the shape of the `WHERE`
//! clause is fixed at compile time. Filter values only ever travel as bound
//! parameters, in the same order as the `?` placeholders they fill.

use visits_core::store::VisitFilter;

/// A conjunction of SQL clauses plus the values bound to their placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
  clauses: Vec<&'static str>,
  values:  Vec<String>,
}

impl Predicate {
  /// Build the predicate for `filter`. Absent fields contribute nothing; the
  /// always-true base clause keeps the conjunction valid with zero filters.
  pub fn build(filter: &VisitFilter) -> Self {
    let mut predicate = Self {
      clauses: vec!["1 = 1"],
      values:  Vec::new(),
    };

    if let Some(start) = &filter.start_date {
      predicate.push("date >= ?", start.clone());
    }
    if let Some(end) = &filter.end_date {
      predicate.push("date <= ?", end.clone());
    }
    if let Some(name) = &filter.poi_name {
      predicate.push("poi_name = ?", name.clone());
    }
    if let Some(category) = &filter.poi_category {
      predicate.push("poi_category = ?", category.clone());
    }
    if let Some(dma) = &filter.dma {
      predicate.push("dma = ?", dma.clone());
    }
    if let Some(text) = &filter.search {
      predicate.push(
        "poi_name LIKE ? ESCAPE '\\'",
        format!("%{}%", escape_like(text)),
      );
    }

    predicate
  }

  fn push(&mut self, clause: &'static str, value: String) {
    self.clauses.push(clause);
    self.values.push(value);
  }

  /// The `WHERE` body, e.g. `1 = 1 AND date >= ? AND dma = ?`.
  pub fn sql(&self) -> String { self.clauses.join(" AND ") }

  /// Bound values, in placeholder order.
  pub fn values(&self) -> &[String] { &self.values }

  /// Number of `?` placeholders in [`sql`](Self::sql).
  pub fn arity(&self) -> usize { self.values.len() }
}

/// Escape `LIKE` metacharacters so `text` matches literally.
fn escape_like(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    if matches!(c, '\\' | '%' | '_') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}
