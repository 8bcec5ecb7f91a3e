use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A report row flagged as having a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoOrder {
    /// Cycle the row was fetched for.
    pub cycle: String,
    /// Identifier field A (column 0 by default).
    pub a: String,
    /// Identifier field B (column 1 by default).
    pub b: String,
    /// Identifier field C (column 2 by default).
    pub c: String,
    /// Derived CDN URL; empty when B is blank.
    pub photo_url: String,
    /// The complete report row.
    pub row: Vec<String>,
}

/// Photo orders of one cycle on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoReport {
    pub cycle: String,
    pub date: NaiveDate,
    /// Report headers of identifier fields A, B and C.
    pub headers: [String; 3],
    pub orders: Vec<PhotoOrder>,
}

impl PhotoReport {
    /// No row carried the photo flag.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Distinct B values, sorted, for building a filter dropdown.
    pub fn groups(&self) -> Vec<String> {
        distinct_groups(&self.orders)
    }

    /// Copy of this report keeping only the orders the filter accepts.
    pub fn filtered(&self, filter: &PhotoFilter) -> PhotoReport {
        PhotoReport {
            orders: filter.apply(&self.orders),
            ..self.clone()
        }
    }
}

/// A cycle that could not be fetched during a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleFailure {
    pub cycle: String,
    pub reason: String,
}

/// Accumulated result of fetching several cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub date: NaiveDate,
    pub orders: Vec<PhotoOrder>,
    /// Cycles fetched successfully that had no photo rows.
    pub empty: Vec<String>,
    /// Cycles whose fetch failed.
    pub failures: Vec<CycleFailure>,
}

impl BatchReport {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            orders: Vec::new(),
            empty: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn groups(&self) -> Vec<String> {
        distinct_groups(&self.orders)
    }

    pub fn filtered(&self, filter: &PhotoFilter) -> BatchReport {
        BatchReport {
            orders: filter.apply(&self.orders),
            ..self.clone()
        }
    }
}

/// Gallery filter: multiselects over cycles and B values.
///
/// An empty selection accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoFilter {
    #[serde(default)]
    pub cycles: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl PhotoFilter {
    pub fn with_groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cycles: Vec::new(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty() && self.groups.is_empty()
    }

    pub fn accepts(&self, order: &PhotoOrder) -> bool {
        (self.cycles.is_empty() || self.cycles.iter().any(|c| c == &order.cycle))
            && (self.groups.is_empty() || self.groups.iter().any(|g| g == &order.b))
    }

    pub fn apply(&self, orders: &[PhotoOrder]) -> Vec<PhotoOrder> {
        orders
            .iter()
            .filter(|order| self.accepts(order))
            .cloned()
            .collect()
    }
}

fn distinct_groups(orders: &[PhotoOrder]) -> Vec<String> {
    orders
        .iter()
        .map(|o| o.b.clone())
        .filter(|b| !b.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(cycle: &str, b: &str) -> PhotoOrder {
        PhotoOrder {
            cycle: cycle.to_string(),
            a: "12345".to_string(),
            b: b.to_string(),
            c: "1".to_string(),
            photo_url: String::new(),
            row: vec![],
        }
    }

    fn report(orders: Vec<PhotoOrder>) -> PhotoReport {
        PhotoReport {
            cycle: "101".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            headers: ["A".into(), "B".into(), "C".into()],
            orders,
        }
    }

    #[test]
    fn test_groups_are_distinct_sorted_and_non_blank() {
        let report = report(vec![
            order("101", "U2"),
            order("101", "U1"),
            order("101", "U2"),
            order("101", " "),
        ]);
        assert_eq!(report.groups(), vec!["U1", "U2"]);
    }

    #[test]
    fn test_filter_by_group() {
        let report = report(vec![order("101", "U1"), order("101", "U2")]);
        let filtered = report.filtered(&PhotoFilter::with_groups(["U2"]));
        assert_eq!(filtered.orders.len(), 1);
        assert_eq!(filtered.orders[0].b, "U2");
        assert_eq!(filtered.cycle, "101");
    }

    #[test]
    fn test_empty_filter_accepts_all() {
        let filter = PhotoFilter::default();
        assert!(filter.is_empty());
        assert!(filter.accepts(&order("x", "y")));
    }

    #[test]
    fn test_filter_by_cycle_and_group() {
        let filter = PhotoFilter {
            cycles: vec!["101".to_string()],
            groups: vec!["U1".to_string()],
        };
        assert!(filter.accepts(&order("101", "U1")));
        assert!(!filter.accepts(&order("102", "U1")));
        assert!(!filter.accepts(&order("101", "U2")));
    }

    #[test]
    fn test_report_is_empty() {
        assert!(report(vec![]).is_empty());
        assert!(!report(vec![order("101", "U1")]).is_empty());
    }
}
