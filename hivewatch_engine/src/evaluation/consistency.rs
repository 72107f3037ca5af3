//! Consistency reduction
//!
//! Several values that should agree (one per Tomcat role, one per webapp)
//! reduce to nothing, one value, or a list of the distinct values that
//! disagree. Blank entries never count.

use crate::results::Cell;

/// Outcome of reducing a list of values that should agree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    /// No non-blank value
    Empty,
    /// Every non-blank value is this one
    Uniform(String),
    /// Two or more distinct values, in first-appearance order
    Divergent(Vec<String>),
}

/// Trim, drop blanks, then collapse to distinct values in first-appearance order
pub fn reduce_values<I, S>(values: I) -> Reduction
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut distinct: Vec<String> = Vec::new();
    for value in values.into_iter().flatten() {
        let value = value.as_ref().trim();
        if value.is_empty() || distinct.iter().any(|d| d == value) {
            continue;
        }
        distinct.push(value.to_string());
    }

    match distinct.len() {
        0 => Reduction::Empty,
        1 => Reduction::Uniform(distinct.remove(0)),
        _ => Reduction::Divergent(distinct),
    }
}

/// Cell for a value every role of a server should report identically
pub fn consistency_cell<I, S>(values: I) -> Cell
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    match reduce_values(values) {
        Reduction::Empty => Cell::unknown(),
        Reduction::Uniform(value) => Cell::ok(value),
        Reduction::Divergent(values) => {
            Cell::error(format!("Multiple values: {}", values.join(" · ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::CellStatus;

    #[test]
    fn test_all_blank_is_unknown() {
        let cell = consistency_cell(vec![None, Some("  "), Some("")]);
        assert_eq!(cell, Cell::unknown());

        let cell = consistency_cell(Vec::<Option<&str>>::new());
        assert_eq!(cell.status, CellStatus::Unknown);
    }

    #[test]
    fn test_single_distinct_value_is_ok() {
        let cell = consistency_cell(vec![Some("17.0.2"), None, Some(" 17.0.2 "), Some("")]);
        assert_eq!(cell, Cell::ok("17.0.2"));
    }

    #[test]
    fn test_divergent_lists_distinct_values_in_order() {
        let cell = consistency_cell(vec![
            Some("Linux 5.15"),
            Some("Linux 6.1"),
            None,
            Some("Linux 5.15"),
            Some("Linux 4.19"),
        ]);

        assert_eq!(cell.status, CellStatus::Error);
        assert_eq!(
            cell.title.as_deref(),
            Some("Multiple values: Linux 5.15 · Linux 6.1 · Linux 4.19")
        );
        assert_eq!(cell.text, None);
    }

    #[test]
    fn test_reduce_values_owned_strings() {
        let values = vec![Some("a".to_string()), Some("b".to_string())];
        assert_eq!(
            reduce_values(values),
            Reduction::Divergent(vec!["a".into(), "b".into()])
        );
    }
}
