//! Sort specifications for page collections.
//!
//! A spec is a comma-separated list of `field [asc|desc]` terms, e.g.
//! `"num desc, title"`. Terms are applied left to right; later terms only
//! break ties left by earlier ones.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// One `field [direction]` term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortTerm {
    pub field: String,
    pub direction: Direction,
}

/// Parsed sort specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    terms: Vec<SortTerm>,
}

/// Error returned when parsing a sort specification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SortSpecError {
    /// No fields in the specification.
    #[error("Sort specification is empty")]
    Empty,
    /// Unknown direction token after a field name.
    #[error("Invalid sort direction '{direction}' for field '{field}'")]
    Direction {
        /// Field the direction was attached to.
        field: String,
        /// Offending token.
        direction: String,
    },
}

impl SortSpec {
    /// Terms in application order.
    #[must_use]
    pub fn terms(&self) -> &[SortTerm] {
        &self.terms
    }

    /// Compare two field lookups according to this spec.
    pub(crate) fn compare<A, B>(&self, lookup_a: A, lookup_b: B) -> Ordering
    where
        A: Fn(&str) -> Option<String>,
        B: Fn(&str) -> Option<String>,
    {
        for term in &self.terms {
            let ordering = compare_values(
                lookup_a(&term.field).as_deref(),
                lookup_b(&term.field).as_deref(),
            );
            let ordering = match term.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Missing values first, then integers numerically, then text case-insensitively.
fn compare_values(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.to_lowercase().cmp(&b.to_lowercase()),
        },
    }
}

impl FromStr for SortSpec {
    type Err = SortSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut terms = Vec::new();

        for part in s.split(',') {
            let mut tokens = part.split_whitespace();
            let Some(field) = tokens.next() else {
                continue;
            };
            let direction = match tokens.next().map(str::to_lowercase).as_deref() {
                None | Some("asc") => Direction::Asc,
                Some("desc") => Direction::Desc,
                Some(other) => {
                    return Err(SortSpecError::Direction {
                        field: field.to_owned(),
                        direction: other.to_owned(),
                    });
                }
            };
            terms.push(SortTerm {
                field: field.to_owned(),
                direction,
            });
        }

        if terms.is_empty() {
            return Err(SortSpecError::Empty);
        }
        Ok(Self { terms })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let direction = match term.direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            write!(f, "{} {direction}", term.field)?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for SortSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(fields: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            fields
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn test_parse_single_field_defaults_to_asc() {
        let spec: SortSpec = "title".parse().unwrap();
        assert_eq!(
            spec.terms(),
            &[SortTerm {
                field: "title".to_owned(),
                direction: Direction::Asc,
            }]
        );
    }

    #[test]
    fn test_parse_multiple_terms() {
        let spec: SortSpec = "num DESC, title asc".parse().unwrap();
        assert_eq!(spec.terms().len(), 2);
        assert_eq!(spec.terms()[0].direction, Direction::Desc);
        assert_eq!(spec.terms()[1].field, "title");
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert_eq!("".parse::<SortSpec>(), Err(SortSpecError::Empty));
        assert_eq!(" , ".parse::<SortSpec>(), Err(SortSpecError::Empty));
    }

    #[test]
    fn test_parse_bad_direction_is_error() {
        let err = "num sideways".parse::<SortSpec>().unwrap_err();
        assert!(matches!(err, SortSpecError::Direction { .. }));
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn test_display_normalizes() {
        let spec: SortSpec = "num desc,title".parse().unwrap();
        assert_eq!(spec.to_string(), "num desc, title asc");
    }

    #[test]
    fn test_compare_numeric_before_lexical() {
        let spec: SortSpec = "num".parse().unwrap();
        let a = [("num", "9")];
        let b = [("num", "10")];
        assert_eq!(spec.compare(lookup(&a), lookup(&b)), Ordering::Less);
    }

    #[test]
    fn test_compare_text_case_insensitive() {
        let spec: SortSpec = "title desc".parse().unwrap();
        let a = [("title", "apple")];
        let b = [("title", "Banana")];
        assert_eq!(spec.compare(lookup(&a), lookup(&b)), Ordering::Greater);
    }

    #[test]
    fn test_compare_missing_sorts_first() {
        let spec: SortSpec = "date".parse().unwrap();
        let a: [(&str, &str); 0] = [];
        let b = [("date", "2024-01-01")];
        assert_eq!(spec.compare(lookup(&a), lookup(&b)), Ordering::Less);
    }

    #[test]
    fn test_compare_falls_through_to_next_term() {
        let spec: SortSpec = "template, title".parse().unwrap();
        let a = [("template", "article"), ("title", "b")];
        let b = [("template", "article"), ("title", "a")];
        assert_eq!(spec.compare(lookup(&a), lookup(&b)), Ordering::Greater);
    }
}
