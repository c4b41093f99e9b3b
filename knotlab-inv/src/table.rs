use std::fs::File;
use std::io::BufReader;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use knotlab::Laurent;

use crate::value::KnotName;

/// Invariants a table lookup is narrowed by.
#[derive(Clone, Debug, PartialEq)]
pub struct TableQuery {
    pub components: usize,
    pub crossings: usize,
    pub jones: Laurent,
    pub alexander: Laurent,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TableResult {
    pub knots: Vec<KnotName>,
    /// Set if the table does not reach the crossing number of the query.
    pub incomplete: bool,
}

/// A source of tabulated knots and links.
pub trait KnotTable {
    fn get_knots(&self, query: &TableQuery) -> TableResult;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnotEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub katlas: Option<String>,
    #[serde(default = "one")]
    pub components: usize,
    pub crossings: usize,
    /// `[degree, coefficient]` pairs in `T = A²`.
    pub jones: Vec<(isize, i64)>,
    /// Coefficients from degree `0`.
    pub alexander: Vec<i64>,
}

fn one() -> usize { 1 }

impl KnotEntry {
    pub fn jones(&self) -> Laurent {
        Laurent::from_terms(self.jones.iter().cloned())
    }

    pub fn alexander(&self) -> Laurent {
        Laurent::from_coeffs(self.alexander.clone(), 0)
    }
}

/// A table held in memory, loaded from JSON:
///
/// ```json
/// { "max_crossings": 5,
///   "knots": [{ "name": "3_1", "crossings": 3,
///               "jones": [[-8, -1], [-6, 1], [-2, 1]], "alexander": [1, -1, 1] }] }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryTable {
    pub max_crossings: usize,
    pub knots: Vec<KnotEntry>,
}

impl MemoryTable {
    pub fn new(max_crossings: usize, knots: Vec<KnotEntry>) -> Self {
        Self { max_crossings, knots }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let f = File::open(path)?;
        let b = BufReader::new(f);
        let t = serde_json::from_reader(b)?;
        Ok(t)
    }
}

impl KnotTable for MemoryTable {
    fn get_knots(&self, query: &TableQuery) -> TableResult {
        let mirror = query.jones.subst_pow(-1);

        let knots = self.knots.iter().filter(|k|
            k.components == query.components &&
            k.crossings <= query.crossings &&
            k.alexander() == query.alexander
        ).filter_map(|k| {
            let j = k.jones();
            let name = |mirror| KnotName { name: k.name.clone(), katlas: k.katlas.clone(), mirror };
            match (j == query.jones, j == mirror) {
                (true, _)      => Some(name(false)),
                (false, true)  => Some(name(true)),
                (false, false) => None
            }
        }).collect_vec();

        debug!("{} table entries match.", knots.len());

        TableResult {
            knots,
            incomplete: query.crossings > self.max_crossings
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"{
        "max_crossings": 3,
        "knots": [
            { "name": "0_1", "crossings": 0, "jones": [[0, 1]], "alexander": [1] },
            { "name": "3_1", "katlas": "3_1", "crossings": 3,
              "jones": [[-8, -1], [-6, 1], [-2, 1]], "alexander": [1, -1, 1] }
        ]
    }"#;

    fn query(crossings: usize, jones: &[(isize, i64)]) -> TableQuery {
        TableQuery {
            components: 1,
            crossings,
            jones: Laurent::from_terms(jones.iter().cloned()),
            alexander: Laurent::from_coeffs(vec![1, -1, 1], 0),
        }
    }

    #[test]
    fn parse() {
        let t = MemoryTable::from_json(TABLE).unwrap();
        assert_eq!(t.knots.len(), 2);
        assert_eq!(t.knots[0].components, 1);
        assert_eq!(t.knots[0].katlas, None);
        assert_eq!(t.knots[1].alexander(), Laurent::from_coeffs(vec![1, -1, 1], 0));
    }

    #[test]
    fn lookup() {
        let t = MemoryTable::from_json(TABLE).unwrap();

        let r = t.get_knots(&query(3, &[(-8, -1), (-6, 1), (-2, 1)]));
        assert_eq!(r.knots.len(), 1);
        assert!(!r.knots[0].mirror);
        assert!(!r.incomplete);

        let r = t.get_knots(&query(5, &[(8, -1), (6, 1), (2, 1)]));
        assert_eq!(r.knots.len(), 1);
        assert!(r.knots[0].mirror);
        assert!(r.incomplete);

        let r = t.get_knots(&query(2, &[(-8, -1), (-6, 1), (-2, 1)]));
        assert!(r.knots.is_empty());
    }
}
