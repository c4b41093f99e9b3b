use std::str::FromStr;
use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::{Edge, Entity, Pd};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected input: `{0}`")]
    Syntax(String),

    #[error("{name} takes {expected} edges, found {found}")]
    Arity { name: String, expected: usize, found: usize },

    #[error("edge {edge} appears {count} times")]
    EdgeCount { edge: Edge, count: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn entity_from(name: &str, edges: &[Edge]) -> Result<Entity, ParseError> {
    let expected = if name == "P" { 2 } else { 4 };
    if edges.len() != expected {
        return Err(ParseError::Arity { name: name.to_string(), expected, found: edges.len() })
    }
    let e4 = || [edges[0], edges[1], edges[2], edges[3]];
    let x = match name {
        "P" => Entity::P([edges[0], edges[1]]),
        "X" => Entity::X(e4()),
        "Xp" => Entity::Xp(e4()),
        "Xm" => Entity::Xm(e4()),
        "V" | "Virtual" => Entity::V(e4()),
        _ => return Err(ParseError::Syntax(name.to_string()))
    };
    Ok(x)
}

fn checked(data: Vec<Entity>) -> Result<Pd, ParseError> {
    let counts = data.iter().flat_map(|x| x.edges()).counts();
    if let Some((&edge, &count)) = counts.iter().sorted().find(|(_, c)| **c != 2) {
        return Err(ParseError::EdgeCount { edge: *edge, count })
    }
    Ok(Pd::new(data))
}

impl FromStr for Pd {
    type Err = ParseError;

    /// Parses Mathematica notation, e.g. `PD[X[1, 4, 2, 5], Xp[3, 6, 4, 1], P[5, 6]]`.
    /// The outer `PD[...]` may be omitted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let body = match s.strip_prefix("PD[") {
            Some(rest) => rest.strip_suffix(']').ok_or_else(|| ParseError::Syntax(s.to_string()))?,
            None => s
        };

        let re = Regex::new(r"(Xp|Xm|X|P|Virtual|V)\[([^\[\]]*)\]").unwrap();
        let mut data = vec![];
        let mut last = 0;

        for cap in re.captures_iter(body) {
            let m = cap.get(0).unwrap();
            let gap = &body[last..m.start()];
            if !gap.chars().all(|c| c == ',' || c.is_whitespace()) {
                return Err(ParseError::Syntax(gap.trim().to_string()))
            }
            last = m.end();

            let edges = cap[2]
                .split(',')
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(|t| t.parse::<Edge>().map_err(|_| ParseError::Syntax(t.to_string())))
                .collect::<Result<Vec<_>, _>>()?;

            data.push(entity_from(&cap[1], &edges)?);
        }

        let rest = &body[last..];
        if !rest.chars().all(|c| c == ',' || c.is_whitespace()) {
            return Err(ParseError::Syntax(rest.trim().to_string()))
        }

        checked(data)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonEntity {
    Code(Vec<Edge>),
    Tagged(Entity),
}

impl Pd {
    /// Reads a JSON array whose items are either plain edge lists
    /// (`[1, 4, 2, 5]` for `X`, `[1, 2]` for `P`) or tagged entities
    /// (`{"Xp": [1, 3, 6, 4]}`).
    pub fn from_json(json: &str) -> Result<Pd, ParseError> {
        let items: Vec<JsonEntity> = serde_json::from_str(json)?;
        let data = items.into_iter().map(|item| match item {
            JsonEntity::Tagged(x) => Ok(x),
            JsonEntity::Code(e) if e.len() == 2 => entity_from("P", &e),
            JsonEntity::Code(e) => entity_from("X", &e),
        }).collect::<Result<Vec<_>, _>>()?;
        checked(data)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self.data()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Entity::*;

    #[test]
    fn parse_mathematica() {
        let pd: Pd = "PD[Xp[1, 3, 6, 4], Xp[3,5,2,6], Xp[5, 1, 4, 2]]".parse().unwrap();
        assert_eq!(pd, Pd::trefoil());
    }

    #[test]
    fn parse_without_wrapper() {
        let pd: Pd = "X[1,4,2,5], X[3,6,4,1], X[5,2,6,3]".parse().unwrap();
        assert_eq!(pd, Pd::from_pd_code([[1,4,2,5],[3,6,4,1],[5,2,6,3]]));
    }

    #[test]
    fn parse_virtual_and_path() {
        let pd: Pd = "PD[Xp[4,2,5,1], Xp[5,3,6,2], Virtual[3,6,4,1]]".parse().unwrap();
        assert_eq!(pd, Pd::virtual_trefoil());

        let pd: Pd = "PD[P[1, 1]]".parse().unwrap();
        assert_eq!(pd, Pd::unknot());
    }

    #[test]
    fn parse_empty() {
        let pd: Pd = "PD[]".parse().unwrap();
        assert!(pd.is_empty());
    }

    #[test]
    fn parse_roundtrip() {
        let pd = Pd::figure8();
        let s = pd.to_string();
        assert_eq!(s.parse::<Pd>().unwrap(), pd);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!("PD[X[1,2,3]]".parse::<Pd>(), Err(ParseError::Arity { .. })));
        assert!(matches!("PD[Y[1,2,3,4]]".parse::<Pd>(), Err(ParseError::Syntax(_))));
        assert!(matches!("PD[X[1,2,3,4]]".parse::<Pd>(), Err(ParseError::EdgeCount { edge: 1, count: 1 })));
        assert!(matches!("PD[X[1,a,1,2]]".parse::<Pd>(), Err(ParseError::Syntax(_))));
    }

    #[test]
    fn json() {
        let pd = Pd::from_json("[[1,4,2,5],[3,6,4,1],[5,2,6,3]]").unwrap();
        assert_eq!(pd, Pd::from_pd_code([[1,4,2,5],[3,6,4,1],[5,2,6,3]]));

        let pd = Pd::from_json(r#"[{"Xp":[2,4,3,1]},{"Xp":[4,2,1,3]}]"#).unwrap();
        assert_eq!(pd, Pd::hopf_link());

        let pd = Pd::from_json(&Pd::virtual_trefoil().to_json()).unwrap();
        assert_eq!(pd, Pd::virtual_trefoil());
        assert_eq!(pd.data()[2], V([3, 6, 4, 1]));
    }

    #[test]
    fn json_error() {
        assert!(matches!(Pd::from_json("[[1,2,3]"), Err(ParseError::Json(_))));
    }
}
