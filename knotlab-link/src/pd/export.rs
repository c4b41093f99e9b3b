use itertools::Itertools;
use thiserror::Error;

use super::{Entity, Pd};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("{0} cannot be exported to {1}")]
    UnsupportedEntity(Entity, &'static str),
}

impl Pd {
    /// `PD[X[1, 4, 2, 5], ...]`, readable by KnotTheory.
    pub fn to_mathematica(&self) -> String {
        self.to_string()
    }

    /// `Link([(a,b,c,d), ...])` for SnapPy. Each tuple starts at the
    /// incoming under-strand, as in KnotTheory.
    pub fn to_snappy(&self) -> Result<String, ExportError> {
        let codes = self.iter().map(|x| {
            let [a, b, c, d] = match *x {
                Entity::X(e) | Entity::Xp(e) => e,
                Entity::Xm([a, b, c, d]) => [d, a, b, c],
                _ => return Err(ExportError::UnsupportedEntity(*x, "SnapPy"))
            };
            Ok(format!("({a},{b},{c},{d})"))
        }).collect::<Result<Vec<_>, _>>()?;

        Ok(format!("Link([{}])", codes.iter().join(", ")))
    }
}
