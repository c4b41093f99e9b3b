use log::info;
use knotlab_link::{KnotGraph, Pd};
use crate::app::err::*;

pub fn measure<F, Res>(proc: F) -> (Res, std::time::Duration)
where F: FnOnce() -> Res {
    let start = std::time::Instant::now();
    let res = proc();
    let time = start.elapsed();
    (res, time)
}

pub fn guard_panic<F, R>(f: F) -> Result<R, Box<dyn std::error::Error>>
where F: FnOnce() -> Result<R, Box<dyn std::error::Error>> + std::panic::UnwindSafe {
    std::panic::catch_unwind(|| {
        f()
    }).unwrap_or_else(|e| {
        let info = match e.downcast::<String>() {
            Ok(v) => *v,
            Err(e) => match e.downcast::<&str>() {
                Ok(v) => v.to_string(),
                _ => "Unknown Source of Error".to_owned()
            }
        };
        err!("panic: {info}")
    })
}

/// Reads a diagram given as `PD[...]` notation, a JSON array,
/// or a path to a JSON file. Unoriented crossings are oriented
/// along the components.
pub fn load_pd(input: &str, mirror: bool) -> Result<Pd, Box<dyn std::error::Error>> {
    let pd = {
        if let Ok(pd) = input.parse::<Pd>() {
            pd
        } else if let Ok(pd) = Pd::from_json(input) {
            pd
        } else if let Ok(pd) = Pd::load(input) {
            pd
        } else {
            return err!("invalid input diagram: '{}'", input);
        }
    };

    let pd = if pd.is_oriented() {
        pd
    } else {
        info!("orient {} crossings.", pd.crossing_num());
        KnotGraph::from_pd(&pd).get_pd(true)
    };

    if mirror {
        Ok(pd.mirror())
    } else {
        Ok(pd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_notation() {
        let pd = load_pd("PD[Xp[1,3,6,4], Xp[3,5,2,6], Xp[5,1,4,2]]", false).unwrap();
        assert_eq!(pd, Pd::trefoil());

        let pd = load_pd("PD[Xp[1,3,6,4], Xp[3,5,2,6], Xp[5,1,4,2]]", true).unwrap();
        assert_eq!(pd.writhe(), -3);
    }

    #[test]
    fn load_json() {
        let pd = load_pd("[[1,4,2,5],[3,6,4,1],[5,2,6,3]]", false).unwrap();
        assert!(pd.is_oriented());
        assert_eq!(pd.crossing_num(), 3);
        assert_eq!(pd.writhe().abs(), 3);
    }

    #[test]
    fn load_invalid() {
        assert!(load_pd("not a diagram", false).is_err());
    }

    #[test]
    fn panic_guarded() {
        let res: Result<(), _> = guard_panic(|| panic!("bad diagram"));
        assert_eq!(res.unwrap_err().to_string(), "panic: bad diagram");
    }
}
