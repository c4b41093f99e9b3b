use itertools::Itertools;
use knotlab_link::KnotGraph;
use crate::app::utils::*;
use crate::app::err::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let pd = load_pd(&args.input, args.mirror)?;

    let out = match args.format {
        Format::Mathematica => pd.to_mathematica(),
        Format::Snappy => pd.to_snappy()?,
        Format::Json => pd.to_json(),
        Format::Dt => {
            let Some(dt) = KnotGraph::from_pd(&pd).get_dt() else {
                return err!("DT code is defined only for classical knots.")
            };
            format!("DT[{}]", dt.iter().join(", "))
        }
    };

    Ok(out)
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args {
    pub input: String,

    #[arg(short, long, default_value = "mathematica")]
    pub format: Format,

    #[arg(short, long)]
    pub mirror: bool,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREFOIL: &str = "PD[Xp[1,3,6,4], Xp[3,5,2,6], Xp[5,1,4,2]]";

    fn export(input: &str, format: Format) -> Result<String, Box<dyn std::error::Error>> {
        dispatch(&Args { input: input.to_string(), format, ..Default::default() })
    }

    #[test]
    fn dt() {
        assert_eq!(export(TREFOIL, Format::Dt).unwrap(), "DT[-4, -6, -2]");
        assert!(export("PD[Xp[2,4,3,1], Xp[4,2,1,3]]", Format::Dt).is_err());
    }

    #[test]
    fn snappy() {
        assert!(export(TREFOIL, Format::Snappy).is_ok());
        assert!(export("PD[P[1,1]]", Format::Snappy).is_err());
    }

    #[test]
    fn mathematica() {
        let s = export(TREFOIL, Format::Mathematica).unwrap();
        assert_eq!(s.parse::<knotlab_link::Pd>().unwrap(), knotlab_link::Pd::trefoil());
    }
}
