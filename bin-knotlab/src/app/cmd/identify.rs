use knotlab_inv::{Diagram, MemoryTable, Scheduler, SchedulerConfig};
use crate::app::utils::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let pd = load_pd(&args.input, args.mirror)?;
    let table = MemoryTable::load(&args.table)?;

    let mut s = Scheduler::with_defaults(SchedulerConfig::default());
    s.set_table(table);

    let d = Diagram::from_pd(pd);
    let v = s.get_invariant("identify_link", &d, &[])?;

    Ok(v.to_string())
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args {
    pub input: String,

    /// JSON knot table.
    #[arg(short, long)]
    pub table: String,

    #[arg(short, long)]
    pub mirror: bool,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identify(input: &str, mirror: bool) -> String {
        let table = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/knots.json").to_string();
        let args = Args { input: input.to_string(), table, mirror, log: 0 };
        dispatch(&args).unwrap()
    }

    #[test]
    fn trefoil() {
        let pd = "PD[Xp[1,3,6,4], Xp[3,5,2,6], Xp[5,1,4,2]]";
        assert_eq!(identify(pd, false), "3_1");
        assert_eq!(identify(pd, true), "3_1*");
    }

    #[test]
    fn figure8() {
        let pd = "PD[Xp[4,2,5,1], Xp[8,6,1,5], Xm[3,7,4,6], Xm[7,3,8,2]]";
        assert_eq!(identify(pd, false), "4_1");
    }

    #[test]
    fn missing_table() {
        let args = Args { input: "PD[P[1,1]]".into(), table: "/nonexistent.json".into(), ..Default::default() };
        assert!(dispatch(&args).is_err());
    }
}
