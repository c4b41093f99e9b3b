use log::info;
use knotlab_inv::{Diagram, Scheduler, SchedulerConfig};
use crate::app::utils::*;
use crate::app::err::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    ensure!(args.yield_every > 0, "--yield-every must be positive.");

    let pd = load_pd(&args.input, args.mirror)?;
    let s = Scheduler::with_defaults(SchedulerConfig { yield_every: args.yield_every });

    let mut extra = vec![];
    extra.extend(args.cables);
    extra.extend(args.n);

    info!("compute {}{:?} of {pd}", args.name, extra);

    let d = Diagram::from_pd(pd);
    let v = s.get_invariant(&args.name, &d, &extra)?;

    Ok(v.to_string())
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args {
    /// Name of the invariant, e.g. `jones_poly`.
    pub name: String,

    pub input: String,

    #[arg(short, long)]
    pub cables: Option<i64>,

    #[arg(short, long)]
    pub n: Option<i64>,

    #[arg(short, long)]
    pub mirror: bool,

    #[arg(long, default_value = "8")]
    pub yield_every: usize,

    #[arg(long, default_value = "0")]
    pub log: u8,
}
