use log::info;
use clap::{Parser, Subcommand};
use knotlab::util::log::{init_simple_logger, level_from_verbosity};

use super::cmd::{export, identify, inv};
use super::utils::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Cmd
}

#[derive(Subcommand, Debug)]
#[clap(rename_all="lower")]
pub enum Cmd {
    /// Computes a named invariant.
    Inv(inv::Args),
    /// Writes the diagram in another notation.
    Export(export::Args),
    /// Looks the diagram up in a knot table.
    Identify(identify::Args),
}

impl CliArgs {
    fn log_level(&self) -> log::LevelFilter {
        let level = match &self.command {
            Cmd::Inv(args)      => args.log,
            Cmd::Export(args)   => args.log,
            Cmd::Identify(args) => args.log,
        };
        level_from_verbosity(level)
    }
}

pub struct App {
    pub args: CliArgs
}

impl App {
    pub fn new() -> Self {
        let args = CliArgs::parse();
        App { args }
    }

    pub fn run(&self) -> Result<String, Box<dyn std::error::Error>> {
        self.init_logger();

        info!("args: {:?}", self.args);

        let (res, time) = measure(||
            self.dispatch()
        );

        info!("time: {:?}", time);

        res
    }

    fn init_logger(&self) {
        let l = self.args.log_level();
        if init_simple_logger(l).is_err() {
            eprintln!("logger already initialized.");
        }
    }

    fn dispatch(&self) -> Result<String, Box<dyn std::error::Error>> {
        guard_panic(||
            match &self.args.command {
                Cmd::Inv(args)      => inv::dispatch(args),
                Cmd::Export(args)   => export::dispatch(args),
                Cmd::Identify(args) => identify::dispatch(args),
            }
        )
    }
}
