use log::LevelFilter;

/// Installs a terminal logger at level `l`. 
/// Location, target and thread columns are turned off.
pub fn init_simple_logger(l: LevelFilter) -> Result<(), log::SetLoggerError> { 
    use simplelog::*;

    let mut cb = ConfigBuilder::new();
    cb.set_location_level(LevelFilter::Off);
    cb.set_target_level(LevelFilter::Off);
    cb.set_thread_level(LevelFilter::Off);
    cb.set_level_color(Level::Trace, Some(Color::Green));
    let config = cb.build();

    TermLogger::init(
        l,
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto
    )
}

/// `0..=3` to `Off`, `Info`, `Debug`, `Trace`.
pub fn level_from_verbosity(v: u8) -> LevelFilter { 
    match v {
        0 => LevelFilter::Off,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
