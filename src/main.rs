use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::{Arg, ArgMatches, Command};
use crossbeam_channel::{bounded, Sender};

use gmc_logger::{
    list_ports, print_setting, run_logger, runtime_info, FourByteMask, GmcError, LoggerConfig,
};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn handle_sigint(_: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Forwards Ctrl+C to the poll loop so that it stops between two cycles.
fn spawn_interrupt_watcher(terminator_tx: Sender<bool>) {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGINT, handle_sigint as libc::sighandler_t);
    }

    std::thread::spawn(move || loop {
        if INTERRUPTED.load(Ordering::SeqCst) {
            let _ = terminator_tx.send(true);
            return;
        }
        std::thread::sleep(Duration::from_millis(50));
    });
}

fn parse<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, GmcError> {
    let value = matches.value_of(name).unwrap_or_default();
    value
        .parse::<T>()
        .map_err(|_| GmcError::InvalidArgument(format!("--{} {}", name, value)))
}

fn parse_seconds(matches: &ArgMatches, name: &str) -> Result<Duration, GmcError> {
    let seconds: f64 = parse(matches, name)?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| GmcError::InvalidArgument(format!("--{} {}", name, seconds)))
}

fn to_config(matches: &ArgMatches) -> Result<LoggerConfig, GmcError> {
    let mut config = LoggerConfig::new(matches.value_of("port").unwrap_or_default())
        .with_baud_rate(parse(matches, "baud-rate")?)
        .with_timeout(parse_seconds(matches, "timeout")?)
        .with_cycle_interval(parse_seconds(matches, "cycle-time")?)
        .with_log_path(matches.value_of("log-file").unwrap_or_default());

    if let Some(signatures) = matches.values_of("four-byte-signature") {
        for signature in signatures {
            config = config.with_four_byte_signature(signature);
        }
    }
    if matches.is_present("mask-four-byte") {
        config = config.with_four_byte_mask(FourByteMask::ClearStatusBits);
    }
    if matches.is_present("cycles") {
        config = config.with_max_cycles(Some(parse(matches, "cycles")?));
    }
    Ok(config)
}

fn command() -> Command<'static> {
    Command::new("gmc_logger")
        .about("Logs CPM and CPS of a GQ GMC Geiger counter to a text file")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .help("The device path to a serial port")
                .takes_value(true)
                .default_value("/dev/ttyUSB0"),
        )
        .arg(
            Arg::new("baud-rate")
                .long("baud-rate")
                .short('b')
                .help("Typically 57600 or 115200")
                .takes_value(true)
                .default_value("57600"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Read timeout of the serial port in seconds")
                .takes_value(true)
                .default_value("3"),
        )
        .arg(
            Arg::new("cycle-time")
                .long("cycle-time")
                .short('c')
                .help("Seconds between two poll cycles")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .short('l')
                .help("Log file, cleared at start")
                .takes_value(true)
                .default_value("simple.log"),
        )
        .arg(
            Arg::new("four-byte-signature")
                .long("four-byte-signature")
                .help("Version string of a counter answering with 4 bytes, e.g. \"GMC-500+Re 1.21\"")
                .takes_value(true)
                .multiple_occurrences(true),
        )
        .arg(
            Arg::new("mask-four-byte")
                .long("mask-four-byte")
                .help("Clear the two highest bits of 4-byte CPS replies"),
        )
        .arg(
            Arg::new("cycles")
                .long("cycles")
                .help("Stop after this many cycles")
                .takes_value(true),
        )
}

fn exit_with(e: GmcError) -> ! {
    eprintln!("\nERROR:\n    {}", e);
    if let Some(hint) = e.remediation() {
        eprintln!("\n{}", hint);
    }
    std::process::exit(1);
}

fn main() {
    // decode failures are reported as warnings
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = command().get_matches();
    let config = match to_config(&matches) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    println!("\nUSB-to-Serial Ports found on this system:");
    let ports = match list_ports() {
        Ok(ports) => ports,
        Err(e) => exit_with(e),
    };
    for p in ports {
        println!("     {} - {:?}", p.port_name, p.port_type);
    }
    println!();

    print_setting(
        &format!("my Version of {}", env!("CARGO_PKG_NAME")),
        env!("CARGO_PKG_VERSION"),
    );
    print_setting("my Runtime", &runtime_info());
    println!();
    for (name, value) in config.settings() {
        print_setting(name, &value);
    }

    let (terminator_tx, terminator_rx) = bounded(10);
    spawn_interrupt_watcher(terminator_tx);

    if let Err(e) = run_logger(&config, &terminator_rx) {
        exit_with(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_of(args: &[&str]) -> Result<LoggerConfig, GmcError> {
        let matches = command()
            .try_get_matches_from(args)
            .map_err(|e| GmcError::InvalidArgument(e.to_string()))?;
        to_config(&matches)
    }

    #[test]
    fn test_defaults() {
        let config = config_of(&["gmc_logger"]).unwrap();
        let default = LoggerConfig::default();
        assert_eq!(config.port_name, default.port_name);
        assert_eq!(config.baud_rate, default.baud_rate);
        assert_eq!(config.timeout, default.timeout);
        assert_eq!(config.cycle_interval, default.cycle_interval);
        assert_eq!(config.log_path, default.log_path);
        assert_eq!(config.four_byte_signatures, default.four_byte_signatures);
        assert_eq!(config.four_byte_mask, FourByteMask::Unmasked);
        assert_eq!(config.max_cycles, None);
    }

    #[test]
    fn test_arguments() {
        let config = config_of(&[
            "gmc_logger",
            "--port",
            "COM3",
            "-b",
            "115200",
            "--timeout",
            "0.5",
            "--cycle-time",
            "2",
            "--log-file",
            "gmc.log",
            "--four-byte-signature",
            "GMC-500+Re 1.23",
            "--four-byte-signature",
            "GMC-600+Re 2.10",
            "--mask-four-byte",
            "--cycles",
            "5",
        ])
        .unwrap();
        assert_eq!(config.port_name, "COM3");
        assert_eq!(config.baud_rate, 115200);
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.cycle_interval, Duration::from_secs(2));
        assert_eq!(config.log_path, std::path::PathBuf::from("gmc.log"));
        assert_eq!(
            config.four_byte_signatures,
            vec![
                "GMC-500+Re 1.18",
                "GMC-500+Re 1.21",
                "GMC-500+Re 1.23",
                "GMC-600+Re 2.10"
            ]
        );
        assert_eq!(config.four_byte_mask, FourByteMask::ClearStatusBits);
        assert_eq!(config.max_cycles, Some(5));
    }

    #[test]
    fn test_invalid_arguments() {
        match config_of(&["gmc_logger", "--baud-rate", "fast"]) {
            Err(GmcError::InvalidArgument(m)) => assert_eq!(m, "--baud-rate fast"),
            _ => panic!("A non-numeric baud rate must be rejected"),
        }
        assert!(config_of(&["gmc_logger", "--cycle-time=-1"]).is_err());
        match config_of(&["gmc_logger", "--cycle-time", "1e30"]) {
            Err(GmcError::InvalidArgument(m)) => assert!(m.starts_with("--cycle-time ")),
            _ => panic!("A cycle time beyond the range of Duration must be rejected"),
        }
        assert!(config_of(&["gmc_logger", "--timeout", "NaN"]).is_err());
        assert!(config_of(&["gmc_logger", "--cycles", "many"]).is_err());
    }
}
