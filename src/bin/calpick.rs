extern crate calpick as lib;

use chrono::NaiveDate;
use flexi_logger::{FileSpec, Logger};
use lib::calendar::Calendar;
use lib::events::Dispatcher;
use lib::ui::{month_pane, App};
use lib::CalendarProps;
use nix::sys::termios;
use std::io::{stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use termion::input::MouseTerminal;
use unsegen::base::Terminal;

fn parse_date(src: &str) -> lib::error::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(src, "%Y-%m-%d")?)
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "calpick",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Pick a date from a month calendar in the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the month non-interactively"
    )]
    pub show: bool,

    #[structopt(
        long = "value",
        help = "run controlled, starting at this date (YYYY-MM-DD)",
        parse(try_from_str = parse_date)
    )]
    pub value: Option<NaiveDate>,

    #[structopt(
        long = "default",
        help = "initial date of an uncontrolled picker (YYYY-MM-DD)",
        parse(try_from_str = parse_date)
    )]
    pub default: Option<NaiveDate>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    if args.value.is_some() && args.default.is_some() {
        log::warn!("--value makes the picker controlled, ignoring --default");
    }

    if args.show {
        let calendar = Calendar::new(
            CalendarProps::new()
                .value_opt(args.value)
                .default_value_opt(args.default),
        );
        println!("{}", month_pane::render_plain(&calendar, &config.theme));
        return Ok(());
    }

    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(
        termios::tcgetattr(STDIN).expect("Failed to get terminal attributes"),
    );

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &orig_attr.lock().unwrap());

        println!("calpick ran into a fatal error!");
        println!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let app = match args.value {
        Some(value) => App::controlled(&config, value),
        None => App::uncontrolled(&config, args.default),
    };

    // Mouse reporting stays on until this guard is dropped
    let mut mouse = MouseTerminal::from(stdout());
    mouse.flush()?;

    let dispatcher = Dispatcher::from_config(&config);
    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    app.run(dispatcher, term)?;
    drop(mouse);

    println!("{}", app.handle().get_date().format("%Y-%m-%d"));

    Ok(())
}
