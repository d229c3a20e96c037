use clap::Parser;

use watchlist::cli::{self, Args};
use watchlist::config::Config;
use watchlist::exitcode;
use watchlist::store::SupabaseStore;
use watchlist::watchlist::Watchlist;

/// Route `log` output to stderr; `-v` flags raise the default level,
/// `RUST_LOG` still wins when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exitcode::CONFIG);
        }
    };

    let store = match SupabaseStore::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };
    let watchlist = Watchlist::new(store);

    match cli::execute(&watchlist, &args.command).await {
        Ok(report) => println!("{}", report),
        Err(e) => {
            log::debug!("Command failed: {:?}", e);
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
