//! tsproj binary entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tsproj::cli::{self, Cli};
use tsproj::ui::output;

/// Install the tracing subscriber.
///
/// `TSPROJ_LOG` takes an `EnvFilter` directive; `TSPROJ_LOG_FORMAT=json`
/// switches to JSON lines. Logs go to stderr so stdout stays parseable.
fn init_tracing(debug: bool) {
    let fallback = if debug { "tsproj=debug" } else { "tsproj=warn" };
    let filter = EnvFilter::try_from_env("TSPROJ_LOG").unwrap_or_else(|_| fallback.into());
    let log_format = std::env::var("TSPROJ_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    if let Err(e) = cli::run(cli) {
        output::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
