//! ggi CLI binary entry point.

use clap::Parser;
use ggi::auth::AuthService;
use ggi::cli::{auth, Cli, Commands};
use ggi::config::GgiConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// The login flow is a strictly sequential, user-attended loop.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = GgiConfig::from_env();
    let service = AuthService::from_config(&config);

    let result = match cli.command {
        Commands::Login => auth::handle_login(&service).await,
        Commands::Whoami => auth::handle_whoami(&service).await,
        Commands::Info => auth::handle_info(&service).await,
        Commands::Logout => auth::handle_logout(&service),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr. `--verbose` wins over `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("ggi=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
