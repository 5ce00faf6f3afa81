use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infosweb::cli::Cli;
use infosweb::{commands, config, InfoswebClient, InfoswebError};

#[tokio::main]
async fn main() -> ExitCode {
    // `.env` first, so RUST_LOG and INFOSWEB_LOG_FORMAT set there apply to logging too.
    config::load_dotenv();
    init_tracing();

    let args = Cli::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<InfoswebError>()
                .map(InfoswebError::exit_code)
                .unwrap_or(1);
            eprintln!("Error: {:#}", e);
            ExitCode::from(code)
        }
    }
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let cfg = config::load(args.overrides())?;
    let client = InfoswebClient::new(cfg)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(&client, args.command, &mut out).await
}

/// Logs go to stderr so stdout only ever carries command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("infosweb=warn"));
    let json = json_log_format(std::env::var("INFOSWEB_LOG_FORMAT").ok().as_deref());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn json_log_format(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}
