use clap::Parser;
use markdown_toc_cli::{Cli, ExitCode, RunError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> std::process::ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match markdown_toc_cli::execute(cli) {
        Ok(_) => std::process::ExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            eprintln!("readme-toc error: {err}");
            let code = err
                .downcast_ref::<RunError>()
                .map(RunError::exit_code)
                .unwrap_or(ExitCode::Io);
            std::process::ExitCode::from(code as u8)
        }
    }
}
