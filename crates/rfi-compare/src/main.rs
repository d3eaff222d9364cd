//! rfi-compare: compare two RFI scenarios against ITU compliance limits.

use rfi_cli::CliComparisonPresenter;
use rfi_compare_lib::{app, config, errors};
use rfi_orchestration::ComparisonPresenter;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = config::AppConfig::parse();
    if let Err(err) = app::run(&config) {
        CliComparisonPresenter::new(config.verbose, config.quiet).present_error(&format!("{err:#}"));
        std::process::exit(errors::exit_code(&err));
    }
}
