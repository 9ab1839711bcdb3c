use clap::Parser;
use stable_match::core::{ConfigProvider, ReportSink};
use stable_match::utils::error::ErrorSeverity;
use stable_match::utils::{logger, validation::Validate};
use stable_match::{CliConfig, LocalSink, LocalSource, MatchEngine};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose.then_some("debug"));
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting stable-match");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let format = config.output_format();
    let sink = LocalSink::new(config.output_path());
    let source = LocalSource::new(config.input_path());
    let engine = MatchEngine::new(source, config);

    let result = engine
        .run()
        .and_then(|report| report.render(format))
        .and_then(|rendered| sink.write(&rendered));

    if let Err(e) = result {
        tracing::error!(
            "Matching failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    if let Some(path) = engine.config().output_path() {
        tracing::info!("Results saved to: {}", path);
    }

    Ok(())
}
