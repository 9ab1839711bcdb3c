use anyhow::Context;
use clap::Parser;
use stable_match::core::{ConfigProvider, PreferenceSource, ReportSink};
use stable_match::utils::error::ErrorSeverity;
use stable_match::utils::{logger, validation::Validate};
use stable_match::{LocalSink, LocalSource, MatchEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-match")]
#[command(about = "Stable matching driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "match.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the stability check setting from config
    #[arg(long)]
    verify: Option<bool>,

    /// Load and summarise the input without matching
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    if let Some(verify) = args.verify {
        config.matching.verify = Some(verify);
    }

    if config.log_json() {
        logger::init_json_logger(Some(if args.verbose { "debug" } else { config.log_level() }));
    } else if args.verbose {
        logger::init_cli_logger(true);
    } else {
        logger::init_with_level(config.log_level());
    }

    tracing::info!("Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("DRY RUN MODE - no matching will occur");
        return perform_dry_run(&config);
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
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    eprintln!("Configuration Summary:");
    eprintln!("  Input: {}", config.input_path());
    eprintln!(
        "  Proposer: {}",
        config.proposer().unwrap_or("first type in input")
    );
    eprintln!("  Format: {:?}", config.output_format());
    eprintln!("  Output: {}", config.output_path().unwrap_or("stdout"));
    eprintln!("  Verify: {}", config.verify_stability());
    if args.dry_run {
        eprintln!("  DRY RUN MODE ENABLED");
    }
    eprintln!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let loaded = LocalSource::new(config.input_path())
        .load()
        .with_context(|| format!("Failed to read preferences from '{}'", config.input_path()))?;

    println!("Dry Run Analysis:");
    for (index, group) in [&loaded.first, &loaded.second].into_iter().enumerate() {
        if group.kind.is_empty() {
            println!("  Group {}: missing", index + 1);
            continue;
        }
        let empty = group.iter().filter(|m| m.is_empty()).count();
        println!(
            "  Group {} ({}): {} agents, {} with no preferences",
            index + 1,
            group.kind,
            group.len(),
            empty
        );
    }
    println!("  Skipped lines: {}", loaded.skipped_lines);

    let proposing = config.proposer().unwrap_or(loaded.first.kind.as_str());
    println!("  Proposing group: {}", proposing);

    Ok(())
}
