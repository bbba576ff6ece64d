use cable_sizer::app::report;
use cable_sizer::config::layered::Overrides;
use cable_sizer::core::ConfigProvider;
use cable_sizer::utils::{logger, validation::Validate};
use cable_sizer::{CliConfig, LayeredConfig, SizingEngine, SizingError, TomlConfig};
use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::Write;

const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_NO_SUITABLE_CABLE: i32 = 2;

fn main() -> anyhow::Result<()> {
    let cli = match CliConfig::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(EXIT_INVALID_INPUT);
            }
        },
    };

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let file = match cli.config.as_deref() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            match load_config_file(path) {
                Ok(config) => Some(config),
                Err(e) => fail(&e),
            }
        }
        None => None,
    };
    let config = LayeredConfig::new(Overrides::from(&cli), file);

    let engine = match SizingEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => fail(&e),
    };

    if cli.list_cables {
        std::io::stdout()
            .write_all(report::render_catalog(engine.catalog()).as_bytes())
            .context("failed to write cable catalog")?;
        return Ok(());
    }

    let sizing = match engine.size(&config.load_spec()) {
        Ok(sizing) => sizing,
        Err(e) => fail(&e),
    };

    let output = match report::render(&sizing, config.output_format()) {
        Ok(output) => output,
        Err(e) => fail(&e),
    };
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|_| stdout.flush())
        .context("failed to write sizing report")?;

    if sizing.is_empty() {
        std::process::exit(EXIT_NO_SUITABLE_CABLE);
    }
    Ok(())
}

fn load_config_file(path: &str) -> cable_sizer::Result<TomlConfig> {
    cable_sizer::utils::validation::validate_path("config", path)?;
    let config = TomlConfig::from_file(path)?;
    config.validate()?;
    Ok(config)
}

fn fail(e: &SizingError) -> ! {
    tracing::error!(
        "Sizing failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    std::process::exit(EXIT_INVALID_INPUT);
}
