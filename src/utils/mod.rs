use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::builders::importer::{FileImporter, ListImporter};
use crate::builders::reporter::{ConsoleReporter, StatusReporter};
use crate::builders::validator::{ListChecker, ListValidator};
use crate::core::config::{ConfigManager, ConfigProvider, ConverterConfig, DEFAULT_CONFIG_FILE};
use crate::core::engine::ConversionEngine;

/// Overrides given on the command line; they win over the config file.
#[derive(Debug, Default, Clone)]
pub struct ConvertOptions {
    pub config: Option<String>,
    pub pretty: bool,
    pub max_rules: Option<usize>,
}

pub fn initialize_config(path: Option<&str>) -> Result<()> {
    let config_manager = ConfigManager::new_at(path.unwrap_or(DEFAULT_CONFIG_FILE));
    if config_manager.initialize()? {
        println!(
            "✓ Wrote default configuration to {}",
            config_manager.get_config_path().display()
        );
    } else {
        println!(
            "✓ Configuration {} already exists, left unchanged",
            config_manager.get_config_path().display()
        );
    }
    Ok(())
}

/// Converts `input` and writes the JSON array to `output`, or stdout when
/// no output path is given.
pub fn convert_list(input: &str, output: Option<&str>, options: &ConvertOptions) -> Result<()> {
    let config = resolve_config(options)?;
    let engine = ConversionEngine::from_config(&config);

    let content = FileImporter::new().import_list(input)?;
    let conversion = engine.convert(&content);
    let json = engine.render(&conversion.rules)?;

    match output {
        Some(path) => {
            write_output(Path::new(path), &json)?;
            println!(
                "✓ Converted {} rules from {} into {}",
                conversion.stats.rules, input, path
            );
            if conversion.stats.truncated_rules > 0 {
                eprintln!(
                    "⚠️  {} rules dropped by max_rules",
                    conversion.stats.truncated_rules
                );
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Prints statistics and diagnostics for `input` without writing any JSON.
pub fn check_list(input: &str, config_path: Option<&str>, verbose: bool) -> Result<()> {
    let config = resolve_config(&ConvertOptions {
        config: config_path.map(str::to_string),
        ..ConvertOptions::default()
    })?;
    let engine = ConversionEngine::from_config(&config);

    let content = FileImporter::new().import_list(input)?;
    let conversion = engine.convert(&content);
    let diagnostics =
        ListValidator::new(engine.classifier(), engine.builder()).check_list(&content);

    ConsoleReporter::new(verbose || config.verbose).generate_report(
        input,
        &conversion.stats,
        &diagnostics,
    )
}

fn resolve_config(options: &ConvertOptions) -> Result<ConverterConfig> {
    let mut config = match &options.config {
        Some(path) => {
            info!("Loading configuration from {path}");
            ConfigManager::new_at(path).load_validated()?
        }
        None => ConverterConfig::default(),
    };

    if options.pretty {
        config.output.pretty = true;
    }
    if options.max_rules.is_some() {
        config.output.max_rules = options.max_rules;
    }
    Ok(config)
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write rules to {}", path.display()))
}
