// This file is the module declaration file for the `core` module.

// `config` module:
// Defines `ConverterConfig` (rule policy and output settings), the
// `ConfigProvider` trait and the `ConfigManager` that loads and saves the
// config as TOML, YAML or JSON.
pub mod config;
pub mod engine;
