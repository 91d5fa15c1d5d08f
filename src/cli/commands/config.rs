//! Config command handler

use super::fail;
use crate::args::ConfigSubcommand;
use grade_target::core::config::Config;
use grade_target::logger::info;
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let ok = match subcommand {
        None => show(config, None),
        Some(ConfigSubcommand::Get { key }) => show(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(),
    };
    if !ok {
        std::process::exit(1);
    }
}

fn show(config: &Config, key: Option<&str>) -> bool {
    let Some(key) = key else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
        return true;
    };
    match config.get(key) {
        Some(value) => {
            println!("{value}");
            true
        }
        None => fail("Unknown config key", &format!("'{key}'")),
    }
}

fn set(config: &mut Config, key: &str, value: &str) -> bool {
    if let Err(e) = config.set(key, value) {
        return fail("Invalid setting", &e);
    }
    if let Err(e) = config.save() {
        return fail("Failed to save config", &e);
    }
    info!("Config {key} set to {value}");
    println!("✓ Set {key} = {value}");
    true
}

fn unset(config: &mut Config, defaults: &Config, key: &str) -> bool {
    if let Err(e) = config.unset(key, defaults) {
        return fail("Invalid setting", &e);
    }
    if let Err(e) = config.save() {
        return fail("Failed to save config", &e);
    }
    println!("✓ Reset {key} to default");
    true
}

fn reset() -> bool {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return true;
    }

    print!("Reset configuration to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();

    if response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            return fail("Failed to remove config file", &e);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    true
}
