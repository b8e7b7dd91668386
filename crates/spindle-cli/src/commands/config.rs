use anyhow::Result;
use spindle_catalog::{config, Config};

#[derive(Debug, clap::Subcommand)]
pub enum ConfigCommand {
    /// Show the current effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with commented defaults
    Init,
    /// Print an example configuration
    Example,
}

pub fn run_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Path => show_path(),
        ConfigCommand::Init => init_config(),
        ConfigCommand::Example => show_example(),
    }
}

/// Show the current effective configuration.
fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    print!("{}", config.to_redacted_toml()?);

    println!("\nPriority: CLI args > saved credentials > ENV vars (SPINDLE_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure spindle.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
