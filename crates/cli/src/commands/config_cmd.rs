//! `stacksim config` — Configuration management commands.

use stacksim_config::{AppConfig, InitialDataMode};

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let warnings = warnings(&config);
            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Capacity:      {}", config.launcher.capacity);
            println!("   Initial data:  {}", config.launcher.initial_data);
            println!(
                "   Value range:   {}..={}",
                config.launcher.value_min, config.launcher.value_max
            );
            println!(
                "   Animation:     {}",
                if config.display.animate { "on" } else { "off" }
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

/// Settings that are valid but probably not what the user meant.
fn warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    let launcher = &config.launcher;

    if launcher.initial_data == InitialDataMode::Random
        && launcher.random_count > launcher.capacity
    {
        warnings.push(format!(
            "random_count ({}) exceeds capacity ({}); only {} values will be seeded",
            launcher.random_count, launcher.capacity, launcher.capacity
        ));
    }

    if launcher.initial_data == InitialDataMode::Empty && launcher.seed.is_some() {
        warnings.push("seed is set but initial_data is \"empty\"; it has no effect".into());
    }

    if !config.display.animate
        && (config.display.push_delay_ms > 0 || config.display.pop_delay_ms > 0)
    {
        warnings.push("Delays are ignored while animate = false".into());
    }

    warnings
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
