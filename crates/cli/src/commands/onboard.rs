//! `stacksim onboard` — First-time setup.

use std::path::Path;

use stacksim_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("StackSim — First-Time Setup");
    println!("===========================\n");

    let written = write_default_config(&AppConfig::config_dir())?;
    let config_path = AppConfig::config_path();

    if written {
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Edit {} to pick a capacity and seed data", config_path.display());
        println!("   2. Run: stacksim run\n");
    } else {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    }

    Ok(())
}

/// Create `dir` and a default `config.toml` inside it unless one exists.
///
/// Returns whether a file was written.
fn write_default_config(dir: &Path) -> std::io::Result<bool> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        println!("✅ Created config directory: {}", dir.display());
    } else {
        println!("  Config directory exists: {}", dir.display());
    }

    let config_path = dir.join("config.toml");
    if config_path.exists() {
        return Ok(false);
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_default_config_once() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".stacksim");

        assert!(write_default_config(&dir).unwrap());
        let config = AppConfig::load_from(&dir.join("config.toml")).unwrap();
        assert_eq!(config.launcher.capacity, 10);

        std::fs::write(dir.join("config.toml"), "[launcher]\ncapacity = 6\n").unwrap();
        assert!(!write_default_config(&dir).unwrap());
        let config = AppConfig::load_from(&dir.join("config.toml")).unwrap();
        assert_eq!(config.launcher.capacity, 6);
    }
}
