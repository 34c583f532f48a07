use vsixpack::config::Config;
use vsixpack::core::path::config_file;
use vsixpack::core::VsixResult;

pub fn show() -> VsixResult<()> {
    let config = Config::load()?;
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

pub fn path() -> VsixResult<()> {
    let path = config_file()?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("  (not created yet, defaults in use)");
    }
    Ok(())
}

pub fn set(key: &str, value: &str) -> VsixResult<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    println!("✓ Set {} = {}", key, value);
    Ok(())
}
