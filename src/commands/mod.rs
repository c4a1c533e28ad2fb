pub mod countdown;
pub mod preview;
pub mod run;
pub mod simulate;

// Re-export command functions for convenience
pub use countdown::countdown;
pub use preview::preview;
pub use run::run;
pub use simulate::{simulate, HoverWindow};

use anyhow::{Context, Result};
use std::path::Path;

use utility_bar::config::{parse_attribute, Config};

/// Load the configuration file (if any) and layer `key=value` attributes on top
pub fn load_config(path: Option<&Path>, attributes: &[String]) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    };

    for pair in attributes {
        let (key, value) = parse_attribute(pair)?;
        config.bar.apply_attribute(&key, &value);
    }
    Ok(config)
}
