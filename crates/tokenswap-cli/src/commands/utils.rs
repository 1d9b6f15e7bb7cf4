use anyhow::{Context, Result};

/// Splits a `<actorId>-<mode>=<path>` argument into its form key and value.
pub fn parse_field(field: &str) -> Result<(String, String)> {
    let (key, value) = field
        .split_once('=')
        .with_context(|| format!("Expected <actorId>-<mode>=<path>, got '{field}'"))?;
    Ok((key.to_string(), value.to_string()))
}
