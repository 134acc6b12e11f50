//! Path resolution for the machine configuration file.
//!
//! Supports absolute paths, "~" home directory expansion, XDG config-home
//! lookup, and a home-based default location.

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{McfgError, Result};

/// Directory name under the user's config directory.
pub const APP_DIR: &str = "mcfg";

/// Default configuration file name.
pub const DEFAULT_CONFIG_NAME: &str = "machine.json";

/// Resolve the user's home directory, preferring `$HOME`.
pub fn home_dir() -> Result<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .ok_or(McfgError::NoHomeDir)
}

/// Resolve a requested configuration file name to a concrete path.
///
/// Resolution rules:
/// 1. Names starting with `~` are expanded to the home directory first
/// 2. Absolute paths: used as-is
/// 3. `$XDG_CONFIG_HOME/<name>`, if that file exists
/// 4. `$HOME/.config/mcfg/<name>`, if a home directory is known
/// 5. Otherwise `<name>` relative to the current working directory
pub fn resolve_config_path(name: &str) -> Result<PathBuf> {
    trace!(name = %name, "Resolving config path");

    // Home directory expansion
    if name == "~" || name.starts_with("~/") {
        let home = home_dir()?;
        let rest = name.strip_prefix("~/").unwrap_or("");
        let resolved = if rest.is_empty() { home } else { home.join(rest) };
        debug!(name = %name, resolved = %resolved.display(), "Expanded home directory path");
        return Ok(resolved);
    }

    // Absolute path
    let path = Path::new(name);
    if path.is_absolute() {
        debug!(path = %path.display(), "Using absolute path as-is");
        return Ok(path.to_path_buf());
    }

    // XDG config home, only when the file is already there
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        let candidate = PathBuf::from(xdg).join(name);
        if candidate.exists() {
            debug!(path = %candidate.display(), "Using existing XDG config path");
            return Ok(candidate);
        }
    }

    // Home-based default location
    if let Some(home) = env::var_os("HOME") {
        let resolved = PathBuf::from(home).join(".config").join(APP_DIR).join(name);
        debug!(path = %resolved.display(), "Using home config path");
        return Ok(resolved);
    }

    // Last resort: relative to the current working directory
    debug!(path = %path.display(), "No home directory, using working-directory path");
    Ok(path.to_path_buf())
}
