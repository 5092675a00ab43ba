use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use scl90_core::models::respondent::Sex;
use scl90_export::styles::ReportStyles;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scl90Config {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Prefills the evaluator field of the form.
    #[serde(default)]
    pub default_evaluator: Option<String>,
    /// Preselected sex on the form.
    #[serde(default)]
    pub default_sex: Sex,
    /// Where reports are saved when no output path is given. Falls back to
    /// the desktop, then the working directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub report: ReportStyles,
}

impl Default for Scl90Config {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            default_evaluator: None,
            default_sex: Sex::default(),
            output_dir: None,
            report: ReportStyles::default(),
        }
    }
}

impl Scl90Config {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(dirs::desktop_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("scl90"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config at `path`, or the default path when `None`. A missing
/// file yields the defaults.
pub fn load_config(path: Option<&Path>) -> eyre::Result<Scl90Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Scl90Config::default());
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: Scl90Config = serde_json::from_value(migrated)?;
    tracing::debug!(path = %path.display(), version = config.config_version, "config loaded");
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update scl90."
        ));
    }

    let obj = json
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

    // v0 → v1: stamp the version; the report section is filled by serde defaults
    if from_version < 1 {
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1");
    }

    Ok(json)
}

/// Save to `path`, or the default path when `None`. Returns the path written.
pub fn save_config(config: &Scl90Config, path: Option<&Path>) -> eyre::Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_versioned_config_is_stamped() {
        let json = serde_json::json!({ "default_evaluator": "Dr. Ruiz" });
        let migrated = migrate(json, 0).unwrap();
        assert_eq!(migrated["config_version"], 1);
        assert_eq!(migrated["default_evaluator"], "Dr. Ruiz");
    }

    #[test]
    fn newer_config_is_rejected() {
        let json = serde_json::json!({ "config_version": 99 });
        let err = migrate(json, 99).unwrap_err();
        assert!(err.to_string().contains("newer than this build"));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(migrate(serde_json::json!([1, 2]), 0).is_err());
    }
}
