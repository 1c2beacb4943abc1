use std::path::{Path, PathBuf};
use std::time::Duration;

use poliza_backend::BackendConfig;
use poliza_backend::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 2;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolizaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub backend_url: String,
    /// Added in v2.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    pub created_at: jiff::Timestamp,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for PolizaConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            backend_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl PolizaConfig {
    /// Client settings, with `override_url` (flag or environment) taking
    /// precedence over the file.
    pub fn backend(&self, override_url: Option<&str>) -> BackendConfig {
        let base_url = override_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.backend_url);
        BackendConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("poliza"))
}

/// Load `config.json` from `dir`, or defaults when there is none yet.
pub fn load_or_default(dir: &Path) -> eyre::Result<PolizaConfig> {
    if dir.join("config.json").exists() {
        load_config(dir)
    } else {
        Ok(PolizaConfig::default())
    }
}

pub fn load_config(dir: &Path) -> eyre::Result<PolizaConfig> {
    let path = dir.join("config.json");
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: PolizaConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update poliza."
        ));
    }

    let obj = json
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

    // v0 → v1: `api_url` renamed to `backend_url`
    if from_version < 1 {
        let url = obj
            .remove("api_url")
            .unwrap_or_else(|| serde_json::Value::String(DEFAULT_BASE_URL.to_string()));
        obj.entry("backend_url").or_insert(url);
        obj.entry("created_at")
            .or_insert_with(|| serde_json::Value::String(jiff::Timestamp::now().to_string()));
        obj.insert("config_version".to_string(), 1.into());
        tracing::info!("migrated config v0 → v1 (api_url renamed to backend_url)");
    }

    // v1 → v2: add request_timeout_secs
    if from_version < 2 {
        obj.entry("request_timeout_secs")
            .or_insert(DEFAULT_TIMEOUT_SECS.into());
        obj.insert("config_version".to_string(), 2.into());
        tracing::info!("migrated config v1 → v2 (added request_timeout_secs)");
    }

    Ok(json)
}

pub fn save_config(dir: &Path, config: &PolizaConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
