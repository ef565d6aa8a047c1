//! # AMT WS-Management Configuration Module
//!
//! This module provides the configuration used when building WS-Management
//! messages, including:
//! - Loading configuration from YAML files
//! - Merging with embedded default configuration
//! - Environment variable overrides
//! - Type-safe getters and setters for configuration values
//! - Thread-safe singleton access pattern
//!
//! Unlike a server configuration, nothing here is ever written back to disk:
//! setters only change the in-memory tree.
//!
//! ## Usage
//!
//! ```no_run
//! use amtconfig::get_config;
//!
//! let config = get_config();
//! let timeout = config.get_operation_timeout();
//! let max_elements = config.get_pull_max_elements();
//! ```

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Number, Value};
use std::{
    env, fs,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::{info, warn};

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("amtwsman.yaml");

lazy_static! {
    static ref CONFIG: Arc<Config> = Arc::new(Config::load_config("").unwrap_or_else(|err| {
        warn!(error=%err, "Failed to load WS-Management configuration, using embedded defaults");
        Config::defaults()
    }));
}

const ENV_CONFIG_FILE: &str = "AMTWSMAN_CONFIG";
const ENV_PREFIX: &str = "AMTWSMAN_CONFIG__";

// Default values for configuration
pub const DEFAULT_TARGET_ADDRESS: &str = "/wsman";
pub const DEFAULT_REPLY_TO_ADDRESS: &str =
    "http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous";
pub const DEFAULT_OPERATION_TIMEOUT: &str = "PT60S";
pub const DEFAULT_PULL_MAX_ELEMENTS: u32 = 999;
pub const DEFAULT_PULL_MAX_CHARACTERS: u32 = 99999;

/// Macro to generate getter/setter for non-empty string values with default
macro_rules! impl_string_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> String {
            match self.get_value($path) {
                Ok(Value::String(s)) if !s.trim().is_empty() => s,
                Ok(other) => {
                    warn!(
                        path=%$path.join("."),
                        value=?other,
                        "Invalid configuration value, using default {}",
                        $default
                    );
                    $default.to_string()
                }
                Err(err) => {
                    warn!(
                        "Failed to get {}: {}, using default {}",
                        $path.join("."),
                        err,
                        $default
                    );
                    $default.to_string()
                }
            }
        }

        pub fn $setter(&self, value: String) -> Result<()> {
            self.set_value($path, Value::String(value))
        }
    };
}

/// Macro to generate getter/setter for u32 values with default
macro_rules! impl_u32_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> u32 {
            match self.get_value($path) {
                Ok(value) => match value_as_u32(&value) {
                    Some(n) => n,
                    None => {
                        warn!(
                            path=%$path.join("."),
                            value=?value,
                            "Invalid configuration value, using default {}",
                            $default
                        );
                        $default
                    }
                },
                Err(err) => {
                    warn!(
                        "Failed to get {}: {}, using default {}",
                        $path.join("."),
                        err,
                        $default
                    );
                    $default
                }
            }
        }

        pub fn $setter(&self, value: u32) -> Result<()> {
            self.set_value($path, Value::Number(Number::from(value)))
        }
    };
}

/// Configuration manager for WS-Management message construction
///
/// This structure manages the configuration, including:
/// - Loading configuration from a YAML file
/// - Merging with default configuration
/// - Handling environment variable overrides
/// - Providing typed getters/setters for configuration values
///
/// # Examples
///
/// ```no_run
/// use amtconfig::get_config;
///
/// let config = get_config();
/// println!("Target: {}", config.get_target_address());
/// ```
#[derive(Debug)]
pub struct Config {
    path: Option<String>,
    data: Mutex<Value>,
}

// Implémentation manuelle de Clone
impl Clone for Config {
    fn clone(&self) -> Self {
        let data = match self.data.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Self {
            path: self.path.clone(),
            data: Mutex::new(data),
        }
    }
}

impl Config {
    /// Finds the config file by trying different locations in order
    fn find_config_file(file: &str) -> Option<String> {
        // 1. Try provided file
        if !file.is_empty() {
            return Some(file.to_string());
        }

        // 2. Try environment variable
        if let Ok(env_path) = env::var(ENV_CONFIG_FILE) {
            info!(env_var=ENV_CONFIG_FILE, path=%env_path, "Trying to load config from env");
            return Some(env_path);
        }

        None
    }

    /// Builds a configuration holding only the embedded defaults
    pub fn defaults() -> Self {
        let data = serde_yaml::from_str::<Value>(DEFAULT_CONFIG)
            .map(Self::lower_keys_value)
            .unwrap_or_else(|_| Value::Mapping(Mapping::new()));
        Config {
            path: None,
            data: Mutex::new(data),
        }
    }

    /// Loads the configuration
    ///
    /// This method:
    /// 1. Loads the default embedded configuration
    /// 2. Merges it with the external YAML file if present
    /// 3. Applies environment variable overrides
    ///
    /// # Arguments
    ///
    /// * `file` - Path of a YAML file, or empty to look at `$AMTWSMAN_CONFIG`
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing the loaded `Config` or an error
    pub fn load_config(file: &str) -> Result<Self> {
        // Charger la configuration par défaut
        let mut default_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        let path = Self::find_config_file(file);

        // Essayer de charger le fichier de configuration
        if let Some(path) = path.as_deref() {
            if Path::new(path).exists() {
                let data = fs::read(path)?;
                let external_value: Value = serde_yaml::from_slice(&data)?;
                merge_yaml(&mut default_value, &Self::lower_keys_value(external_value));
                info!(config_file=%path, "Loaded config file");
            } else {
                info!(config_file=%path, "Config file not found, using default embedded config");
            }
        }

        let mut config_value = Self::lower_keys_value(default_value);

        // Appliquer les overrides depuis les variables d'environnement
        Self::apply_env_overrides(&mut config_value, env::vars());

        Ok(Config {
            path,
            data: Mutex::new(config_value),
        })
    }

    /// Builds a configuration from YAML text merged over the embedded defaults
    ///
    /// Environment variables are not consulted.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut default_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;
        let external_value: Value = serde_yaml::from_str(yaml)?;
        merge_yaml(&mut default_value, &Self::lower_keys_value(external_value));
        Ok(Config {
            path: None,
            data: Mutex::new(Self::lower_keys_value(default_value)),
        })
    }

    /// Path of the external file this configuration was read from, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Sets a configuration value at the specified path
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["wsman", "pull", "max_elements"]`)
    /// * `value` - The YAML value to set
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|_| anyhow!("Configuration lock poisoned"))?;
        Self::set_value_internal(&mut data, path, value)
    }

    fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
        if path.is_empty() {
            *data = value;
            return Ok(());
        }
        if let Value::Mapping(map) = data {
            let key = path[0].to_lowercase();
            let key_value = Value::String(key.clone());
            if path.len() == 1 {
                map.insert(key_value, value);
            } else {
                let entry = map
                    .entry(key_value)
                    .or_insert(Value::Mapping(Mapping::new()));
                Self::set_value_internal(entry, &path[1..], value)?;
            }
            Ok(())
        } else {
            Err(anyhow!("Current node is not a map"))
        }
    }

    /// Gets a configuration value at the specified path
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing the YAML value or an error if the path doesn't exist
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self
            .data
            .lock()
            .map_err(|_| anyhow!("Configuration lock poisoned"))?;
        Self::get_value_internal(&data, path)
    }

    fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
        let mut current = data;
        for (i, key) in path.iter().enumerate() {
            if let Value::Mapping(map) = current {
                let key = key.to_lowercase();

                if let Some(next) = map.get(&Value::String(key)) {
                    current = next;
                } else {
                    return Err(anyhow!("Path {} does not exist", path[..=i].join(".")));
                }
            } else {
                return Err(anyhow!("Path {} is not a Config", path[..i].join(".")));
            }
        }
        Ok(current.clone())
    }

    /// Deserializes a whole configuration section into a typed structure
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use amtconfig::{get_config, PullSettings};
    ///
    /// let pull: PullSettings = get_config().get_section(&["wsman", "pull"]).unwrap();
    /// ```
    pub fn get_section<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T> {
        let value = self.get_value(path)?;
        serde_yaml::from_value(value)
            .map_err(|err| anyhow!("Invalid section {}: {}", path.join("."), err))
    }

    fn apply_env_overrides<I>(config: &mut Value, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if key.starts_with(ENV_PREFIX) {
                let key_path = key
                    .trim_start_matches(ENV_PREFIX)
                    .split("__")
                    .collect::<Vec<_>>();
                let yaml_value = Self::convert_env_value(&value);
                if let Err(err) = Self::set_value_internal(config, &key_path, yaml_value) {
                    warn!(env_var=%key, error=%err, "Ignoring environment override");
                }
            }
        }
    }

    fn convert_env_value(value: &str) -> Value {
        if let Ok(parsed) = serde_yaml::from_str::<Value>(value) {
            return parsed;
        }
        Value::String(value.to_string())
    }

    fn lower_keys_value(value: Value) -> Value {
        match value {
            Value::Mapping(map) => {
                let mut new_map = Mapping::new();
                for (k, v) in map {
                    if let Value::String(s) = k {
                        let new_key = Value::String(s.to_lowercase());
                        let new_val = Self::lower_keys_value(v);
                        new_map.insert(new_key, new_val);
                    } else {
                        new_map.insert(k, Self::lower_keys_value(v));
                    }
                }
                Value::Mapping(new_map)
            }
            Value::Sequence(seq) => {
                Value::Sequence(seq.into_iter().map(Self::lower_keys_value).collect())
            }
            _ => value,
        }
    }

    impl_string_config!(
        get_target_address,
        set_target_address,
        &["wsman", "header", "target_address"],
        DEFAULT_TARGET_ADDRESS
    );

    impl_string_config!(
        get_reply_to_address,
        set_reply_to_address,
        &["wsman", "header", "reply_to_address"],
        DEFAULT_REPLY_TO_ADDRESS
    );

    impl_string_config!(
        get_operation_timeout,
        set_operation_timeout,
        &["wsman", "header", "operation_timeout"],
        DEFAULT_OPERATION_TIMEOUT
    );

    impl_u32_config!(
        get_pull_max_elements,
        set_pull_max_elements,
        &["wsman", "pull", "max_elements"],
        DEFAULT_PULL_MAX_ELEMENTS
    );

    impl_u32_config!(
        get_pull_max_characters,
        set_pull_max_characters,
        &["wsman", "pull", "max_characters"],
        DEFAULT_PULL_MAX_CHARACTERS
    );

    /// Taille maximale d'enveloppe annoncée dans l'en-tête, si configurée
    pub fn get_max_envelope_size(&self) -> Option<u32> {
        match self.get_value(&["wsman", "header", "max_envelope_size"]) {
            Ok(Value::Null) | Err(_) => None,
            Ok(value) => {
                let size = value_as_u32(&value);
                if size.is_none() {
                    warn!(value=?value, "Invalid max_envelope_size, element will be omitted");
                }
                size
            }
        }
    }

    /// Définit la taille maximale d'enveloppe (`None` pour omettre l'élément)
    pub fn set_max_envelope_size(&self, size: Option<u32>) -> Result<()> {
        let value = match size {
            Some(n) => Value::Number(Number::from(n)),
            None => Value::Null,
        };
        self.set_value(&["wsman", "header", "max_envelope_size"], value)
    }
}

/// Limits applied to every Pull request (`wsman.pull`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PullSettings {
    #[serde(default = "default_pull_max_elements")]
    pub max_elements: u32,
    #[serde(default = "default_pull_max_characters")]
    pub max_characters: u32,
}

impl Default for PullSettings {
    fn default() -> Self {
        Self {
            max_elements: DEFAULT_PULL_MAX_ELEMENTS,
            max_characters: DEFAULT_PULL_MAX_CHARACTERS,
        }
    }
}

fn default_pull_max_elements() -> u32 {
    DEFAULT_PULL_MAX_ELEMENTS
}

fn default_pull_max_characters() -> u32 {
    DEFAULT_PULL_MAX_CHARACTERS
}

fn value_as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Returns the global configuration instance
///
/// The instance is lazily loaded on first access and shared afterwards.
///
/// # Examples
///
/// ```no_run
/// use amtconfig::get_config;
///
/// let config = get_config();
/// let timeout = config.get_operation_timeout();
/// ```
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

/// Merges external YAML configuration into default configuration
///
/// - For mappings (objects), it merges keys from external into default
/// - For scalars and sequences, external values replace default values
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(), // pour les scalaires ou séquences, on remplace
    }
}
