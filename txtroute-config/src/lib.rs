//! Loader for the group catalog with YAML + environment overlays.
//!
//! A catalog file looks like:
//!
//! ```yaml
//! version: "1"
//! groups:
//!   - id: "fire-team"
//!     name: "Fire Team"
//!   - id: "hotline"
//!     name: "Hotline"
//! ```
//!
//! Sources are merged in the order they are added, with `TXTROUTE_`-prefixed
//! environment variables (`__` as the nesting separator) applied first and
//! overridden by later files. String values may reference environment
//! variables as `$VAR` or `${VAR}`; unknown variables are left untouched.
use std::collections::HashSet;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use txtroute_core::{Group, normalize_name};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct TxtRouteConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
}

/// One catalog entry as written in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSpec {
    pub id: GroupKey,
    pub name: String,
}

/// Group ids may be written as strings or bare integers; both become text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    Text(String),
    Number(i64),
}

impl GroupKey {
    pub fn into_string(self) -> String {
        match self {
            GroupKey::Text(s) => s,
            GroupKey::Number(n) => n.to_string(),
        }
    }
}

/// Reasons a catalog is refused before it reaches the recognizer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate group id `{0}`")]
    DuplicateId(String),

    /// The name is empty or whitespace only, so it would match any input.
    #[error("group `{0}` has an empty name")]
    EmptyName(String),
}

impl TxtRouteConfig {
    /// Validate the entries and turn them into recognizer groups, keeping
    /// file order.
    ///
    /// ```
    /// use txtroute_config::{CatalogError, TxtRouteConfigLoader};
    ///
    /// let cfg = TxtRouteConfigLoader::new()
    ///     .with_yaml_str("groups:\n  - id: a\n    name: '  '\n")
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.catalog(), Err(CatalogError::EmptyName("a".into())));
    /// ```
    pub fn catalog(&self) -> Result<Vec<Group>, CatalogError> {
        let mut seen = HashSet::new();
        let mut groups = Vec::with_capacity(self.groups.len());

        for spec in &self.groups {
            let id = spec.id.clone().into_string();
            if normalize_name(&spec.name).is_empty() {
                return Err(CatalogError::EmptyName(id));
            }
            if !seen.insert(id.clone()) {
                return Err(CatalogError::DuplicateId(id));
            }
            groups.push(Group::new(id, spec.name.clone()));
        }

        tracing::debug!(groups = groups.len(), "group catalog validated");
        Ok(groups)
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct TxtRouteConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for TxtRouteConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TxtRouteConfigLoader {
    /// Start with the `TXTROUTE_` environment source and nothing else.
    ///
    /// ```
    /// use txtroute_config::TxtRouteConfigLoader;
    ///
    /// let config = TxtRouteConfigLoader::new()
    ///     .with_yaml_str("version: '1'\ngroups: []")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.groups.is_empty());
    /// ```
    pub fn new() -> Self {
        let builder = Config::builder().add_source(
            Environment::with_prefix("TXTROUTE")
                .prefix_separator("_")
                .separator("__"),
        );
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred from the suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is skipped when missing.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use txtroute_config::TxtRouteConfigLoader;
    ///
    /// let cfg = TxtRouteConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// groups:
    ///   - id: 12
    ///     name: "Fire Team"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// let groups = cfg.catalog().unwrap();
    /// assert_eq!(groups[0].id, "12");
    /// assert_eq!(groups[0].name, "Fire Team");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// `${VAR}` placeholders are expanded after merging, so a name can be
    /// supplied by the deployment environment:
    ///
    /// ```
    /// use txtroute_config::TxtRouteConfigLoader;
    ///
    /// unsafe { std::env::set_var("ONCALL_GROUP", "On Call"); }
    ///
    /// let config = TxtRouteConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// groups:
    ///   - id: "oncall"
    ///     name: "${ONCALL_GROUP}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.groups[0].name, "On Call");
    ///
    /// unsafe { std::env::remove_var("ONCALL_GROUP"); }
    /// ```
    pub fn load(self) -> Result<TxtRouteConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: TxtRouteConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
