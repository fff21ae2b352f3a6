// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider registry.
//!
//! `PluginRegistry` stores [`PluginEntry`] records keyed by provider name.
//! Each entry holds a manifest, a status, and an optional factory that builds
//! the live [`ProviderAdapter`] from the loaded configuration.

use std::collections::HashMap;
use std::sync::Arc;

use goliath_config::GoliathConfig;
use goliath_core::{GoliathError, ProviderAdapter};

use crate::credentials::resolve_api_key;
use crate::manifest::PluginManifest;

/// Status of a provider in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginStatus {
    /// Provider can be selected.
    Enabled,
    /// Provider was explicitly switched off.
    Disabled,
    /// Compiled in but missing a credential.
    NotConfigured,
}

impl std::fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginStatus::Enabled => write!(f, "enabled"),
            PluginStatus::Disabled => write!(f, "disabled"),
            PluginStatus::NotConfigured => write!(f, "not-configured"),
        }
    }
}

impl PluginStatus {
    /// Derives the status of a manifest under the given configuration.
    ///
    /// Providers that need a key are `NotConfigured` until one is found in
    /// `providers.<name>.api_key` or the manifest's environment variable.
    pub fn for_manifest(manifest: &PluginManifest, config: &GoliathConfig) -> Self {
        let Some(env_var) = manifest.api_key_env.as_deref() else {
            return PluginStatus::Enabled;
        };
        let configured = config
            .providers
            .get(&manifest.name)
            .and_then(|p| p.api_key.as_deref());
        match resolve_api_key(configured, Some(env_var)) {
            Some(_) => PluginStatus::Enabled,
            None => PluginStatus::NotConfigured,
        }
    }
}

/// Builds a provider instance from configuration.
///
/// Factories are optional: the registry can hold manifests without one for
/// listing purposes.
pub trait ProviderFactory: Send + Sync {
    /// Creates the adapter registered under `manifest.name`.
    fn create(
        &self,
        manifest: &PluginManifest,
        config: &GoliathConfig,
    ) -> Result<Arc<dyn ProviderAdapter>, GoliathError>;
}

/// A single entry in the provider registry.
pub struct PluginEntry {
    pub manifest: PluginManifest,
    pub status: PluginStatus,
    pub factory: Option<Box<dyn ProviderFactory>>,
}

impl std::fmt::Debug for PluginEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginEntry")
            .field("manifest", &self.manifest)
            .field("status", &self.status)
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

/// Registry of compiled-in providers.
#[derive(Debug)]
pub struct PluginRegistry {
    entries: HashMap<String, PluginEntry>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a provider with status `Enabled`.
    pub fn register(
        &mut self,
        manifest: PluginManifest,
        factory: Option<Box<dyn ProviderFactory>>,
    ) {
        self.register_with_status(manifest, factory, PluginStatus::Enabled);
    }

    /// Register a provider with an explicit status. Re-registering a name
    /// replaces the previous entry.
    pub fn register_with_status(
        &mut self,
        manifest: PluginManifest,
        factory: Option<Box<dyn ProviderFactory>>,
        status: PluginStatus,
    ) {
        let name = manifest.name.clone();
        self.entries.insert(
            name,
            PluginEntry {
                manifest,
                status,
                factory,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&PluginEntry> {
        self.entries.get(name)
    }

    /// Names of every enabled provider, sorted.
    pub fn enabled_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .values()
            .filter(|e| e.status == PluginStatus::Enabled)
            .map(|e| e.manifest.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// List all entries, sorted by name.
    pub fn list_all(&self) -> Vec<&PluginEntry> {
        let mut entries: Vec<&PluginEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.manifest.name.cmp(&b.manifest.name));
        entries
    }

    /// Toggle a provider between `Enabled` and `Disabled`.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), GoliathError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| GoliathError::AdapterNotFound {
                name: name.to_string(),
            })?;
        entry.status = if enabled {
            PluginStatus::Enabled
        } else {
            PluginStatus::Disabled
        };
        Ok(())
    }

    /// Looks up `name` and builds its adapter.
    ///
    /// Unknown names fail with [`GoliathError::AdapterNotFound`]. Disabled or
    /// unconfigured providers and entries without a factory fail with
    /// [`GoliathError::Config`].
    pub fn create_provider(
        &self,
        name: &str,
        config: &GoliathConfig,
    ) -> Result<Arc<dyn ProviderAdapter>, GoliathError> {
        let entry = self.get(name).ok_or_else(|| GoliathError::AdapterNotFound {
            name: name.to_string(),
        })?;

        match entry.status {
            PluginStatus::Enabled => {}
            PluginStatus::Disabled => {
                return Err(GoliathError::Config(format!("provider {name} is disabled")));
            }
            PluginStatus::NotConfigured => {
                let env_hint = entry
                    .manifest
                    .api_key_env
                    .as_deref()
                    .map(|var| format!(" or export {var}"))
                    .unwrap_or_default();
                return Err(GoliathError::Config(format!(
                    "provider {name} has no API key: set providers.{name}.api_key{env_hint}"
                )));
            }
        }

        let factory = entry.factory.as_ref().ok_or_else(|| {
            GoliathError::Config(format!("provider {name} cannot be instantiated"))
        })?;

        tracing::debug!(provider = name, protocol = %entry.manifest.protocol, "creating provider");
        factory.create(&entry.manifest, config)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::manifest::Protocol;
    use async_trait::async_trait;
    use goliath_core::{
        BackendErrorKind, HealthStatus, PluginAdapter, ProviderRequest, ProviderResponse,
    };

    struct EchoProvider {
        name: String,
    }

    #[async_trait]
    impl PluginAdapter for EchoProvider {
        fn name(&self) -> &str {
            &self.name
        }

        fn version(&self) -> semver::Version {
            semver::Version::new(0, 1, 0)
        }

        async fn health_check(&self) -> Result<HealthStatus, GoliathError> {
            Ok(HealthStatus::Healthy)
        }
    }

    #[async_trait]
    impl ProviderAdapter for EchoProvider {
        async fn run(&self, request: ProviderRequest) -> Result<ProviderResponse, GoliathError> {
            if request.prompt.is_empty() {
                return Err(GoliathError::backend(
                    &self.name,
                    BackendErrorKind::InvalidResponse,
                    "empty prompt",
                ));
            }
            Ok(ProviderResponse {
                text: request.prompt,
                provider: self.name.clone(),
                model: "echo".into(),
                usage: None,
            })
        }
    }

    struct EchoFactory;

    impl ProviderFactory for EchoFactory {
        fn create(
            &self,
            manifest: &PluginManifest,
            _config: &GoliathConfig,
        ) -> Result<Arc<dyn ProviderAdapter>, GoliathError> {
            Ok(Arc::new(EchoProvider {
                name: manifest.name.clone(),
            }))
        }
    }

    fn manifest(name: &str, api_key_env: Option<&str>) -> PluginManifest {
        PluginManifest {
            name: name.into(),
            version: "0.1.0".into(),
            description: format!("{name} provider"),
            protocol: Protocol::OpenAiCompatible,
            api_key_env: api_key_env.map(str::to_string),
            config_keys: vec![],
        }
    }

    #[test]
    fn register_and_get() {
        let mut reg = PluginRegistry::new();
        reg.register(manifest("echo", None), Some(Box::new(EchoFactory)));

        let entry = reg.get("echo").unwrap();
        assert_eq!(entry.manifest.name, "echo");
        assert_eq!(entry.status, PluginStatus::Enabled);
        assert!(entry.factory.is_some());
        assert_eq!(reg.len(), 1);
        assert!(reg.get("missing").is_none());
    }

    #[test]
    fn reregistering_replaces_entry() {
        let mut reg = PluginRegistry::new();
        reg.register(manifest("echo", None), None);
        reg.register(manifest("echo", None), Some(Box::new(EchoFactory)));
        assert_eq!(reg.len(), 1);
        assert!(reg.get("echo").unwrap().factory.is_some());
    }

    #[test]
    fn list_all_is_sorted() {
        let mut reg = PluginRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            reg.register(manifest(name, None), None);
        }
        let names: Vec<&str> = reg
            .list_all()
            .iter()
            .map(|e| e.manifest.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn enabled_names_skip_other_statuses() {
        let mut reg = PluginRegistry::new();
        reg.register(manifest("a", None), None);
        reg.register_with_status(manifest("b", None), None, PluginStatus::Disabled);
        reg.register_with_status(manifest("c", None), None, PluginStatus::NotConfigured);
        assert_eq!(reg.enabled_names(), vec!["a"]);
    }

    #[test]
    fn set_enabled_toggles_and_rejects_unknown() {
        let mut reg = PluginRegistry::new();
        reg.register(manifest("echo", None), None);
        reg.set_enabled("echo", false).unwrap();
        assert_eq!(reg.get("echo").unwrap().status, PluginStatus::Disabled);
        reg.set_enabled("echo", true).unwrap();
        assert_eq!(reg.get("echo").unwrap().status, PluginStatus::Enabled);

        let err = reg.set_enabled("ghost", true).unwrap_err();
        assert!(matches!(err, GoliathError::AdapterNotFound { .. }));
    }

    #[test]
    fn status_display() {
        assert_eq!(PluginStatus::Enabled.to_string(), "enabled");
        assert_eq!(PluginStatus::Disabled.to_string(), "disabled");
        assert_eq!(PluginStatus::NotConfigured.to_string(), "not-configured");
    }

    #[test]
    fn entry_debug_hides_factory() {
        let mut reg = PluginRegistry::new();
        reg.register(manifest("echo", None), Some(Box::new(EchoFactory)));
        let debug = format!("{:?}", reg.get("echo").unwrap());
        assert!(debug.contains("factory: true"));
    }

    #[tokio::test]
    async fn create_provider_builds_adapter() {
        let mut reg = PluginRegistry::new();
        reg.register(manifest("echo", None), Some(Box::new(EchoFactory)));

        let provider = reg.create_provider("echo", &GoliathConfig::default()).unwrap();
        assert_eq!(provider.name(), "echo");
        let response = provider
            .run(ProviderRequest::new("hello", std::time::Duration::from_secs(1)))
            .await
            .unwrap();
        assert_eq!(response.text, "hello");
    }

    #[test]
    fn create_provider_unknown_name() {
        let reg = PluginRegistry::new();
        let err = reg
            .create_provider("nonexistent", &GoliathConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, GoliathError::AdapterNotFound { ref name } if name == "nonexistent"));
        assert_eq!(err.to_string(), "provider not found: nonexistent");
    }

    #[test]
    fn create_provider_refuses_unusable_entries() {
        let mut reg = PluginRegistry::new();
        reg.register_with_status(
            manifest("off", None),
            Some(Box::new(EchoFactory)),
            PluginStatus::Disabled,
        );
        reg.register_with_status(
            manifest("keyless", Some("KEYLESS_API_KEY")),
            Some(Box::new(EchoFactory)),
            PluginStatus::NotConfigured,
        );
        reg.register(manifest("listed", None), None);

        let config = GoliathConfig::default();
        let off = reg.create_provider("off", &config).err().unwrap();
        assert!(off.to_string().contains("disabled"));

        let keyless = reg.create_provider("keyless", &config).err().unwrap();
        assert!(keyless.to_string().contains("providers.keyless.api_key"));
        assert!(keyless.to_string().contains("KEYLESS_API_KEY"));

        let listed = reg.create_provider("listed", &config).err().unwrap();
        assert!(matches!(listed, GoliathError::Config(_)));
    }

    #[test]
    fn status_follows_credentials() {
        figment::Jail::expect_with(|jail| {
            let catalog = builtin_catalog();
            let find = |name: &str| catalog.iter().find(|m| m.name == name).unwrap().clone();

            let mut config = GoliathConfig::default();
            assert_eq!(
                PluginStatus::for_manifest(&find("ollama"), &config),
                PluginStatus::Enabled
            );
            assert_eq!(
                PluginStatus::for_manifest(&find("mistral"), &config),
                PluginStatus::NotConfigured
            );

            config.providers.mistral.api_key = Some("mistral-key".into());
            assert_eq!(
                PluginStatus::for_manifest(&find("mistral"), &config),
                PluginStatus::Enabled
            );

            jail.set_env("DEEPSEEK_API_KEY", "sk-deepseek");
            assert_eq!(
                PluginStatus::for_manifest(&find("deepseek"), &config),
                PluginStatus::Enabled
            );
            Ok(())
        });
    }
}
