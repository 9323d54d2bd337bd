//! Configuration module
//!
//! The whole process is configured once at start-up from the environment
//! (with `.env` support). The resulting [`Config`] is passed explicitly to
//! the backends and the handler; nothing reads the environment afterwards.

use std::env;

use crate::connection_string::StorageConnectionString;
use crate::constants::{
    DEFAULT_COSMOS_CONTAINER, DEFAULT_COSMOS_DATABASE, DEFAULT_FUNCTION_NAME,
    DEFAULT_IMAGES_CONTAINER, DEFAULT_OPENAI_API_VERSION, DEFAULT_OPENAI_DEPLOYMENT,
};
use crate::storage_types::{DocumentStoreBackend, StorageBackend};

const DEFAULT_PORT: u16 = 4000;

/// Host-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    /// Route the functions host posts trigger invocations to.
    pub function_name: String,
    /// `compact` (default) or `json`
    pub log_format: String,
}

/// Settings for the blob ingest trigger and its three backends.
///
/// Credential fields must never be logged.
#[derive(Clone)]
pub struct TriggerConfig {
    pub base: BaseConfig,
    // Object storage
    pub storage_backend: StorageBackend,
    pub storage_connection: Option<StorageConnectionString>,
    /// Key used for SAS signing; the connection string's key when unset.
    pub storage_account_key: Option<String>,
    pub images_container: String,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Document store
    pub document_store_backend: DocumentStoreBackend,
    pub cosmos_endpoint: Option<String>,
    pub cosmos_key: Option<String>,
    pub cosmos_database: String,
    pub cosmos_container: String,
    // Language model
    pub openai_endpoint: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_deployment: String,
    pub openai_api_version: String,
}

impl TriggerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_any = |keys: &[&str]| keys.iter().find_map(|k| get(*k));

        let server_port = match get_any(&["FUNCTIONS_CUSTOMHANDLER_PORT", "PORT"]) {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("Listen port must be a valid number, got {}", port))?,
            None => DEFAULT_PORT,
        };

        let base = BaseConfig {
            server_port,
            environment: get_any(&["ENVIRONMENT", "APP_ENV"])
                .unwrap_or_else(|| "development".to_string()),
            function_name: get("TRIGGER_FUNCTION_NAME")
                .unwrap_or_else(|| DEFAULT_FUNCTION_NAME.to_string()),
            log_format: get("LOG_FORMAT")
                .map(|s| s.to_lowercase())
                .unwrap_or_else(|| "compact".to_string()),
        };

        let storage_backend = match get("STORAGE_BACKEND") {
            Some(s) => s.parse()?,
            None => StorageBackend::Azure,
        };

        let storage_connection = get_any(&["images06_STORAGE", "STORAGE_CONNECTION_STRING"])
            .map(|raw| StorageConnectionString::parse(&raw))
            .transpose()
            .map_err(|e| anyhow::anyhow!("Invalid storage connection string: {}", e))?;

        let document_store_backend = match get("DESCRIPTION_STORE") {
            Some(s) => s.parse()?,
            None => DocumentStoreBackend::Cosmos,
        };

        Ok(TriggerConfig {
            base,
            storage_backend,
            storage_connection,
            storage_account_key: get_any(&["key_storage_account", "STORAGE_ACCOUNT_KEY"]),
            images_container: get("IMAGES_CONTAINER")
                .unwrap_or_else(|| DEFAULT_IMAGES_CONTAINER.to_string()),
            local_storage_path: get("LOCAL_STORAGE_PATH"),
            local_storage_base_url: get("LOCAL_STORAGE_BASE_URL"),
            document_store_backend,
            cosmos_endpoint: get("ACCOUNT_URI"),
            cosmos_key: get("ACCOUNT_KEY"),
            cosmos_database: get("COSMOS_DATABASE")
                .unwrap_or_else(|| DEFAULT_COSMOS_DATABASE.to_string()),
            cosmos_container: get("COSMOS_CONTAINER")
                .unwrap_or_else(|| DEFAULT_COSMOS_CONTAINER.to_string()),
            openai_endpoint: get("AZURE_OPENAI_ENDPOINT"),
            openai_api_key: get("AZURE_OPENAI_API_KEY"),
            openai_deployment: get("AZURE_OPENAI_DEPLOYMENT")
                .unwrap_or_else(|| DEFAULT_OPENAI_DEPLOYMENT.to_string()),
            openai_api_version: get("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_VERSION.to_string()),
        })
    }

    /// Fail fast when the selected backends lack credentials.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let mut missing = Vec::new();

        match self.storage_backend {
            StorageBackend::Azure => match &self.storage_connection {
                None => missing.push("images06_STORAGE"),
                Some(cs) if cs.account_key.is_none() && self.storage_account_key.is_none() => {
                    missing.push("key_storage_account")
                }
                Some(_) => {}
            },
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    missing.push("LOCAL_STORAGE_PATH");
                }
                if self.local_storage_base_url.is_none() {
                    missing.push("LOCAL_STORAGE_BASE_URL");
                }
            }
        }

        if self.document_store_backend == DocumentStoreBackend::Cosmos {
            if self.cosmos_endpoint.is_none() {
                missing.push("ACCOUNT_URI");
            }
            if self.cosmos_key.is_none() {
                missing.push("ACCOUNT_KEY");
            }
        }

        if self.openai_endpoint.is_none() {
            missing.push("AZURE_OPENAI_ENDPOINT");
        }
        if self.openai_api_key.is_none() {
            missing.push("AZURE_OPENAI_API_KEY");
        }

        if !missing.is_empty() {
            anyhow::bail!("Missing required configuration: {}", missing.join(", "));
        }

        if self.images_container.contains('/') {
            anyhow::bail!("IMAGES_CONTAINER must be a bare container name");
        }

        Ok(())
    }

    /// Key used to sign read URLs.
    pub fn signing_key(&self) -> Option<&str> {
        self.storage_account_key.as_deref().or_else(|| {
            self.storage_connection
                .as_ref()
                .and_then(|cs| cs.account_key.as_deref())
        })
    }
}

/// Application configuration.
#[derive(Clone)]
pub struct Config(pub Box<TriggerConfig>);

impl Config {
    fn inner(&self) -> &TriggerConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Config(Box::new(TriggerConfig::from_env()?)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn function_name(&self) -> &str {
        &self.inner().base.function_name
    }

    pub fn log_format(&self) -> &str {
        &self.inner().base.log_format
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn storage_connection(&self) -> Option<&StorageConnectionString> {
        self.inner().storage_connection.as_ref()
    }

    pub fn signing_key(&self) -> Option<&str> {
        self.inner().signing_key()
    }

    pub fn images_container(&self) -> &str {
        &self.inner().images_container
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }

    pub fn document_store_backend(&self) -> DocumentStoreBackend {
        self.inner().document_store_backend
    }

    pub fn cosmos_endpoint(&self) -> Option<&str> {
        self.inner().cosmos_endpoint.as_deref()
    }

    pub fn cosmos_key(&self) -> Option<&str> {
        self.inner().cosmos_key.as_deref()
    }

    pub fn cosmos_database(&self) -> &str {
        &self.inner().cosmos_database
    }

    pub fn cosmos_container(&self) -> &str {
        &self.inner().cosmos_container
    }

    pub fn openai_endpoint(&self) -> Option<&str> {
        self.inner().openai_endpoint.as_deref()
    }

    pub fn openai_api_key(&self) -> Option<&str> {
        self.inner().openai_api_key.as_deref()
    }

    pub fn openai_deployment(&self) -> &str {
        &self.inner().openai_deployment
    }

    pub fn openai_api_version(&self) -> &str {
        &self.inner().openai_api_version
    }
}

impl From<TriggerConfig> for Config {
    fn from(config: TriggerConfig) -> Self {
        Config(Box::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                "images06_STORAGE",
                "DefaultEndpointsProtocol=https;AccountName=images06;AccountKey=Y29ubg==;EndpointSuffix=core.windows.net",
            ),
            ("key_storage_account", "c2lnbmluZw=="),
            ("ACCOUNT_URI", "https://descriptions.documents.azure.com:443/"),
            ("ACCOUNT_KEY", "Y29zbW9z"),
            ("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com/"),
            ("AZURE_OPENAI_API_KEY", "sk-test"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = TriggerConfig::from_lookup(lookup(&full_vars())).unwrap();
        config.validate().unwrap();
        assert_eq!(config.base.server_port, 4000);
        assert_eq!(config.base.function_name, "descriptions_trigger");
        assert_eq!(config.images_container, "images-description");
        assert_eq!(config.cosmos_database, "descriptions");
        assert_eq!(config.cosmos_container, "products_descriptions");
        assert_eq!(config.openai_deployment, "image-bot");
        assert_eq!(config.openai_api_version, "2024-02-15-preview");
        assert_eq!(config.storage_backend, StorageBackend::Azure);
        assert_eq!(config.document_store_backend, DocumentStoreBackend::Cosmos);
    }

    #[test]
    fn test_signing_key_prefers_explicit_key() {
        let config = TriggerConfig::from_lookup(lookup(&full_vars())).unwrap();
        assert_eq!(config.signing_key(), Some("c2lnbmluZw=="));

        let vars: Vec<_> = full_vars()
            .into_iter()
            .filter(|(k, _)| *k != "key_storage_account")
            .collect();
        let config = TriggerConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.signing_key(), Some("Y29ubg=="));
    }

    #[test]
    fn test_custom_handler_port_wins() {
        let mut vars = full_vars();
        vars.push(("FUNCTIONS_CUSTOMHANDLER_PORT", "7071"));
        vars.push(("PORT", "9000"));
        let config = TriggerConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.base.server_port, 7071);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut vars = full_vars();
        vars.push(("PORT", "not-a-port"));
        assert!(TriggerConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_validate_reports_missing_credentials() {
        let config = TriggerConfig::from_lookup(lookup(&[])).unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("images06_STORAGE"));
        assert!(err.contains("ACCOUNT_URI"));
        assert!(err.contains("AZURE_OPENAI_API_KEY"));
    }

    #[test]
    fn test_local_backends_skip_cloud_credentials() {
        let config = TriggerConfig::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "local"),
            ("LOCAL_STORAGE_PATH", "/tmp/altscribe"),
            ("LOCAL_STORAGE_BASE_URL", "http://localhost:4000/files"),
            ("DESCRIPTION_STORE", "memory"),
            ("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com"),
            ("AZURE_OPENAI_API_KEY", "sk-test"),
        ]))
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Local);
        assert_eq!(config.document_store_backend, DocumentStoreBackend::Memory);
    }
}
