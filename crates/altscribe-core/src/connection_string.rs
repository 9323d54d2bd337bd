//! Parsing of Azure storage connection strings
//! (`DefaultEndpointsProtocol=https;AccountName=..;AccountKey=..;EndpointSuffix=..`).

use crate::AppError;

const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

#[derive(Clone, PartialEq, Eq)]
pub struct StorageConnectionString {
    pub account_name: String,
    pub account_key: Option<String>,
    pub protocol: String,
    pub endpoint_suffix: String,
    /// Explicit `BlobEndpoint`, set for emulators and custom domains.
    pub blob_endpoint: Option<String>,
}

impl StorageConnectionString {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let mut account_name = None;
        let mut account_key = None;
        let mut protocol = None;
        let mut endpoint_suffix = None;
        let mut blob_endpoint = None;

        for part in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            // Keys are base64 and may end in '=', so only split on the first one.
            let (key, value) = part.split_once('=').ok_or_else(|| {
                AppError::Config(format!("Malformed connection string segment: {}", key_only(part)))
            })?;
            match key {
                "AccountName" => account_name = Some(value.to_string()),
                "AccountKey" => account_key = Some(value.to_string()),
                "DefaultEndpointsProtocol" => protocol = Some(value.to_string()),
                "EndpointSuffix" => endpoint_suffix = Some(value.to_string()),
                "BlobEndpoint" => blob_endpoint = Some(value.trim_end_matches('/').to_string()),
                _ => {}
            }
        }

        let account_name = account_name
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("Connection string has no AccountName".to_string()))?;

        Ok(Self {
            account_name,
            account_key,
            protocol: protocol.unwrap_or_else(|| "https".to_string()),
            endpoint_suffix: endpoint_suffix.unwrap_or_else(|| DEFAULT_ENDPOINT_SUFFIX.to_string()),
            blob_endpoint,
        })
    }

    /// True for `https://{account}.blob.core.windows.net`, which object
    /// stores derive from the account name alone.
    pub fn uses_public_endpoint(&self) -> bool {
        self.blob_endpoint.is_none()
            && self.protocol.eq_ignore_ascii_case("https")
            && self.endpoint_suffix == DEFAULT_ENDPOINT_SUFFIX
    }

    /// Base address of the blob service, without trailing slash.
    pub fn blob_service_url(&self) -> String {
        match &self.blob_endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!(
                "{}://{}.blob.{}",
                self.protocol, self.account_name, self.endpoint_suffix
            ),
        }
    }
}

fn key_only(part: &str) -> &str {
    part.split('=').next().unwrap_or_default()
}

impl std::fmt::Debug for StorageConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConnectionString")
            .field("account_name", &self.account_name)
            .field("account_key", &self.account_key.as_ref().map(|_| "<redacted>"))
            .field("protocol", &self.protocol)
            .field("endpoint_suffix", &self.endpoint_suffix)
            .field("blob_endpoint", &self.blob_endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_connection_string() {
        let cs = StorageConnectionString::parse(
            "DefaultEndpointsProtocol=https;AccountName=images06;AccountKey=YWJj==;EndpointSuffix=core.windows.net",
        )
        .unwrap();
        assert_eq!(cs.account_name, "images06");
        assert_eq!(cs.account_key.as_deref(), Some("YWJj=="));
        assert_eq!(cs.blob_service_url(), "https://images06.blob.core.windows.net");
        assert!(cs.uses_public_endpoint());
    }

    #[test]
    fn test_sovereign_cloud_suffix() {
        let cs = StorageConnectionString::parse(
            "DefaultEndpointsProtocol=https;AccountName=images06;AccountKey=YWJj;EndpointSuffix=core.chinacloudapi.cn",
        )
        .unwrap();
        assert!(!cs.uses_public_endpoint());
        assert_eq!(cs.blob_service_url(), "https://images06.blob.core.chinacloudapi.cn");
    }

    #[test]
    fn test_parse_blob_endpoint_override() {
        let cs = StorageConnectionString::parse(
            "AccountName=devstoreaccount1;AccountKey=a2V5;BlobEndpoint=http://127.0.0.1:10000/devstoreaccount1/;",
        )
        .unwrap();
        assert_eq!(cs.blob_service_url(), "http://127.0.0.1:10000/devstoreaccount1");
        assert!(!cs.uses_public_endpoint());
    }

    #[test]
    fn test_missing_account_name_rejected() {
        assert!(StorageConnectionString::parse("AccountKey=abc").is_err());
        assert!(StorageConnectionString::parse("garbage").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let cs = StorageConnectionString::parse("AccountName=a;AccountKey=secret").unwrap();
        assert!(!format!("{:?}", cs).contains("secret"));
    }
}
