use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// S3 configuration for the artifact bucket
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct S3Config {
    /// Bucket holding the pipeline artifacts
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,

    /// S3 endpoint URL (for LocalStack, MinIO, or S3-compatible services)
    #[serde(default = "default_endpoint")]
    pub endpoint: Option<String>,

    /// Access key id; the default credential chain is used when unset
    #[serde(default = "default_localstack_credential")]
    pub access_key_id: Option<String>,

    /// Secret access key
    #[serde(default = "default_localstack_credential")]
    pub secret_access_key: Option<String>,

    /// Use path-style addressing (required by LocalStack)
    #[serde(default = "default_force_path_style")]
    pub force_path_style: bool,
}

fn default_bucket() -> String {
    "milestone-bucket".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_endpoint() -> Option<String> {
    Some("http://localhost:4566".to_string())
}

fn default_localstack_credential() -> Option<String> {
    Some("test".to_string())
}

fn default_force_path_style() -> bool {
    true
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            region: default_region(),
            endpoint: default_endpoint(),
            access_key_id: default_localstack_credential(),
            secret_access_key: default_localstack_credential(),
            force_path_style: default_force_path_style(),
        }
    }
}

impl S3Config {
    /// Merge CLI arguments into this config (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(bucket) = &cli.bucket {
            self.bucket = bucket.clone();
        }
        if cli.s3_endpoint.is_some() {
            self.endpoint = cli.s3_endpoint.clone();
        }
        if let Some(region) = &cli.s3_region {
            self.region = region.clone();
        }
    }

    /// Validate the S3 configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.bucket.len() < 3 || self.bucket.len() > 63 {
            errors.push("S3 bucket name must be between 3 and 63 characters".to_string());
        }
        if !self
            .bucket
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        {
            errors.push(
                "S3 bucket name must contain only lowercase letters, numbers, hyphens, and periods"
                    .to_string(),
            );
        }

        if self.region.is_empty() {
            errors.push("S3 region must not be empty".to_string());
        }

        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            errors.push(
                "S3 access_key_id and secret_access_key must be set together".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config_targets_localstack() {
        let config = S3Config::default();
        assert_eq!(config.bucket, "milestone-bucket");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.access_key_id.as_deref(), Some("test"));
        assert!(config.force_path_style);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_bucket_name() {
        let config = S3Config {
            bucket: "UPPERCASE".to_string(),
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .iter()
            .any(|e| e.contains("lowercase letters")));
    }

    #[test]
    fn test_validate_short_bucket_name() {
        let config = S3Config {
            bucket: "ab".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_half_credentials() {
        let config = S3Config {
            secret_access_key: None,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("set together")));
    }

    #[test]
    fn test_merge_cli() {
        let cli = Cli::parse_from([
            "budget-squad",
            "--bucket",
            "other-bucket",
            "--s3-endpoint",
            "http://minio:9000",
            "check",
        ]);
        let mut config = S3Config::default();
        config.merge_cli(&cli);
        assert_eq!(config.bucket, "other-bucket");
        assert_eq!(config.endpoint.as_deref(), Some("http://minio:9000"));
        assert_eq!(config.region, "us-east-1");
    }
}
