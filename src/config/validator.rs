use thiserror::Error;

use crate::brain::Pricing;
use crate::config::{EngineSettings, PipelineSettings, Settings, StorageBackend, StorageSettings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_engine(&settings.engine) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_pricing(&settings.pricing) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_storage(&settings.storage) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_pipeline(&settings.pipeline) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_engine(engine: &EngineSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if engine.base_url.is_empty() {
            errors.push(ValidationError::MissingField("engine.base_url".to_string()));
        } else if !engine.base_url.starts_with("http://") && !engine.base_url.starts_with("https://") {
            errors.push(ValidationError::InvalidValue {
                field: "engine.base_url".to_string(),
                reason: "URL must start with http:// or https://".to_string(),
            });
        }

        if engine.model.is_empty() {
            errors.push(ValidationError::MissingField("engine.model".to_string()));
        }

        if engine.timeout_secs == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "engine.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_pricing(pricing: &Pricing) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if pricing.chars_per_token == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "pricing.chars_per_token".to_string(),
                reason: "Ratio must be greater than 0".to_string(),
            });
        }

        if !pricing.cost_per_1k_tokens.is_finite() || pricing.cost_per_1k_tokens < 0.0 {
            errors.push(ValidationError::InvalidValue {
                field: "pricing.cost_per_1k_tokens".to_string(),
                reason: "Cost rate must be a non-negative number".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_storage(storage: &StorageSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        match storage.backend {
            StorageBackend::S3 => {
                if let Err(reasons) = storage.s3.validate() {
                    errors.extend(reasons.into_iter().map(|reason| ValidationError::InvalidValue {
                        field: "storage.s3".to_string(),
                        reason,
                    }));
                }
            }
            StorageBackend::File => {
                if storage.file_root.as_os_str().is_empty() {
                    errors.push(ValidationError::MissingField("storage.file_root".to_string()));
                }
            }
            StorageBackend::Memory => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_pipeline(pipeline: &PipelineSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field, key) in [
            ("pipeline.topic_key", &pipeline.topic_key),
            ("pipeline.notes_key", &pipeline.notes_key),
            ("pipeline.report_key", &pipeline.report_key),
            ("pipeline.hello_key", &pipeline.hello_key),
        ] {
            if key.is_empty() {
                errors.push(ValidationError::MissingField(field.to_string()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
