use std::env;

/// Deployment settings, read from the lambda environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub table_name: String,
    pub image_bucket: String,
    /// Base URL images are served from; the bucket's S3 URL when unset.
    pub image_public_base_url: String,
    pub image_key_prefix: String,
    pub translate_api_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let image_bucket = read("IMAGE_BUCKET_NAME").unwrap_or_else(|| "hazard-survey-images".to_string());
        let image_public_base_url = read("IMAGE_PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("https://{}.s3.amazonaws.com", image_bucket));

        Self {
            table_name: read("TABLE_NAME").unwrap_or_else(|| "hazard_surveys".to_string()),
            image_public_base_url,
            image_bucket,
            image_key_prefix: read("IMAGE_KEY_PREFIX").unwrap_or_else(|| "risk-notes".to_string()),
            translate_api_url: read("TRANSLATE_API_URL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);

        assert_eq!(config.table_name, "hazard_surveys");
        assert_eq!(config.image_bucket, "hazard-survey-images");
        assert_eq!(config.image_public_base_url, "https://hazard-survey-images.s3.amazonaws.com");
        assert_eq!(config.image_key_prefix, "risk-notes");
        assert_eq!(config.translate_api_url, None);
    }

    #[test]
    fn reads_overrides_and_ignores_blank_values() {
        let vars = HashMap::from([
            ("TABLE_NAME", "surveys-prod"),
            ("IMAGE_BUCKET_NAME", "site-photos"),
            ("TRANSLATE_API_URL", "  "),
        ]);

        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.table_name, "surveys-prod");
        assert_eq!(config.image_public_base_url, "https://site-photos.s3.amazonaws.com");
        assert_eq!(config.translate_api_url, None);
    }
}
