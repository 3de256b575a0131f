//! AWS and HTTP adapters for the survey atoms, plus the state shared by the
//! lambda handlers.

pub mod config;
pub mod images;
pub mod surveys;
pub mod translate;

pub use config::AppConfig;
pub use images::S3ImageStore;
pub use surveys::DynamoSurveyStore;
pub use translate::HttpTranslator;

/// Clients built once per cold start and shared by every invocation.
pub struct AppState {
    pub config: AppConfig,
    pub surveys: DynamoSurveyStore,
    pub images: S3ImageStore,
    pub translator: HttpTranslator,
}

impl AppState {
    pub async fn from_env() -> Self {
        let config = AppConfig::from_env();
        let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let dynamo_client = aws_sdk_dynamodb::Client::new(&aws);
        let s3_client = aws_sdk_s3::Client::new(&aws);

        tracing::info!(
            "🔧 AppState ready: table={}, bucket={}, translate_api={:?}",
            config.table_name,
            config.image_bucket,
            config.translate_api_url
        );

        Self {
            surveys: DynamoSurveyStore::new(dynamo_client, &config.table_name),
            images: S3ImageStore::new(
                s3_client,
                &config.image_bucket,
                &config.image_public_base_url,
                &config.image_key_prefix,
            ),
            translator: HttpTranslator::new(reqwest::Client::new(), config.translate_api_url.clone()),
            config,
        }
    }
}
