use async_trait::async_trait;
use hazard_atoms::translation::{Translations, Translator};
use hazard_atoms::SurveyError;
use serde::{Deserialize, Serialize};

/// Client for the remote machine translation endpoint.
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: Option<String>,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    from: &'a str,
    to: &'a [String],
}

/// The endpoint answers either `{"fi": "..."}` or `{"translations": {"fi": "..."}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TranslateResponse {
    Wrapped { translations: Translations },
    Bare(Translations),
}

impl HttpTranslator {
    pub fn new(client: reqwest::Client, endpoint: Option<String>) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, from: &str, to: &[String]) -> Result<Translations, SurveyError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| SurveyError::Translation("TRANSLATE_API_URL is not configured".to_string()))?;

        let response = self
            .client
            .post(endpoint)
            .json(&TranslateRequest { text, from, to })
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SurveyError::Translation(format!("translate request failed: {}", e)))?;

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| SurveyError::Translation(format!("unreadable translate response: {}", e)))?;

        Ok(match body {
            TranslateResponse::Wrapped { translations } => translations,
            TranslateResponse::Bare(translations) => translations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fi() -> Vec<String> {
        vec!["fi".to_string()]
    }

    #[tokio::test]
    async fn posts_text_and_reads_bare_map() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(json!({"text": "helmet", "from": "en", "to": ["fi"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fi": "kypärä"})))
            .expect(1)
            .mount(&server)
            .await;

        let translator = HttpTranslator::new(reqwest::Client::new(), Some(format!("{}/translate", server.uri())));
        let translations = translator.translate("helmet", "en", &fi()).await.unwrap();

        assert_eq!(translations.get("fi"), Some("kypärä"));
    }

    #[tokio::test]
    async fn reads_wrapped_translations() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"translations": {"sv": "hjälm"}})),
            )
            .mount(&server)
            .await;

        let translator = HttpTranslator::new(reqwest::Client::new(), Some(server.uri()));
        let translations = translator.translate("helmet", "en", &["sv".to_string()]).await.unwrap();

        assert_eq!(translations.get("sv"), Some("hjälm"));
    }

    #[tokio::test]
    async fn server_errors_become_translation_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let translator = HttpTranslator::new(reqwest::Client::new(), Some(server.uri()));

        assert!(matches!(
            translator.translate("helmet", "en", &fi()).await,
            Err(SurveyError::Translation(_))
        ));
    }

    #[tokio::test]
    async fn unconfigured_endpoint_fails_without_a_request() {
        let translator = HttpTranslator::new(reqwest::Client::new(), None);

        assert!(translator.translate("helmet", "en", &fi()).await.is_err());
    }
}
