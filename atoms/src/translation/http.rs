use lambda_http::{Body, Error as LambdaError, Response, http::StatusCode};
use super::model::TranslatePayload;
use super::service::{translate, Translator};

/// HTTP Handler: POST /translate
///
/// Always answers 200 with a `TranslationResult`; translation problems are
/// reported in its `error` field, not through the status code.
pub async fn translate_handler<T: Translator + ?Sized>(
    translator: &T,
    body: &[u8],
) -> Result<Response<Body>, LambdaError> {
    let payload: TranslatePayload = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Failed to parse translate request: {}", e);
            return Ok(Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .header("Content-Type", "application/json")
                .body(serde_json::json!({"error": format!("Invalid request body: {}", e)}).to_string().into())
                .map_err(Box::new)?);
        }
    };

    let result = translate(translator, &payload.text, &payload.from, &payload.to).await;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(&result)?.into())
        .map_err(Box::new)?)
}
