use hazard_atoms::translation;
use hazard_shared::AppState;
use lambda_http::{
    http::{header::HeaderValue, Method, StatusCode},
    Body, Error, Request, Response,
};
use std::sync::Arc;
use submission_block::handlers;

fn with_cors_headers(mut resp: Response<Body>) -> Response<Body> {
    let headers = resp.headers_mut();
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type,Authorization"),
    );
    resp
}

fn finalize_response(resp: Result<Response<Body>, Error>) -> Result<Response<Body>, Error> {
    resp.map(with_cors_headers)
}

/// Main Lambda handler - routes survey, template and translation requests
pub(crate) async fn function_handler(event: Request, state: Arc<AppState>) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let body: &[u8] = event.body().as_ref();
    tracing::info!("🚀 Survey API invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if *method == Method::OPTIONS {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(with_cors_headers(resp));
    }

    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let resp = match (method, parts.as_slice()) {
        // POST /projects/{project_id}/surveys - run the submission pipeline
        (&Method::POST, ["projects", project_id, "surveys"]) => {
            handlers::submit_survey_handler(
                &state.surveys,
                &state.images,
                &state.translator,
                project_id,
                body,
            )
            .await
        }
        // POST /surveys/template - pre-fill a draft from an earlier survey
        (&Method::POST, ["surveys", "template"]) => handlers::template_handler(&state.surveys, body).await,
        // GET /surveys/{reference}
        (&Method::GET, ["surveys", reference]) => handlers::get_survey_handler(&state.surveys, reference).await,
        // POST /translate
        (&Method::POST, ["translate"]) => translation::translate_handler(&state.translator, body).await,
        (_, ["projects", _, "surveys"]) | (_, ["surveys", ..]) | (_, ["translate"]) => method_not_allowed(),
        _ => {
            tracing::warn!("⚠️ No route matched - Method: {} Path: {}", method, path);
            not_found()
        }
    };

    finalize_response(resp)
}

fn method_not_allowed() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .body(serde_json::json!({"error": "Method not allowed"}).to_string().into())
        .map_err(Box::new)?)
}

fn not_found() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(serde_json::json!({"error": "Not found"}).to_string().into())
        .map_err(Box::new)?)
}
