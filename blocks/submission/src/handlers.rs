use hazard_atoms::media::ImageUploader;
use hazard_atoms::surveys::{self, Project, SurveyBackend, SurveyReference};
use hazard_atoms::translation::Translator;
use hazard_atoms::SurveyError;
use lambda_http::{http::StatusCode, Body, Error, Response};

use crate::alerts::{alert_for_error, AlertSink, CollectedAlerts};
use crate::pipeline::{submit, Collaborators};
use crate::types::{ErrorResponse, SubmitSurveyRequest, TemplateRequest, TemplateResponse};

/// HTTP handler: POST /projects/{project_id}/surveys
pub async fn submit_survey_handler(
    backend: &dyn SurveyBackend,
    uploader: &dyn ImageUploader,
    translator: &dyn Translator,
    project_id: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let req: SubmitSurveyRequest = match serde_json::from_slice(body) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!("Failed to parse submit request: {}", e);
            return bad_request(format!("Invalid request body: {}", e));
        }
    };

    let alerts = CollectedAlerts::new();
    let collaborators = Collaborators {
        backend,
        uploader,
        translator,
        alerts: &alerts,
    };

    let result = submit(
        &collaborators,
        &Project::new(project_id),
        &req.task_info,
        &req.draft,
        req.translate_prompt,
        &req.form_lang,
        &req.to_langs,
    )
    .await;

    match result {
        Ok(survey) => Ok(Response::builder()
            .status(StatusCode::CREATED)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&survey)?.into())
            .map_err(Box::new)?),
        Err(e) => {
            // The pipeline only alerts for backend failures; the empty-fields
            // case is surfaced here.
            let alert = alert_for_error(&e);
            if alerts.shown().is_empty() {
                alerts.show(alert, alert.message(&req.form_lang));
            }

            let status = if e.is_empty_field() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::BAD_GATEWAY
            };
            json_error(
                status,
                ErrorResponse {
                    error: e.to_string(),
                    alert: alerts.last_message(),
                    draft: None,
                },
            )
        }
    }
}

/// HTTP handler: POST /surveys/template
pub async fn template_handler(backend: &dyn SurveyBackend, body: &[u8]) -> Result<Response<Body>, Error> {
    let req: TemplateRequest = match serde_json::from_slice(body) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!("Failed to parse template request: {}", e);
            return bad_request(format!("Invalid request body: {}", e));
        }
    };

    match surveys::prefill_from_template(backend, &req.reference, &req.draft).await {
        Ok((draft, task_info)) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&TemplateResponse { draft, task_info })?.into())
            .map_err(Box::new)?),
        Err(e) => json_error(
            status_for(&e),
            ErrorResponse {
                error: e.to_string(),
                alert: None,
                draft: Some(req.draft),
            },
        ),
    }
}

/// HTTP handler: GET /surveys/{reference}
pub async fn get_survey_handler(backend: &dyn SurveyBackend, reference: &str) -> Result<Response<Body>, Error> {
    let Some(reference) = SurveyReference::parse(reference) else {
        return bad_request(format!("invalid survey reference '{}'", reference));
    };

    match backend.fetch_survey_by_reference(&reference).await {
        Ok(survey) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&survey)?.into())
            .map_err(Box::new)?),
        Err(e) => {
            tracing::error!("❌ get_survey_handler failed: reference={}, error={}", reference, e);
            json_error(
                status_for(&e),
                ErrorResponse {
                    error: e.to_string(),
                    alert: None,
                    draft: None,
                },
            )
        }
    }
}

fn status_for(error: &SurveyError) -> StatusCode {
    match error {
        SurveyError::NotFound(_) => StatusCode::NOT_FOUND,
        SurveyError::InvalidPayload(_) | SurveyError::EmptyField => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn bad_request(message: String) -> Result<Response<Body>, Error> {
    json_error(
        StatusCode::BAD_REQUEST,
        ErrorResponse {
            error: message,
            alert: None,
            draft: None,
        },
    )
}

fn json_error(status: StatusCode, error: ErrorResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(&error)?.into())
        .map_err(Box::new)?)
}
