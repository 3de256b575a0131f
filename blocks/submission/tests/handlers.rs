use async_trait::async_trait;
use hazard_atoms::media::{ImageUploader, UploadPayload, UploadResponse};
use hazard_atoms::surveys::{
    NewSurvey, RiskNoteSubmission, SurveyBackend, SurveyRecord, SurveyReference, TemplateRiskNote,
    TemplateSurvey,
};
use hazard_atoms::translation::{Translations, Translator};
use hazard_atoms::SurveyError;
use lambda_http::{http::StatusCode, Body, Response};
use serde_json::{json, Value};
use submission_block::handlers;

struct StaticBackend {
    create_fails: bool,
}

#[async_trait]
impl SurveyBackend for StaticBackend {
    async fn create_survey(&self, survey: NewSurvey) -> Result<SurveyRecord, SurveyError> {
        if self.create_fails {
            return Err(SurveyError::Backend("throttled".to_string()));
        }
        Ok(SurveyRecord {
            id: "s-1".to_string(),
            project_id: survey.project_id,
            description: survey.description,
            description_translations: survey.description_translations,
            task: survey.task,
            scaffold_type: survey.scaffold_type,
            form_lang: survey.form_lang,
            to_langs: survey.to_langs,
            created_at: "2026-10-19T08:00:00+00:00".to_string(),
        })
    }

    async fn post_risk_notes(&self, _survey_id: &str, _notes: &[RiskNoteSubmission]) -> Result<(), SurveyError> {
        Ok(())
    }

    async fn fetch_survey_by_reference(&self, reference: &SurveyReference) -> Result<TemplateSurvey, SurveyError> {
        if reference.id() != "7" {
            return Err(SurveyError::NotFound(format!("Survey {}", reference)));
        }
        Ok(TemplateSurvey {
            task: vec!["installation".to_string()],
            scaffold_type: vec!["work".to_string()],
            description: "old survey".to_string(),
            risk_notes: vec![TemplateRiskNote {
                note: "personal_protection".to_string(),
                description: "d".to_string(),
                status: "checked".to_string(),
            }],
        })
    }
}

struct NoUploads;

#[async_trait]
impl ImageUploader for NoUploads {
    async fn upload_images_payload(&self, _payload: UploadPayload) -> Result<UploadResponse, SurveyError> {
        Err(SurveyError::Upload("offline".to_string()))
    }
}

struct NoTranslations;

#[async_trait]
impl Translator for NoTranslations {
    async fn translate(&self, _text: &str, _from: &str, _to: &[String]) -> Result<Translations, SurveyError> {
        Err(SurveyError::Translation("offline".to_string()))
    }
}

fn json_body(resp: &Response<Body>) -> Value {
    match resp.body() {
        Body::Text(text) => serde_json::from_str(text).unwrap(),
        Body::Binary(bytes) => serde_json::from_slice(bytes).unwrap(),
        Body::Empty => Value::Null,
    }
}

fn submit_body(description: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "task_info": {
            "task": ["installation"],
            "scaffold_type": ["work"],
            "description": description,
            "description_translations": {"fi": "k"}
        },
        "draft": {
            "personal_protection": {"description": "ok", "status": "checked", "risk_type": "scaffolding"}
        },
        "form_lang": "fi",
        "to_langs": ["fi"]
    }))
    .unwrap()
}

#[tokio::test]
async fn submit_returns_created_survey() {
    let backend = StaticBackend { create_fails: false };

    let resp = handlers::submit_survey_handler(&backend, &NoUploads, &NoTranslations, "12", &submit_body("desc"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(&resp);
    assert_eq!(body["id"], "s-1");
    assert_eq!(body["project_id"], "12");
}

#[tokio::test]
async fn empty_fields_answer_400_with_specific_alert() {
    let backend = StaticBackend { create_fails: false };

    let resp = handlers::submit_survey_handler(&backend, &NoUploads, &NoTranslations, "12", &submit_body("  "))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(&resp);
    assert_eq!(body["error"], "Some fields are empty");
    assert_eq!(body["alert"], "Jotkin kentät ovat tyhjiä");
}

#[tokio::test]
async fn backend_failure_answers_502_with_generic_alert() {
    let backend = StaticBackend { create_fails: true };

    let resp = handlers::submit_survey_handler(&backend, &NoUploads, &NoTranslations, "12", &submit_body("desc"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json_body(&resp)["alert"], "Lähetys epäonnistui");
}

#[tokio::test]
async fn template_merges_into_the_posted_draft() {
    let backend = StaticBackend { create_fails: false };
    let body = serde_json::to_vec(&json!({
        "reference": "https://app.example.com/surveys/7",
        "draft": {
            "personal_protection": {"risk_type": "scaffolding"},
            "electricity": {"risk_type": "electrical"}
        }
    }))
    .unwrap();

    let resp = handlers::template_handler(&backend, &body).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(&resp);
    assert_eq!(body["draft"]["personal_protection"]["description"], "d");
    assert_eq!(body["draft"]["personal_protection"]["status"], "checked");
    assert_eq!(body["draft"]["electricity"]["status"], "");
    assert_eq!(body["task_info"]["description"], "old survey");
}

#[tokio::test]
async fn unknown_template_echoes_default_draft() {
    let backend = StaticBackend { create_fails: false };
    let body = serde_json::to_vec(&json!({
        "reference": "99",
        "draft": {"electricity": {"risk_type": "electrical"}}
    }))
    .unwrap();

    let resp = handlers::template_handler(&backend, &body).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(&resp)["draft"]["electricity"]["risk_type"], "electrical");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let backend = StaticBackend { create_fails: false };

    let resp = handlers::submit_survey_handler(&backend, &NoUploads, &NoTranslations, "12", b"not json")
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
