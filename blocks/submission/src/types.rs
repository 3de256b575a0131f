use hazard_atoms::fields::TaskInfo;
use hazard_atoms::surveys::Draft;
use serde::{Deserialize, Serialize};

fn default_form_lang() -> String {
    "en".to_string()
}

// ========== SUBMIT ==========
#[derive(Debug, Deserialize)]
pub struct SubmitSurveyRequest {
    #[serde(alias = "taskInfo")]
    pub task_info: TaskInfo,
    pub draft: Draft,
    #[serde(default, alias = "translatePrompt")]
    pub translate_prompt: bool,
    #[serde(default = "default_form_lang", alias = "formLang")]
    pub form_lang: String,
    #[serde(default, alias = "toLangs")]
    pub to_langs: Vec<String>,
}

// ========== TEMPLATE ==========
#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    /// Survey URL or bare survey id.
    pub reference: String,
    /// The untouched form for the caller's template.
    pub draft: Draft,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub draft: Draft,
    pub task_info: TaskInfo,
}

// ========== ERRORS ==========
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Localized alert text for the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    /// Echo of the default draft when a template could not be merged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<Draft>,
}
