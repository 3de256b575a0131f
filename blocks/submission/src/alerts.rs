use hazard_atoms::SurveyError;
use std::sync::Mutex;

/// The only failure information that crosses into the UI: one of two
/// categories, shown as a localized string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    SomeFieldsEmpty,
    SubmissionFailed,
}

impl Alert {
    /// Localized text; unknown languages fall back to English.
    pub fn message(&self, lang: &str) -> &'static str {
        let lang = lang.split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();
        match (self, lang.as_str()) {
            (Alert::SomeFieldsEmpty, "fi") => "Jotkin kentät ovat tyhjiä",
            (Alert::SomeFieldsEmpty, "sv") => "Vissa fält är tomma",
            (Alert::SomeFieldsEmpty, _) => "Some fields are empty",
            (Alert::SubmissionFailed, "fi") => "Lähetys epäonnistui",
            (Alert::SubmissionFailed, "sv") => "Inskickningen misslyckades",
            (Alert::SubmissionFailed, _) => "Submission failed",
        }
    }
}

pub fn alert_for_error(error: &SurveyError) -> Alert {
    if error.is_empty_field() {
        Alert::SomeFieldsEmpty
    } else {
        Alert::SubmissionFailed
    }
}

/// Where the pipeline surfaces user-facing alerts.
pub trait AlertSink: Send + Sync {
    fn show(&self, alert: Alert, message: &str);
}

/// Keeps every alert shown, in order. Used by the HTTP handlers to put the
/// alert text in the response body.
#[derive(Debug, Default)]
pub struct CollectedAlerts {
    shown: Mutex<Vec<(Alert, String)>>,
}

impl CollectedAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<(Alert, String)> {
        self.shown.lock().map(|shown| shown.clone()).unwrap_or_default()
    }

    pub fn last_message(&self) -> Option<String> {
        self.shown().pop().map(|(_, message)| message)
    }
}

impl AlertSink for CollectedAlerts {
    fn show(&self, alert: Alert, message: &str) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push((alert, message.to_string()));
        }
    }
}
