use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client as DynamoClient;
use hazard_atoms::media::ImageRef;
use hazard_atoms::surveys::{
    NewSurvey, RiskNoteSubmission, SurveyBackend, SurveyRecord, SurveyReference, TemplateRiskNote,
    TemplateSurvey,
};
use hazard_atoms::translation::Translations;
use hazard_atoms::SurveyError;
use std::collections::HashMap;
use tokio::time::{sleep, Duration};

const SURVEY_SK: &str = "SURVEY";
const BATCH_SIZE: usize = 25;
const MAX_BATCH_ATTEMPTS: u64 = 5;

/// Surveys and their risk notes in one DynamoDB partition per survey:
/// PK = "SURVEY#{survey_id}"
/// SK = "SURVEY" for the survey itself, "NOTE#{note}" for each risk note
pub struct DynamoSurveyStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoSurveyStore {
    pub fn new(client: DynamoClient, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    /// Write items 25 at a time, re-sending unprocessed items a few times
    /// before giving up.
    async fn batch_put_items(&self, items: Vec<HashMap<String, AttributeValue>>) -> Result<(), SurveyError> {
        for chunk in items.chunks(BATCH_SIZE) {
            let write_reqs = chunk
                .iter()
                .map(|item| {
                    PutRequest::builder()
                        .set_item(Some(item.clone()))
                        .build()
                        .map(|put| WriteRequest::builder().put_request(put).build())
                        .map_err(|e| SurveyError::Backend(format!("DynamoDB request build error: {}", e)))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let mut pending = write_reqs;
            let mut attempts = 0;
            loop {
                attempts += 1;
                let result = self
                    .client
                    .batch_write_item()
                    .request_items(&self.table_name, pending)
                    .send()
                    .await
                    .map_err(|e| SurveyError::Backend(format!("DynamoDB batch_write_item error: {}", e)))?;

                pending = result
                    .unprocessed_items()
                    .and_then(|m| m.get(&self.table_name))
                    .cloned()
                    .unwrap_or_default();

                if pending.is_empty() {
                    break;
                }
                if attempts >= MAX_BATCH_ATTEMPTS {
                    return Err(SurveyError::Backend(format!(
                        "DynamoDB batch_write_item left {} item(s) unprocessed",
                        pending.len()
                    )));
                }
                sleep(Duration::from_millis(100 * attempts)).await;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl SurveyBackend for DynamoSurveyStore {
    async fn create_survey(&self, survey: NewSurvey) -> Result<SurveyRecord, SurveyError> {
        let survey_id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S(format!("SURVEY#{}", survey_id)))
            .item("SK", AttributeValue::S(SURVEY_SK.to_string()))
            .item("project_id", AttributeValue::S(survey.project_id.clone()))
            .item("description", AttributeValue::S(survey.description.clone()))
            .item("description_translations", translations_attr(&survey.description_translations))
            .item("task", strings_attr(&survey.task))
            .item("scaffold_type", strings_attr(&survey.scaffold_type))
            .item("form_lang", AttributeValue::S(survey.form_lang.clone()))
            .item("to_langs", strings_attr(&survey.to_langs))
            .item("created_at", AttributeValue::S(now.clone()))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| SurveyError::Backend(format!("DynamoDB put_item error: {}", e)))?;

        Ok(SurveyRecord {
            id: survey_id,
            project_id: survey.project_id,
            description: survey.description,
            description_translations: survey.description_translations,
            task: survey.task,
            scaffold_type: survey.scaffold_type,
            form_lang: survey.form_lang,
            to_langs: survey.to_langs,
            created_at: now,
        })
    }

    async fn post_risk_notes(
        &self,
        survey_id: &str,
        risk_notes: &[RiskNoteSubmission],
    ) -> Result<(), SurveyError> {
        let items = risk_notes
            .iter()
            .map(|note| risk_note_item(survey_id, note))
            .collect();

        self.batch_put_items(items).await
    }

    async fn fetch_survey_by_reference(
        &self,
        reference: &SurveyReference,
    ) -> Result<TemplateSurvey, SurveyError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk")
            .expression_attribute_values(":pk", AttributeValue::S(format!("SURVEY#{}", reference.id())))
            .send()
            .await
            .map_err(|e| SurveyError::Backend(format!("DynamoDB query error: {}", e)))?;

        let mut header = None;
        let mut risk_notes = Vec::new();
        for item in result.items() {
            match item.get("SK").and_then(|v| v.as_s().ok()).map(String::as_str) {
                Some(SURVEY_SK) => header = Some(item),
                Some(sk) if sk.starts_with("NOTE#") => risk_notes.push(TemplateRiskNote {
                    note: read_s(item, "note"),
                    description: read_s(item, "description"),
                    status: read_s(item, "status"),
                }),
                _ => {}
            }
        }

        let header = header.ok_or_else(|| SurveyError::NotFound(format!("Survey {}", reference)))?;

        Ok(TemplateSurvey {
            task: read_strings(header, "task"),
            scaffold_type: read_strings(header, "scaffold_type"),
            description: read_s(header, "description"),
            risk_notes,
        })
    }
}

fn risk_note_item(survey_id: &str, note: &RiskNoteSubmission) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("PK".to_string(), AttributeValue::S(format!("SURVEY#{}", survey_id))),
        ("SK".to_string(), AttributeValue::S(format!("NOTE#{}", note.note))),
        ("note".to_string(), AttributeValue::S(note.note.clone())),
        ("description".to_string(), AttributeValue::S(note.description.clone())),
        ("status".to_string(), AttributeValue::S(note.status.clone())),
        ("risk_type".to_string(), AttributeValue::S(note.risk_type.clone())),
        ("images".to_string(), images_attr(&note.images)),
        ("translations".to_string(), translations_attr(&note.translations)),
    ])
}

fn strings_attr(values: &[String]) -> AttributeValue {
    AttributeValue::L(values.iter().cloned().map(AttributeValue::S).collect())
}

fn translations_attr(translations: &Translations) -> AttributeValue {
    AttributeValue::M(
        translations
            .iter()
            .map(|(lang, text)| (lang.clone(), AttributeValue::S(text.clone())))
            .collect(),
    )
}

fn images_attr(images: &[ImageRef]) -> AttributeValue {
    AttributeValue::L(
        images
            .iter()
            .map(|image| {
                AttributeValue::M(HashMap::from([
                    ("blobName".to_string(), AttributeValue::S(image.blob_name.clone())),
                    ("isLandscape".to_string(), AttributeValue::Bool(image.is_landscape)),
                ]))
            })
            .collect(),
    )
}

fn read_s(item: &HashMap<String, AttributeValue>, key: &str) -> String {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn read_strings(item: &HashMap<String, AttributeValue>, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(|v| v.as_l().ok())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_s().ok())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}
