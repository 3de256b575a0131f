use async_trait::async_trait;
use std::collections::BTreeMap;

use super::model::{TranslationResult, Translations, NO_LANGUAGES_SELECTED, TRANSLATION_FAILED};
use crate::error::SurveyError;
use crate::surveys::model::Draft;

/// Remote machine translation collaborator.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &[String],
    ) -> Result<Translations, SurveyError>;
}

/// Translate `text` into every language of `to_langs`.
///
/// Never fails: an empty language list and a collaborator failure both come
/// back as a result carrying a stable, user-facing `error` string.
pub async fn translate<T: Translator + ?Sized>(
    translator: &T,
    text: &str,
    from: &str,
    to_langs: &[String],
) -> TranslationResult {
    if to_langs.is_empty() {
        return TranslationResult::failed(NO_LANGUAGES_SELECTED);
    }

    match translator.translate(text, from, to_langs).await {
        Ok(translations) => TranslationResult::ok(translations),
        Err(e) => {
            tracing::error!(
                "❌ translate failed: from={}, to={:?}, error={}",
                from,
                to_langs,
                e
            );
            TranslationResult::failed(TRANSLATION_FAILED)
        }
    }
}

/// Translate every draft entry that has a description but no translations yet.
///
/// Returns the new translations keyed by note; entries whose translation
/// failed are absent. The draft itself is left untouched.
pub async fn translate_draft<T: Translator + ?Sized>(
    translator: &T,
    draft: &Draft,
    from: &str,
    to_langs: &[String],
) -> BTreeMap<String, Translations> {
    let mut translated = BTreeMap::new();

    for (note, entry) in draft.iter() {
        let description = entry.description.trim();
        if description.is_empty() || !entry.translations.is_empty() {
            continue;
        }

        let result = translate(translator, description, from, to_langs).await;
        match result.error {
            None => {
                translated.insert(note.clone(), result.translations);
            }
            Some(e) => tracing::warn!("⚠️ keeping {} untranslated: {}", note, e),
        }
    }

    translated
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoTranslator {
        calls: AtomicUsize,
        fail: bool,
    }

    impl EchoTranslator {
        fn new(fail: bool) -> Self {
            Self { calls: AtomicUsize::new(0), fail }
        }
    }

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            _from: &str,
            to: &[String],
        ) -> Result<Translations, SurveyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SurveyError::Translation("connection reset".to_string()));
            }
            Ok(to.iter().map(|lang| (lang.clone(), format!("{}:{}", lang, text))).collect())
        }
    }

    #[tokio::test]
    async fn no_target_languages_skips_the_collaborator() {
        let translator = EchoTranslator::new(false);

        let result = translate(&translator, "hello", "en", &[]).await;

        assert!(result.translations.is_empty());
        assert_eq!(result.error.as_deref(), Some(NO_LANGUAGES_SELECTED));
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_carries_collaborator_result() {
        let translator = EchoTranslator::new(false);

        let result = translate(&translator, "hello", "en", &["fi".to_string()]).await;

        assert_eq!(result.error, None);
        assert_eq!(result.translations.get("fi"), Some("fi:hello"));
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_reported_with_generic_message() {
        let translator = EchoTranslator::new(true);

        let result = translate(&translator, "hello", "en", &["fi".to_string()]).await;

        assert!(result.translations.is_empty());
        assert_eq!(result.error.as_deref(), Some(TRANSLATION_FAILED));
    }

    #[tokio::test]
    async fn translate_draft_only_fills_missing_translations() {
        let translator = EchoTranslator::new(false);
        let mut draft = Draft::from_sections([
            ("fall_protection", "scaffolding"),
            ("personal_protection", "scaffolding"),
            ("electricity", "electrical"),
        ]);
        if let Some(entry) = draft.get_mut("fall_protection") {
            entry.description = " guard rails missing ".to_string();
        }
        if let Some(entry) = draft.get_mut("personal_protection") {
            entry.description = "helmets ok".to_string();
            entry.translations.insert("fi", "kypärät ok");
        }

        let translated = translate_draft(&translator, &draft, "en", &["fi".to_string()]).await;

        assert_eq!(translated.len(), 1);
        assert_eq!(
            translated["fall_protection"].get("fi"),
            Some("fi:guard rails missing")
        );
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }
}
