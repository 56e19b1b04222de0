use async_trait::async_trait;

use crate::error::NetworkError;
use crate::model::annotation::Annotation;

/// `Ok(None)` means the classifier had nothing to say.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Option<Annotation>, NetworkError>;
}

const IMPORTANT_WORDS: &[&str] = &["important", "critical", "client", "budget", "contract", "exam"];
const URGENT_WORDS: &[&str] = &["urgent", "asap", "deadline", "today", "tonight", "overdue"];

#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    // half a point per hit
    fn probability(words: &[String], vocabulary: &[&str]) -> f64 {
        let hits = words
            .iter()
            .filter(|w| vocabulary.contains(&w.as_str()))
            .count();
        (hits as f64 * 0.5).min(1.0)
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<Option<Annotation>, NetworkError> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        let importance = Self::probability(&words, IMPORTANT_WORDS);
        let urgency = Self::probability(&words, URGENT_WORDS);
        if importance == 0.0 && urgency == 0.0 {
            return Ok(None);
        }
        Ok(Annotation::new(importance, urgency))
    }
}
