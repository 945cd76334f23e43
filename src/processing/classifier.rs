//! Category classification of normalized resume text

use crate::config::ModelConfig;
use crate::error::{CategorizerError, Result};
use crate::models::classifier::{load_classifier, Classifier};
use crate::models::vectorizer::{TfidfVectorizer, Vectorizer};
use crate::processing::category::Category;
use log::{info, warn};
use std::time::Instant;

/// Vectorizer + classifier pair turning normalized text into a [`Category`].
///
/// Stateless between calls: every invocation runs the full transform and
/// prediction.
pub struct CategoryClassifier {
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
}

impl CategoryClassifier {
    pub fn new(vectorizer: Box<dyn Vectorizer>, classifier: Box<dyn Classifier>) -> Result<Self> {
        if let Some(expected) = classifier.input_dimension() {
            if expected != vectorizer.dimension() {
                return Err(CategorizerError::ModelLoading(format!(
                    "Vectorizer produces {} features but classifier expects {}",
                    vectorizer.dimension(),
                    expected
                )));
            }
        }

        Ok(Self { vectorizer, classifier })
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let start_time = Instant::now();

        info!("Loading vectorizer from: {}", config.vectorizer_path.display());
        let vectorizer = TfidfVectorizer::from_path(&config.vectorizer_path)?;

        info!("Loading classifier from: {}", config.classifier_path.display());
        let classifier = load_classifier(&config.classifier_path)?;

        let classifier = Self::new(Box::new(vectorizer), classifier)?;
        info!("Models loaded in {:.2?}", start_time.elapsed());
        Ok(classifier)
    }

    /// Classifier id for the text, before mapping
    pub fn predict_id(&self, normalized_text: &str) -> Result<i64> {
        let features = self.vectorizer.transform(normalized_text);
        self.classifier.predict(&features)
    }

    /// Unmapped ids and prediction errors both yield `Unrecognized`, so a
    /// single document never aborts the batch.
    pub fn categorize(&self, normalized_text: &str) -> Category {
        match self.predict_id(normalized_text) {
            Ok(id) => {
                let category = Category::from_id(id);
                if !category.is_recognized() {
                    warn!("Classifier returned unmapped id {}", id);
                }
                category
            }
            Err(e) => {
                warn!("Classification failed, using Unknown: {}", e);
                Category::Unrecognized(-1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classifier::classifier_from_json;
    use crate::models::vectorizer::SparseFeatures;

    struct FixedClassifier(i64);

    impl Classifier for FixedClassifier {
        fn predict(&self, _features: &SparseFeatures) -> Result<i64> {
            Ok(self.0)
        }

        fn input_dimension(&self) -> Option<usize> {
            None
        }
    }

    fn vectorizer() -> Box<dyn Vectorizer> {
        Box::new(
            TfidfVectorizer::from_json(
                r#"{"vocabulary": {"python": 0, "java": 1, "selenium": 2}, "idf": [1.0, 1.0, 1.0]}"#,
            )
            .unwrap(),
        )
    }

    fn linear() -> Box<dyn Classifier> {
        classifier_from_json(
            r#"{
                "kind": "linear",
                "classes": [20, 15, 2],
                "coef": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
                "intercept": [0.0, 0.0, 0.0]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_categorize_maps_prediction() {
        let classifier = CategoryClassifier::new(vectorizer(), linear()).unwrap();
        assert_eq!(classifier.categorize("python python java"), Category::PythonDeveloper);
        assert_eq!(classifier.categorize("java spring"), Category::JavaDeveloper);
        assert_eq!(classifier.categorize("selenium suites").label(), "Automation Testing");
    }

    #[test]
    fn test_unmapped_ids_are_unknown() {
        for id in [25, 99, -3] {
            let classifier = CategoryClassifier::new(vectorizer(), Box::new(FixedClassifier(id))).unwrap();
            assert_eq!(classifier.categorize("anything").label(), "Unknown");
        }
    }

    #[test]
    fn test_repeated_calls_agree() {
        let classifier = CategoryClassifier::new(vectorizer(), linear()).unwrap();
        let first = classifier.categorize("java developer");
        let second = classifier.categorize("java developer");
        assert_eq!(first, second);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let narrow = classifier_from_json(
            r#"{"kind": "linear", "classes": [0, 1], "coef": [[1.0], [0.0]], "intercept": [0.0, 0.0]}"#,
        )
        .unwrap();
        let result = CategoryClassifier::new(vectorizer(), narrow);
        assert!(matches!(result, Err(CategorizerError::ModelLoading(_))));
    }
}
