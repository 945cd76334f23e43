//! Pretrained model artifacts
//!
//! Artifacts are exported from the training environment as JSON. The
//! vectorizer file carries the fitted vocabulary and idf weights; the
//! classifier file carries its kind, class ids and weights.

pub mod classifier;
pub mod vectorizer;
