//! Pretrained category classifiers loaded from exported weights

use crate::error::{CategorizerError, Result};
use crate::models::vectorizer::SparseFeatures;
use ndarray::{Array1, Array2, ArrayView1};
use serde::Deserialize;
use std::path::Path;

pub trait Classifier: Send + Sync {
    /// Raw class id predicted for one feature row
    fn predict(&self, features: &SparseFeatures) -> Result<i64>;

    /// Expected feature width, when the artifact fixes one
    fn input_dimension(&self) -> Option<usize>;
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ClassifierArtifact {
    Linear {
        classes: Vec<i64>,
        coef: Vec<Vec<f32>>,
        intercept: Vec<f32>,
    },
    NearestCentroid {
        classes: Vec<i64>,
        centroids: Vec<Vec<f32>>,
    },
}

fn to_matrix(rows: Vec<Vec<f32>>, what: &str) -> Result<Array2<f32>> {
    let height = rows.len();
    let width = rows.first().map(Vec::len).unwrap_or(0);
    if height == 0 || width == 0 {
        return Err(CategorizerError::ModelLoading(format!("{} matrix is empty", what)));
    }
    if let Some(row) = rows.iter().position(|r| r.len() != width) {
        return Err(CategorizerError::ModelLoading(format!(
            "{} row {} has {} columns, expected {}",
            what,
            row,
            rows[row].len(),
            width
        )));
    }

    let flat: Vec<f32> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((height, width), flat)
        .map_err(|e| CategorizerError::ModelLoading(format!("{} matrix: {}", what, e)))
}

fn sparse_dot(row: ArrayView1<f32>, features: &SparseFeatures) -> f32 {
    features
        .entries
        .iter()
        .map(|(column, value)| row[*column] * value)
        .sum()
}

fn check_width(expected: usize, features: &SparseFeatures) -> Result<()> {
    if features.dimension != expected {
        return Err(CategorizerError::Classification(format!(
            "Feature width {} does not match classifier width {}",
            features.dimension, expected
        )));
    }
    Ok(())
}

/// One-vs-rest linear model: the class with the highest `w . x + b` wins.
/// A single weight row is a binary model deciding on the sign.
#[derive(Debug)]
pub struct LinearClassifier {
    classes: Vec<i64>,
    coef: Array2<f32>,
    intercept: Array1<f32>,
}

impl LinearClassifier {
    pub fn new(classes: Vec<i64>, coef: Vec<Vec<f32>>, intercept: Vec<f32>) -> Result<Self> {
        let coef = to_matrix(coef, "coef")?;
        let rows = coef.nrows();

        if intercept.len() != rows {
            return Err(CategorizerError::ModelLoading(format!(
                "intercept has {} entries for {} weight rows",
                intercept.len(),
                rows
            )));
        }
        let expected_classes = if rows == 1 { 2 } else { rows };
        if classes.len() != expected_classes {
            return Err(CategorizerError::ModelLoading(format!(
                "{} classes for {} weight rows",
                classes.len(),
                rows
            )));
        }

        Ok(Self {
            classes,
            coef,
            intercept: Array1::from(intercept),
        })
    }

    pub fn decision_function(&self, features: &SparseFeatures) -> Result<Array1<f32>> {
        check_width(self.coef.ncols(), features)?;
        let scores = self
            .coef
            .rows()
            .into_iter()
            .zip(self.intercept.iter())
            .map(|(row, bias)| sparse_dot(row, features) + bias)
            .collect::<Vec<f32>>();
        Ok(Array1::from(scores))
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &SparseFeatures) -> Result<i64> {
        let scores = self.decision_function(features)?;

        if scores.len() == 1 {
            let index = if scores[0] > 0.0 { 1 } else { 0 };
            return Ok(self.classes[index]);
        }

        // First maximum wins on ties
        let best = scores
            .iter()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (index, &score)| {
                if score > best.1 { (index, score) } else { best }
            })
            .0;
        Ok(self.classes[best])
    }

    fn input_dimension(&self) -> Option<usize> {
        Some(self.coef.ncols())
    }
}

/// Assigns the class of the closest centroid (euclidean)
#[derive(Debug)]
pub struct NearestCentroidClassifier {
    classes: Vec<i64>,
    centroids: Array2<f32>,
    squared_norms: Array1<f32>,
}

impl NearestCentroidClassifier {
    pub fn new(classes: Vec<i64>, centroids: Vec<Vec<f32>>) -> Result<Self> {
        let centroids = to_matrix(centroids, "centroids")?;
        if classes.len() != centroids.nrows() {
            return Err(CategorizerError::ModelLoading(format!(
                "{} classes for {} centroids",
                classes.len(),
                centroids.nrows()
            )));
        }

        let squared_norms = centroids
            .rows()
            .into_iter()
            .map(|row| row.dot(&row))
            .collect::<Vec<f32>>();

        Ok(Self {
            classes,
            centroids,
            squared_norms: Array1::from(squared_norms),
        })
    }
}

impl Classifier for NearestCentroidClassifier {
    fn predict(&self, features: &SparseFeatures) -> Result<i64> {
        check_width(self.centroids.ncols(), features)?;
        let x_norm = features.squared_norm();

        let best = self
            .centroids
            .rows()
            .into_iter()
            .zip(self.squared_norms.iter())
            .map(|(row, c_norm)| c_norm - 2.0 * sparse_dot(row, features) + x_norm)
            .enumerate()
            .fold((0, f32::INFINITY), |best, (index, distance)| {
                if distance < best.1 { (index, distance) } else { best }
            })
            .0;
        Ok(self.classes[best])
    }

    fn input_dimension(&self) -> Option<usize> {
        Some(self.centroids.ncols())
    }
}

/// Load whichever classifier kind the artifact declares
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CategorizerError::ModelLoading(format!("Failed to read classifier '{}': {}", path.display(), e))
    })?;
    classifier_from_json(&content)
}

pub fn classifier_from_json(content: &str) -> Result<Box<dyn Classifier>> {
    let artifact: ClassifierArtifact = serde_json::from_str(content)
        .map_err(|e| CategorizerError::ModelLoading(format!("Invalid classifier artifact: {}", e)))?;

    match artifact {
        ClassifierArtifact::Linear { classes, coef, intercept } => {
            Ok(Box::new(LinearClassifier::new(classes, coef, intercept)?))
        }
        ClassifierArtifact::NearestCentroid { classes, centroids } => {
            Ok(Box::new(NearestCentroidClassifier::new(classes, centroids)?))
        }
    }
}
