//! Adapter around the frozen multi-class intent classifier.
//!
//! The model itself is a black box behind [`IntentModel`]: feature vector in,
//! probability distribution out. The shipped implementation executes the
//! dense-layer weights the external training job froze; swapping in a
//! different model is a trait impl, not an engine change.

use banter_core::{LabelEncoder, ModelArtifacts};

/// Black-box model contract: a fixed-length feature vector in, a normalized
/// probability distribution over all known classes out.
pub trait IntentModel: Send + Sync {
    fn infer(&self, features: &[f32]) -> Vec<f32>;
}

/// Single dense layer + softmax, executed from the frozen weight matrix.
#[derive(Clone, Debug)]
pub struct DenseSoftmaxModel {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

impl DenseSoftmaxModel {
    pub fn new(weights: Vec<Vec<f32>>, bias: Vec<f32>) -> Self {
        Self { weights, bias }
    }
}

impl IntentModel for DenseSoftmaxModel {
    fn infer(&self, features: &[f32]) -> Vec<f32> {
        let logits: Vec<f32> = self
            .weights
            .iter()
            .zip(self.bias.iter())
            .map(|(row, bias)| {
                row.iter().zip(features.iter()).map(|(w, x)| w * x).sum::<f32>() + bias
            })
            .collect();
        softmax(&logits)
    }
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|z| (z - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}

/// Per-turn classification result. `tag: None` is the unavailable sentinel;
/// callers must treat it exactly like a low-confidence prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub tag: Option<String>,
    pub confidence: f32,
}

impl Classification {
    pub fn unavailable() -> Self {
        Self { tag: None, confidence: 0.0 }
    }
}

/// Wraps the frozen model and its label encoder. An adapter built without
/// artifacts (failed or missing load) answers every query with the
/// unavailable sentinel instead of raising.
pub struct IntentClassifier {
    inner: Option<LoadedClassifier>,
}

struct LoadedClassifier {
    labels: LabelEncoder,
    model: Box<dyn IntentModel>,
}

impl IntentClassifier {
    /// Build from a validated artifact triple.
    pub fn from_artifacts(artifacts: &ModelArtifacts) -> Self {
        Self::new(
            artifacts.labels.clone(),
            Box::new(DenseSoftmaxModel::new(
                artifacts.model.weights.clone(),
                artifacts.model.bias.clone(),
            )),
        )
    }

    pub fn new(labels: LabelEncoder, model: Box<dyn IntentModel>) -> Self {
        Self { inner: Some(LoadedClassifier { labels, model }) }
    }

    /// The permanently degraded adapter used when the artifact load failed.
    pub fn unavailable() -> Self {
        Self { inner: None }
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    /// Classify an encoded feature vector. Ties between equal maximum
    /// probabilities resolve to the first maximum in class-index order; the
    /// order is the model's own and is not a documented guarantee.
    pub fn classify(&self, features: &[f32]) -> Classification {
        let Some(loaded) = &self.inner else {
            return Classification::unavailable();
        };

        let distribution = loaded.model.infer(features);
        let Some((best_index, best_probability)) = distribution
            .iter()
            .copied()
            .enumerate()
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        else {
            return Classification::unavailable();
        };

        match loaded.labels.tag(best_index) {
            Some(tag) => Classification {
                tag: Some(tag.to_string()),
                confidence: best_probability.clamp(0.0, 1.0),
            },
            // A class index the label encoder cannot map means the artifact
            // pair is inconsistent; degrade rather than guess.
            None => Classification::unavailable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use banter_core::LabelEncoder;

    use super::{Classification, DenseSoftmaxModel, IntentClassifier, IntentModel};

    fn labels(tags: &[&str]) -> LabelEncoder {
        LabelEncoder::new(tags.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn softmax_distribution_sums_to_one() {
        let model = DenseSoftmaxModel::new(vec![vec![2.0, 0.0], vec![0.0, 1.0]], vec![0.0, 0.0]);
        let distribution = model.infer(&[1.0, 0.0]);
        let sum: f32 = distribution.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(distribution[0] > distribution[1]);
    }

    #[test]
    fn classify_returns_the_argmax_tag() {
        let model = DenseSoftmaxModel::new(
            vec![vec![4.0, 0.0], vec![0.0, 4.0]],
            vec![0.0, 0.0],
        );
        let classifier = IntentClassifier::new(labels(&["weather", "jokes"]), Box::new(model));

        let result = classifier.classify(&[0.0, 1.0]);
        assert_eq!(result.tag.as_deref(), Some("jokes"));
        assert!(result.confidence > 0.9);
    }

    #[test]
    fn unavailable_adapter_returns_the_sentinel() {
        let classifier = IntentClassifier::unavailable();
        let result = classifier.classify(&[1.0, 0.0, 1.0]);
        assert_eq!(result, Classification::unavailable());
        assert_eq!(result.confidence, 0.0);
        assert!(result.tag.is_none());
    }

    #[test]
    fn confidence_is_the_maximum_class_probability() {
        struct FixedModel;
        impl IntentModel for FixedModel {
            fn infer(&self, _features: &[f32]) -> Vec<f32> {
                vec![0.1, 0.65, 0.25]
            }
        }
        let classifier =
            IntentClassifier::new(labels(&["greeting", "weather", "jokes"]), Box::new(FixedModel));
        let result = classifier.classify(&[]);
        assert_eq!(result.tag.as_deref(), Some("weather"));
        assert!((result.confidence - 0.65).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_class_index_degrades_to_the_sentinel() {
        struct WideModel;
        impl IntentModel for WideModel {
            fn infer(&self, _features: &[f32]) -> Vec<f32> {
                vec![0.2, 0.8]
            }
        }
        // Label encoder only knows one class; argmax lands on index 1.
        let classifier = IntentClassifier::new(labels(&["greeting"]), Box::new(WideModel));
        assert_eq!(classifier.classify(&[]), Classification::unavailable());
    }
}
