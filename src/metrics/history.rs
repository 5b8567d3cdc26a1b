use serde::{Deserialize, Serialize};

/// Per-epoch training curves collected by the training driver.
///
/// One entry is appended to each sequence per reported epoch. The sequences
/// exist for reporting and plotting by an external collaborator; nothing in
/// the training loop reads them back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingHistory {
    /// Exact-match rate on the full training set, one entry per epoch.
    pub train_accuracy: Vec<f32>,
    /// Mean per-sample log-probability of the true class on the training set.
    pub train_cost: Vec<f32>,
    /// Exact-match rate on the validation set, when one was supplied.
    pub validation_accuracy: Vec<f32>,
    /// Mean per-sample log-probability on the validation set.
    pub validation_cost: Vec<f32>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reported epochs.
    pub fn epochs(&self) -> usize {
        self.train_accuracy.len()
    }

    /// Running mean of the train cost over every epoch recorded so far.
    /// The per-epoch entries are themselves means over a set of constant
    /// size, so this equals the mean over all samples seen to date.
    pub fn mean_train_cost(&self) -> Option<f32> {
        mean(&self.train_cost)
    }

    /// Running mean of the validation cost over every epoch recorded so far.
    pub fn mean_validation_cost(&self) -> Option<f32> {
        mean(&self.validation_cost)
    }

    /// Save the curves as JSON.
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Load curves previously written by [`TrainingHistory::save`].
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f32>() / values.len() as f32)
}
