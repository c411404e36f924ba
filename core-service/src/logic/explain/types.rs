use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub name: String,
    pub importance: f64, // share of total impurity decrease
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelExplanation {
    pub contributions: Vec<FeatureContribution>,
}

impl ModelExplanation {
    /// Most influential feature, if any split was made
    pub fn top(&self) -> Option<&FeatureContribution> {
        self.contributions.first().filter(|c| c.importance > 0.0)
    }
}
