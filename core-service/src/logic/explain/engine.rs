use super::types::{FeatureContribution, ModelExplanation};
use crate::logic::features::layout::DEVICE_STATE_PREFIX;
use crate::logic::features::FeatureLayout;

/// Pair importances with layout columns, sorted by importance DESC.
/// Extra or missing importances are ignored / read as 0.
pub fn explain_model(layout: &FeatureLayout, importances: &[f64]) -> ModelExplanation {
    let mut contributions: Vec<FeatureContribution> = layout
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| FeatureContribution {
            name: name.clone(),
            importance: importances.get(i).copied().unwrap_or(0.0),
            description: get_description(name),
        })
        .collect();

    // Stable: ties keep layout order
    contributions.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    ModelExplanation { contributions }
}

fn get_description(name: &str) -> Option<String> {
    match name {
        "battery_temp" => Some("Battery temperature (°C)".to_string()),
        "ambient_temp" => Some("Ambient temperature (°C)".to_string()),
        "hour_of_day" => Some("Local hour of the reading".to_string()),
        _ => name
            .strip_prefix(DEVICE_STATE_PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .map(|state| format!("Device state is '{}'", state)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> FeatureLayout {
        FeatureLayout::new(&["charging".to_string(), "idle".to_string()])
    }

    #[test]
    fn test_sorted_descending() {
        let explanation = explain_model(&layout(), &[0.5, 0.1, 0.0, 0.3, 0.1]);
        let names: Vec<&str> = explanation.contributions.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["battery_temp", "device_state_charging", "ambient_temp", "device_state_idle", "hour_of_day"]
        );
        assert_eq!(explanation.top().map(|c| c.name.as_str()), Some("battery_temp"));
    }

    #[test]
    fn test_descriptions() {
        let explanation = explain_model(&layout(), &[]);
        let charging = explanation
            .contributions
            .iter()
            .find(|c| c.name == "device_state_charging")
            .unwrap();

        assert_eq!(charging.description.as_deref(), Some("Device state is 'charging'"));
        assert!(explanation.top().is_none());
    }
}
