//! Quick-fill presets for common growing scenarios.
//!
//! Presets are static and immutable at runtime. Buttons carry the preset key
//! in a data attribute; lookup goes through [`PresetKind::from_key`] so an
//! unknown key simply does nothing.

use crate::Field;
use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PresetKind {
    Rice,
    Wheat,
    Vegetable,
    Fruit,
}

static KEY_LOOKUP: Lazy<HashMap<&'static str, PresetKind>> = Lazy::new(|| {
    PresetKind::ALL.iter().map(|&p| (p.key(), p)).collect()
});

impl PresetKind {
    pub const ALL: [PresetKind; 4] = [
        PresetKind::Rice,
        PresetKind::Wheat,
        PresetKind::Vegetable,
        PresetKind::Fruit,
    ];

    /// The `data-preset` attribute value.
    pub fn key(self) -> &'static str {
        match self {
            PresetKind::Rice => "rice",
            PresetKind::Wheat => "wheat",
            PresetKind::Vegetable => "vegetable",
            PresetKind::Fruit => "fruit",
        }
    }

    pub fn from_key(key: &str) -> Option<PresetKind> {
        KEY_LOOKUP.get(key).copied()
    }

    /// Resting button label.
    pub fn label(self) -> &'static str {
        match self {
            PresetKind::Rice => "🌾 Rice Field",
            PresetKind::Wheat => "🌾 Wheat Field",
            PresetKind::Vegetable => "🥬 Vegetable Garden",
            PresetKind::Fruit => "🍎 Fruit Orchard",
        }
    }

    /// Field values this preset writes into every matching pair.
    pub fn values(self) -> [(Field, f64); 7] {
        match self {
            PresetKind::Rice => [
                (Field::Nitrogen, 90.0),
                (Field::Phosphorus, 42.0),
                (Field::Potassium, 43.0),
                (Field::Temperature, 25.0),
                (Field::Humidity, 82.0),
                (Field::Ph, 6.5),
                (Field::Rainfall, 220.0),
            ],
            PresetKind::Wheat => [
                (Field::Nitrogen, 80.0),
                (Field::Phosphorus, 50.0),
                (Field::Potassium, 45.0),
                (Field::Temperature, 22.0),
                (Field::Humidity, 70.0),
                (Field::Ph, 6.8),
                (Field::Rainfall, 150.0),
            ],
            PresetKind::Vegetable => [
                (Field::Nitrogen, 70.0),
                (Field::Phosphorus, 45.0),
                (Field::Potassium, 50.0),
                (Field::Temperature, 24.0),
                (Field::Humidity, 75.0),
                (Field::Ph, 6.5),
                (Field::Rainfall, 180.0),
            ],
            PresetKind::Fruit => [
                (Field::Nitrogen, 60.0),
                (Field::Phosphorus, 40.0),
                (Field::Potassium, 55.0),
                (Field::Temperature, 26.0),
                (Field::Humidity, 70.0),
                (Field::Ph, 6.2),
                (Field::Rainfall, 200.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_lookup_is_total_over_known_presets() {
        for preset in PresetKind::ALL {
            assert_eq!(PresetKind::from_key(preset.key()), Some(preset));
        }
        assert_eq!(PresetKind::from_key("orchid"), None);
        assert_eq!(PresetKind::from_key(""), None);
        // Case sensitive, like the data attribute it mirrors.
        assert_eq!(PresetKind::from_key("Rice"), None);
    }

    #[test]
    fn every_preset_covers_all_fields_within_bounds() {
        for preset in PresetKind::ALL {
            let values = preset.values();
            assert_eq!(values.len(), Field::ALL.len());
            for (field, value) in values {
                let b = field.bounds();
                assert!(
                    value >= b.min && value <= b.max,
                    "{:?} sets {field} to {value}, outside [{}, {}]",
                    preset,
                    b.min,
                    b.max
                );
            }
        }
    }

    #[test]
    fn rice_matches_the_documented_scenario() {
        let values: std::collections::BTreeMap<_, _> =
            PresetKind::Rice.values().into_iter().collect();
        assert_eq!(values[&Field::Nitrogen], 90.0);
        assert_eq!(values[&Field::Phosphorus], 42.0);
        assert_eq!(values[&Field::Potassium], 43.0);
        assert_eq!(values[&Field::Temperature], 25.0);
        assert_eq!(values[&Field::Humidity], 82.0);
        assert_eq!(values[&Field::Ph], 6.5);
        assert_eq!(values[&Field::Rainfall], 220.0);
    }
}
