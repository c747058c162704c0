//! Core state model for the crop advisor form.
//!
//! Everything the browser layer in `main.rs` renders is derived from the
//! types here. The DOM never holds authoritative state: each slider/input
//! pair maps to a single `f64` in [`FormState`], every interaction becomes a
//! [`FormEvent`] fed through [`FormState::apply`], and animation timing comes
//! back out as [`Effect`] values carrying their delays as data. That keeps
//! the whole behavior layer testable without a browser.

use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;

pub mod presets;
pub mod reveal;

/// Fixed delays and offsets used by the animation effects.
pub mod defaults {
    /// Delay before scrolling the results region into view after submit.
    pub const SCROLL_DELAY_MS: u32 = 500;
    /// Delay before confidence bars fill to their target width.
    pub const CONFIDENCE_BAR_DELAY_MS: u32 = 300;
    /// Per-card stagger for the result card fade-in.
    pub const CARD_STAGGER_MS: u32 = 100;
    /// How long a preset button shows "Applied!" before reverting.
    pub const PRESET_FEEDBACK_MS: u32 = 1500;
    /// Duration of the input pulse after a preset fills the form.
    pub const PULSE_MS: u32 = 200;
    /// Pointer offset for the shared tooltip overlay.
    pub const TOOLTIP_OFFSET_PX: f64 = 10.0;
    /// Visibility fraction at which the scroll-reveal observer fires.
    pub const REVEAL_THRESHOLD: f64 = 0.1;
    /// The observer triggers this many pixels before full viewport entry.
    pub const REVEAL_MARGIN_PX: i32 = 50;
}

/// The seven soil/climate parameters of the recommendation form.
///
/// Wire names follow the server's form contract (`N`, `P`, `K`,
/// `temperature`, `humidity`, `ph`, `rainfall`); the paired range control
/// uses the `<name>_slider` id convention.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Field {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

/// Inclusive value range and keyboard step for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Bounds {
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Nitrogen,
        Field::Phosphorus,
        Field::Potassium,
        Field::Temperature,
        Field::Humidity,
        Field::Ph,
        Field::Rainfall,
    ];

    /// Form field name, also the id of the numeric input element.
    pub fn name(self) -> &'static str {
        match self {
            Field::Nitrogen => "N",
            Field::Phosphorus => "P",
            Field::Potassium => "K",
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::Ph => "ph",
            Field::Rainfall => "rainfall",
        }
    }

    /// Id of the paired range control.
    pub fn slider_id(self) -> String {
        format!("{}_slider", self.name())
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Nitrogen => "Nitrogen (N)",
            Field::Phosphorus => "Phosphorus (P)",
            Field::Potassium => "Potassium (K)",
            Field::Temperature => "Temperature (°C)",
            Field::Humidity => "Humidity (%)",
            Field::Ph => "Soil pH",
            Field::Rainfall => "Rainfall (mm)",
        }
    }

    /// Ranges from the server's `/get_ranges` guidance endpoint.
    pub fn bounds(self) -> Bounds {
        match self {
            Field::Nitrogen => Bounds { min: 0.0, max: 140.0, step: 1.0 },
            Field::Phosphorus => Bounds { min: 0.0, max: 145.0, step: 1.0 },
            Field::Potassium => Bounds { min: 0.0, max: 205.0, step: 1.0 },
            Field::Temperature => Bounds { min: 8.0, max: 44.0, step: 0.1 },
            Field::Humidity => Bounds { min: 14.0, max: 100.0, step: 1.0 },
            Field::Ph => Bounds { min: 3.5, max: 10.0, step: 0.1 },
            Field::Rainfall => Bounds { min: 20.0, max: 300.0, step: 1.0 },
        }
    }

    /// Agronomic guidance shown next to each control.
    pub fn optimal(self) -> &'static str {
        match self {
            Field::Nitrogen => "20-100",
            Field::Phosphorus => "10-50",
            Field::Potassium => "20-100",
            Field::Temperature => "20-30",
            Field::Humidity => "50-90",
            Field::Ph => "6.0-7.5",
            Field::Rainfall => "100-250",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            Field::Nitrogen => "Nitrogen content in soil (kg/ha). Drives leafy growth.",
            Field::Phosphorus => "Phosphorus content in soil (kg/ha). Supports root development.",
            Field::Potassium => "Potassium content in soil (kg/ha). Improves disease resistance.",
            Field::Temperature => "Average temperature during the growing season.",
            Field::Humidity => "Relative air humidity during the growing season.",
            Field::Ph => "Soil acidity. Most crops prefer slightly acidic to neutral soil.",
            Field::Rainfall => "Expected rainfall over the growing season.",
        }
    }

    /// Initial slider position before the user touches anything.
    pub fn default_value(self) -> f64 {
        match self {
            Field::Nitrogen => 50.0,
            Field::Phosphorus => 50.0,
            Field::Potassium => 50.0,
            Field::Temperature => 25.0,
            Field::Humidity => 65.0,
            Field::Ph => 6.5,
            Field::Rainfall => 120.0,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fraction of the slider track to fill, as a percentage of the span.
///
/// The input is clamped first, so the result is always in `[0, 100]` and
/// monotonic non-decreasing in `value`. Degenerate bounds (`min == max`)
/// yield 0.0 rather than NaN.
pub fn fill_percent(bounds: Bounds, value: f64) -> f64 {
    if bounds.span() <= f64::EPSILON {
        return 0.0;
    }
    (bounds.clamp(value) - bounds.min) / bounds.span() * 100.0
}

/// Two-stop track gradient split at the fill percentage.
pub fn track_gradient(percent: f64) -> String {
    format!(
        "background: linear-gradient(to right, #4caf50 0%, #4caf50 {percent:.2}%, \
         #e0e0e0 {percent:.2}%, #e0e0e0 100%)"
    )
}

/// Render a field value the way the browser would: integers without a
/// decimal point, everything else with one decimal.
pub fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Result of a live keystroke in the numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// Parsed fine; carry the clamped value into the pair.
    Updated(f64),
    /// Not a number yet (empty, "-", "1e"); leave the pair untouched.
    Ignored,
}

/// Live-input semantics: parse, clamp, or leave alone. Never an error.
pub fn parse_live(bounds: Bounds, raw: &str) -> EditOutcome {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => EditOutcome::Updated(bounds.clamp(v)),
        _ => EditOutcome::Ignored,
    }
}

/// What the numeric input keeps showing after a live keystroke. An
/// out-of-range number snaps to its clamped canonical form right away, so
/// the box never disagrees with the stored value; partial edits ("-", "",
/// "1e") stay as typed until the blur repair.
pub fn mirror_live(bounds: Bounds, raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => {
            let clamped = bounds.clamp(v);
            if clamped == v {
                raw.to_string()
            } else {
                format_value(clamped)
            }
        }
        _ => raw.to_string(),
    }
}

/// Blur semantics: the stricter repair pass. Non-numeric or below-min
/// snaps to `min`, above-max snaps to `max`.
pub fn repair_on_blur(bounds: Bounds, raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => bounds.clamp(v),
        _ => bounds.min,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDir {
    Up,
    Down,
}

impl StepDir {
    /// Map an arrow key name to a step direction, if it is one.
    pub fn from_key(key: &str) -> Option<StepDir> {
        match key {
            "ArrowUp" | "ArrowRight" => Some(StepDir::Up),
            "ArrowDown" | "ArrowLeft" => Some(StepDir::Down),
            _ => None,
        }
    }
}

/// One keyboard step from `current`, clamped to the field's bounds.
pub fn step_value(bounds: Bounds, current: f64, dir: StepDir) -> f64 {
    let step = if bounds.step > 0.0 { bounds.step } else { 1.0 };
    match dir {
        StepDir::Up => bounds.clamp(current + step),
        StepDir::Down => bounds.clamp(current - step),
    }
}

/// The single shared tooltip overlay. Last write wins; hiding only drops
/// opacity, the element stays in the layout tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipState {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

impl TooltipState {
    pub fn show(&mut self, text: &str, client_x: f64, client_y: f64) {
        self.text = text.to_string();
        self.visible = true;
        self.follow(client_x, client_y);
    }

    /// Track the pointer with the fixed offset. No-op while hidden.
    pub fn follow(&mut self, client_x: f64, client_y: f64) {
        if !self.visible {
            return;
        }
        self.x = client_x + defaults::TOOLTIP_OFFSET_PX;
        self.y = client_y + defaults::TOOLTIP_OFFSET_PX;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Every interaction the form reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// The range control moved; `raw` is its string value.
    SliderMoved { field: Field, raw: String },
    /// A keystroke landed in the numeric input.
    InputEdited { field: Field, raw: String },
    /// The numeric input lost focus; run the repair pass.
    InputBlurred { field: Field, raw: String },
    /// Arrow key on a focused slider.
    ArrowKey { field: Field, dir: StepDir },
    /// A preset button was clicked; unknown keys are a no-op.
    PresetPicked { key: String },
    /// The form is being submitted.
    FormSubmitted,
    /// Initialization asks for the preset toolbar; guarded one-shot.
    ToolbarRequested,
    /// Restore values templated into a post-submission render.
    InputsRestored(BTreeMap<String, f64>),
    /// The "Applied!" feedback window elapsed.
    PresetFeedbackElapsed(presets::PresetKind),
    /// The input pulse window elapsed.
    PulseElapsed,
}

/// Deferred work a reducer step asks the browser layer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Feed `event` back through the reducer after the delay.
    Dispatch { delay_ms: u32, event: FormEvent },
    /// Bring the results region into view after the delay.
    ScrollToResults { delay_ms: u32 },
}

/// Authoritative UI state for the whole form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    values: BTreeMap<Field, f64>,
    pub submitting: bool,
    /// Which preset button is currently showing "Applied!" feedback.
    pub applied_preset: Option<presets::PresetKind>,
    /// True while inputs show the post-preset pulse.
    pub pulsing: bool,
    toolbar_installed: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        let values = Field::ALL
            .iter()
            .map(|&f| (f, f.default_value()))
            .collect();
        FormState {
            values,
            submitting: false,
            applied_preset: None,
            pulsing: false,
            toolbar_installed: false,
        }
    }

    /// Current value of a pair; both controls render from this.
    pub fn value(&self, field: Field) -> f64 {
        self.values
            .get(&field)
            .copied()
            .unwrap_or_else(|| field.default_value())
    }

    fn set(&mut self, field: Field, value: f64) {
        self.values.insert(field, field.bounds().clamp(value));
    }

    /// One-shot guard for the injected preset toolbar. Returns false when
    /// the toolbar already exists, so running initialization twice never
    /// duplicates it.
    pub fn install_toolbar(&mut self) -> bool {
        if self.toolbar_installed {
            return false;
        }
        self.toolbar_installed = true;
        true
    }

    pub fn toolbar_installed(&self) -> bool {
        self.toolbar_installed
    }

    /// Reduce one event into the next state, returning the deferred effects
    /// it produced. This is the only write path into the pair values.
    pub fn apply(&mut self, event: FormEvent) -> Vec<Effect> {
        match event {
            FormEvent::SliderMoved { field, raw } => {
                match raw.trim().parse::<f64>() {
                    Ok(v) if v.is_finite() => self.set(field, v),
                    _ => debug!("ignoring non-numeric slider value {:?} for {}", raw, field),
                }
                Vec::new()
            }
            FormEvent::InputEdited { field, raw } => {
                if let EditOutcome::Updated(v) = parse_live(field.bounds(), &raw) {
                    self.set(field, v);
                }
                Vec::new()
            }
            FormEvent::InputBlurred { field, raw } => {
                self.set(field, repair_on_blur(field.bounds(), &raw));
                Vec::new()
            }
            FormEvent::ArrowKey { field, dir } => {
                let next = step_value(field.bounds(), self.value(field), dir);
                self.set(field, next);
                Vec::new()
            }
            FormEvent::PresetPicked { key } => match presets::PresetKind::from_key(&key) {
                Some(preset) => {
                    for (field, value) in preset.values() {
                        self.set(field, value);
                    }
                    self.applied_preset = Some(preset);
                    self.pulsing = true;
                    vec![
                        Effect::Dispatch {
                            delay_ms: defaults::PRESET_FEEDBACK_MS,
                            event: FormEvent::PresetFeedbackElapsed(preset),
                        },
                        Effect::Dispatch {
                            delay_ms: defaults::PULSE_MS,
                            event: FormEvent::PulseElapsed,
                        },
                    ]
                }
                None => {
                    debug!("unknown preset key {:?}, ignoring", key);
                    Vec::new()
                }
            },
            FormEvent::FormSubmitted => {
                self.submitting = true;
                vec![Effect::ScrollToResults {
                    delay_ms: defaults::SCROLL_DELAY_MS,
                }]
            }
            FormEvent::ToolbarRequested => {
                self.install_toolbar();
                Vec::new()
            }
            FormEvent::InputsRestored(inputs) => {
                for (name, value) in &inputs {
                    match Field::from_name(name) {
                        Some(field) => self.set(field, *value),
                        None => warn!("results payload carries unknown field {:?}", name),
                    }
                }
                Vec::new()
            }
            FormEvent::PresetFeedbackElapsed(preset) => {
                // A newer click may own the feedback label by now.
                if self.applied_preset == Some(preset) {
                    self.applied_preset = None;
                }
                Vec::new()
            }
            FormEvent::PulseElapsed => {
                self.pulsing = false;
                Vec::new()
            }
        }
    }
}

/// Crop background information as templated by the server.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct CropInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// One ranked crop with its model confidence (0-100).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub confidence: f64,
    #[serde(default)]
    pub info: CropInfo,
}

/// JSON block the server embeds into a post-submission render.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ResultsPayload {
    #[serde(default)]
    pub top_crops: Vec<Recommendation>,
    /// The submitted form values, echoed back so the page can restore them.
    #[serde(default)]
    pub inputs: Option<BTreeMap<String, f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::PresetKind;

    fn bounds(min: f64, max: f64, step: f64) -> Bounds {
        Bounds { min, max, step }
    }

    #[test]
    fn pair_values_stay_in_bounds_across_event_sequences() {
        let mut form = FormState::new();
        let events = [
            FormEvent::SliderMoved { field: Field::Nitrogen, raw: "900".into() },
            FormEvent::InputEdited { field: Field::Nitrogen, raw: "-42".into() },
            FormEvent::InputEdited { field: Field::Ph, raw: "99.9".into() },
            FormEvent::ArrowKey { field: Field::Rainfall, dir: StepDir::Down },
            FormEvent::InputBlurred { field: Field::Humidity, raw: "0".into() },
        ];
        for ev in events {
            form.apply(ev);
        }
        for field in Field::ALL {
            let b = field.bounds();
            let v = form.value(field);
            assert!(v >= b.min && v <= b.max, "{field} out of bounds: {v}");
        }
    }

    #[test]
    fn live_edit_ignores_unparsable_text() {
        let mut form = FormState::new();
        let before = form.value(Field::Temperature);
        form.apply(FormEvent::InputEdited {
            field: Field::Temperature,
            raw: "abc".into(),
        });
        assert_eq!(form.value(Field::Temperature), before);
    }

    #[test]
    fn live_mirror_clamps_out_of_range_numbers_immediately() {
        let b = bounds(0.0, 140.0, 1.0);
        // The box must never show a number the pair does not hold.
        assert_eq!(mirror_live(b, "900"), "140");
        assert_eq!(mirror_live(b, "-42"), "0");
        assert_eq!(mirror_live(b, "70"), "70");
        // Unfinished edits wait for the blur repair instead.
        assert_eq!(mirror_live(b, ""), "");
        assert_eq!(mirror_live(b, "-"), "-");
        assert_eq!(mirror_live(b, "abc"), "abc");
    }

    #[test]
    fn blur_repairs_invalid_to_min_and_high_to_max() {
        assert_eq!(repair_on_blur(bounds(3.5, 10.0, 0.1), "garbage"), 3.5);
        assert_eq!(repair_on_blur(bounds(3.5, 10.0, 0.1), ""), 3.5);
        assert_eq!(repair_on_blur(bounds(3.5, 10.0, 0.1), "-1"), 3.5);
        assert_eq!(repair_on_blur(bounds(3.5, 10.0, 0.1), "42"), 10.0);
        assert_eq!(repair_on_blur(bounds(3.5, 10.0, 0.1), "7.2"), 7.2);
    }

    #[test]
    fn gradient_is_monotonic_in_value() {
        let b = bounds(20.0, 300.0, 1.0);
        let mut last = -1.0;
        for i in 0..=280 {
            let pct = fill_percent(b, 20.0 + i as f64);
            assert!(pct >= last);
            last = pct;
        }
        assert_eq!(fill_percent(b, 20.0), 0.0);
        assert_eq!(fill_percent(b, 300.0), 100.0);
        // Clamped outside the range too.
        assert_eq!(fill_percent(b, -5.0), 0.0);
        assert_eq!(fill_percent(b, 1000.0), 100.0);
    }

    #[test]
    fn degenerate_bounds_pin_gradient_to_zero() {
        assert_eq!(fill_percent(bounds(5.0, 5.0, 1.0), 5.0), 0.0);
    }

    #[test]
    fn arrow_up_steps_by_declared_step_and_clamps() {
        let b = bounds(0.0, 100.0, 5.0);
        assert_eq!(step_value(b, 20.0, StepDir::Up), 25.0);
        assert_eq!(step_value(b, 98.0, StepDir::Up), 100.0);
        assert_eq!(step_value(b, 2.0, StepDir::Down), 0.0);
        // Unspecified step defaults to 1.
        assert_eq!(step_value(bounds(0.0, 10.0, 0.0), 3.0, StepDir::Up), 4.0);
    }

    #[test]
    fn arrow_key_flows_through_the_same_reducer_path() {
        let mut form = FormState::new();
        form.apply(FormEvent::SliderMoved {
            field: Field::Humidity,
            raw: "60".into(),
        });
        form.apply(FormEvent::ArrowKey {
            field: Field::Humidity,
            dir: StepDir::Up,
        });
        assert_eq!(form.value(Field::Humidity), 61.0);
    }

    #[test]
    fn rice_preset_sets_exactly_the_documented_values() {
        let mut form = FormState::new();
        let effects = form.apply(FormEvent::PresetPicked { key: "rice".into() });
        assert_eq!(form.value(Field::Nitrogen), 90.0);
        assert_eq!(form.value(Field::Phosphorus), 42.0);
        assert_eq!(form.value(Field::Potassium), 43.0);
        assert_eq!(form.value(Field::Temperature), 25.0);
        assert_eq!(form.value(Field::Humidity), 82.0);
        assert_eq!(form.value(Field::Ph), 6.5);
        assert_eq!(form.value(Field::Rainfall), 220.0);
        assert_eq!(form.applied_preset, Some(PresetKind::Rice));
        assert!(form.pulsing);
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn unknown_preset_key_is_a_no_op() {
        let mut form = FormState::new();
        let before = form.clone();
        let effects = form.apply(FormEvent::PresetPicked { key: "tundra".into() });
        assert!(effects.is_empty());
        assert_eq!(form, before);
    }

    #[test]
    fn preset_feedback_reverts_only_for_the_owning_preset() {
        let mut form = FormState::new();
        form.apply(FormEvent::PresetPicked { key: "rice".into() });
        form.apply(FormEvent::PresetPicked { key: "wheat".into() });
        // The rice timer firing late must not clear wheat's feedback.
        form.apply(FormEvent::PresetFeedbackElapsed(PresetKind::Rice));
        assert_eq!(form.applied_preset, Some(PresetKind::Wheat));
        form.apply(FormEvent::PresetFeedbackElapsed(PresetKind::Wheat));
        assert_eq!(form.applied_preset, None);
    }

    #[test]
    fn submit_disables_and_schedules_the_scroll() {
        let mut form = FormState::new();
        let effects = form.apply(FormEvent::FormSubmitted);
        assert!(form.submitting);
        assert_eq!(
            effects,
            vec![Effect::ScrollToResults {
                delay_ms: defaults::SCROLL_DELAY_MS
            }]
        );
    }

    #[test]
    fn toolbar_installs_at_most_once() {
        let mut form = FormState::new();
        assert!(form.install_toolbar());
        assert!(!form.install_toolbar());
        assert!(form.toolbar_installed());

        // Same guard through the event path.
        let mut form = FormState::new();
        form.apply(FormEvent::ToolbarRequested);
        form.apply(FormEvent::ToolbarRequested);
        assert!(form.toolbar_installed());
    }

    #[test]
    fn restored_inputs_are_clamped_and_unknown_names_skipped() {
        let mut form = FormState::new();
        let mut inputs = BTreeMap::new();
        inputs.insert("N".to_string(), 90.0);
        inputs.insert("ph".to_string(), 12.0);
        inputs.insert("salinity".to_string(), 3.0);
        form.apply(FormEvent::InputsRestored(inputs));
        assert_eq!(form.value(Field::Nitrogen), 90.0);
        assert_eq!(form.value(Field::Ph), 10.0);
    }

    #[test]
    fn tooltip_follows_pointer_with_fixed_offset() {
        let mut tip = TooltipState::default();
        tip.show("Soil acidity", 100.0, 40.0);
        assert!(tip.visible);
        assert_eq!((tip.x, tip.y), (110.0, 50.0));
        tip.follow(200.0, 80.0);
        assert_eq!((tip.x, tip.y), (210.0, 90.0));
        tip.hide();
        assert!(!tip.visible);
        // Hidden overlay keeps its last text; only opacity changes.
        assert_eq!(tip.text, "Soil acidity");
    }

    #[test]
    fn results_payload_round_trips_the_server_shape() {
        let json = r#"{
            "top_crops": [
                {"name": "rice", "confidence": 87.41,
                 "info": {"name": "Rice", "emoji": "🌾",
                          "description": "Staple food grain",
                          "season": "Monsoon/Kharif", "duration": "90-150 days",
                          "tips": ["Requires standing water"]}},
                {"name": "jute", "confidence": 6.2}
            ],
            "inputs": {"N": 90.0, "ph": 6.5}
        }"#;
        let payload: ResultsPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.top_crops.len(), 2);
        assert_eq!(payload.top_crops[0].info.emoji, "🌾");
        // Missing info block defaults instead of failing.
        assert_eq!(payload.top_crops[1].info, CropInfo::default());
        assert_eq!(payload.inputs.unwrap()["N"], 90.0);

        let empty: ResultsPayload = serde_json::from_str("{}").unwrap();
        assert!(empty.top_crops.is_empty());
    }

    #[test]
    fn format_value_drops_trailing_zero_decimals() {
        assert_eq!(format_value(25.0), "25");
        assert_eq!(format_value(6.5), "6.5");
        assert_eq!(format_value(82.0), "82");
    }
}
