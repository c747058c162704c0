//! Application-level configuration constants.

/// Id of the form element, matching the server template.
pub const FORM_ID: &str = "cropForm";
/// Where the native POST goes; the server re-renders the page with results.
pub const FORM_ACTION: &str = "/";

/// Id of the shared tooltip overlay element.
pub const TOOLTIP_ID: &str = "tooltip";

/// Id of the results region, present only on a post-submission render.
pub const RESULTS_SECTION_ID: &str = "resultsSection";
/// Id of the JSON block the server templates next to the results.
pub const RESULTS_DATA_ID: &str = "resultsData";

/// Id guarding the injected preset stylesheet against double insertion.
pub const PRESET_STYLE_ID: &str = "presetBtnStyles";
