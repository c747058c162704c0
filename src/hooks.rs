//! Custom hook wiring one slider/input pair to the form store.

use crop_advisor::{format_value, mirror_live, repair_on_blur, Field, FormEvent, StepDir};
use web_sys::HtmlInputElement;
use yew::hook;
use yew::prelude::*;

/// Callbacks and the text mirror for a single slider/input pair.
///
/// The numeric value lives in the central `FormState`; only the text the
/// user is currently typing is local, so an unfinished edit ("7.", "")
/// can sit in the box until blur repairs it.
pub struct PairInput {
    /// Current content of the numeric input element.
    pub text: String,
    /// `oninput` for the range control.
    pub on_slider_input: Callback<InputEvent>,
    /// `oninput` for the numeric input.
    pub on_text_input: Callback<InputEvent>,
    /// `onblur` for the numeric input: the strict repair pass.
    pub on_blur: Callback<FocusEvent>,
    /// `onkeydown` for the range control: arrow-key stepping.
    pub on_slider_keydown: Callback<KeyboardEvent>,
}

#[hook]
pub fn use_pair(field: Field, value: f64, dispatch: Callback<FormEvent>) -> PairInput {
    let text = use_state(|| format_value(value));

    // Resync text whenever the canonical value changes from anywhere else:
    // slider drag, arrow key, preset fill, restored inputs.
    {
        let text = text.clone();
        use_effect_with(value.to_bits(), move |_| {
            let canonical = format_value(value);
            if *text != canonical {
                text.set(canonical);
            }
            || ()
        });
    }

    let on_slider_input = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatch.emit(FormEvent::SliderMoved {
                field,
                raw: input.value(),
            });
        })
    };

    let on_text_input = {
        let text = text.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let raw = input.value();
            // Out-of-range numbers clamp in the box immediately; only a
            // partial edit keeps the raw text.
            text.set(mirror_live(field.bounds(), &raw));
            dispatch.emit(FormEvent::InputEdited { field, raw });
        })
    };

    let on_blur = {
        let text = text.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let raw = input.value();
            // Canonicalize the box through the same repair the store runs,
            // so "abc" never survives a blur even when the stored value
            // does not change.
            text.set(format_value(repair_on_blur(field.bounds(), &raw)));
            dispatch.emit(FormEvent::InputBlurred { field, raw });
        })
    };

    let on_slider_keydown = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: KeyboardEvent| {
            if let Some(dir) = StepDir::from_key(&e.key()) {
                e.prevent_default();
                dispatch.emit(FormEvent::ArrowKey { field, dir });
            }
        })
    };

    PairInput {
        text: (*text).clone(),
        on_slider_input,
        on_text_input,
        on_blur,
        on_slider_keydown,
    }
}
