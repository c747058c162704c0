//! Pure Yew view components for the crop advisor form.
//!
//! Everything here renders from props; interaction flows back out through
//! callbacks into the form store in `main.rs`.

use crate::config::{RESULTS_SECTION_ID, TOOLTIP_ID};
use crate::hooks::use_pair;
use crop_advisor::presets::PresetKind;
use crop_advisor::reveal::{result_card, RevealState};
use crop_advisor::{
    fill_percent, format_value, track_gradient, Field, FormEvent, Recommendation, ResultsPayload,
    TooltipState,
};
use yew::prelude::*;

/// Pointer traffic from the info icons to the shared overlay.
pub enum TooltipMsg {
    Enter { text: String, x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Leave,
}

#[derive(Properties, PartialEq)]
pub struct TooltipOverlayProps {
    pub state: TooltipState,
}

/// The single shared tooltip. Always in the layout tree; visibility is an
/// opacity toggle only.
#[function_component(TooltipOverlay)]
pub fn tooltip_overlay(props: &TooltipOverlayProps) -> Html {
    let s = &props.state;
    let style = format!(
        "position: fixed; pointer-events: none; left: {:.0}px; top: {:.0}px; \
         opacity: {}; transition: opacity 0.2s ease;",
        s.x,
        s.y,
        if s.visible { "1" } else { "0" }
    );
    html! {
        <div id={TOOLTIP_ID} class="tooltip" style={style}>{ s.text.clone() }</div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SliderRowProps {
    pub field: Field,
    pub value: f64,
    /// True briefly after a preset fill.
    pub pulsing: bool,
    pub dispatch: Callback<FormEvent>,
    pub on_tooltip: Callback<TooltipMsg>,
}

/// One labeled slider/input pair with its info icon and optimal-range hint.
#[function_component(SliderRow)]
pub fn slider_row(props: &SliderRowProps) -> Html {
    let field = props.field;
    let bounds = field.bounds();
    let pair = use_pair(field, props.value, props.dispatch.clone());
    let focused = use_state(|| false);

    let on_focus = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| focused.set(true))
    };
    // Blur both settles the group scale and runs the repair pass.
    let on_blur = {
        let focused = focused.clone();
        let repair = pair.on_blur.clone();
        Callback::from(move |e: FocusEvent| {
            focused.set(false);
            repair.emit(e);
        })
    };

    let on_enter = {
        let cb = props.on_tooltip.clone();
        Callback::from(move |e: MouseEvent| {
            cb.emit(TooltipMsg::Enter {
                text: field.tooltip().to_string(),
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            })
        })
    };
    let on_move = {
        let cb = props.on_tooltip.clone();
        Callback::from(move |e: MouseEvent| {
            cb.emit(TooltipMsg::Move {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            })
        })
    };
    let on_leave = {
        let cb = props.on_tooltip.clone();
        Callback::from(move |_: MouseEvent| cb.emit(TooltipMsg::Leave))
    };

    let slider_style = track_gradient(fill_percent(bounds, props.value));
    let input_class = classes!("number-input", props.pulsing.then_some("pulse"));

    html! {
        <div class="form-group" style={group_style(*focused)}>
            <label for={field.name()}>
                { field.label() }
                <span class="info-icon"
                    data-tooltip={field.tooltip()}
                    onmouseenter={on_enter}
                    onmousemove={on_move}
                    onmouseleave={on_leave}
                >{ "ⓘ" }</span>
            </label>
            <div class="slider-with-value">
                <input type="range"
                    id={field.slider_id()}
                    class="slider"
                    min={format_value(bounds.min)}
                    max={format_value(bounds.max)}
                    step={format_value(bounds.step)}
                    value={format_value(props.value)}
                    style={slider_style}
                    oninput={pair.on_slider_input}
                    onkeydown={pair.on_slider_keydown}
                />
                <input type="number"
                    id={field.name()}
                    name={field.name()}
                    class={input_class}
                    min={format_value(bounds.min)}
                    max={format_value(bounds.max)}
                    step={format_value(bounds.step)}
                    value={pair.text.clone()}
                    oninput={pair.on_text_input}
                    onfocus={on_focus}
                    onblur={on_blur}
                />
            </div>
            <span class="slider-info">{ format!("Optimal: {}", field.optimal()) }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PresetToolbarProps {
    /// False until the one-shot install guard has run.
    pub installed: bool,
    /// Which button currently shows "Applied!" feedback.
    pub applied: Option<PresetKind>,
    pub on_pick: Callback<String>,
}

#[function_component(PresetToolbar)]
pub fn preset_toolbar(props: &PresetToolbarProps) -> Html {
    if !props.installed {
        return html! {};
    }
    html! {
        <div class="preset-buttons">
            <p class="preset-caption">
                <strong>{ "Quick Presets:" }</strong>
                { " Try these common scenarios" }
            </p>
            <div class="preset-row">
                { for PresetKind::ALL.iter().map(|&preset| {
                    let applied = props.applied == Some(preset);
                    let onclick = {
                        let cb = props.on_pick.clone();
                        Callback::from(move |_: MouseEvent| cb.emit(preset.key().to_string()))
                    };
                    html! {
                        <button type="button"
                            class={classes!("preset-btn", applied.then_some("applied"))}
                            data-preset={preset.key()}
                            {onclick}
                        >
                            { if applied { "✓ Applied!" } else { preset.label() } }
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    pub submitting: bool,
}

/// Submit button with the text/icon/loader swap and disabled state.
#[function_component(SubmitButton)]
pub fn submit_button(props: &SubmitButtonProps) -> Html {
    let submitting = props.submitting;
    html! {
        <button type="submit"
            id="submitBtn"
            class="submit-btn"
            disabled={submitting}
            style={if submitting { "opacity: 0.7; cursor: not-allowed;" } else { "" }}
        >
            <span class="btn-text">
                { if submitting { "Analyzing..." } else { "Get Recommendation" } }
            </span>
            <span class="btn-icon" style={if submitting { "display: none;" } else { "" }}>
                { "🌱" }
            </span>
            <span class="btn-loader" style={if submitting { "display: inline;" } else { "display: none;" }}>
                { "⏳" }
            </span>
        </button>
    }
}

/// Inline style for a form group; the group holding the focused input
/// scales up a touch and settles back on blur.
fn group_style(focused: bool) -> &'static str {
    if focused {
        "transform: scale(1.02); transition: transform 0.2s ease;"
    } else {
        "transform: scale(1); transition: transform 0.2s ease;"
    }
}

/// Inline style for a card tracked by the reveal machinery.
pub fn reveal_style(revealed: bool) -> &'static str {
    if revealed {
        "opacity: 1; transform: translateY(0); transition: all 0.6s ease-out;"
    } else {
        "opacity: 0; transform: translateY(20px); transition: all 0.6s ease-out;"
    }
}

/// The results region: ranked crop cards with animated confidence bars and
/// a print button. Empty when the server rendered no results.
pub fn render_results(
    payload: &ResultsPayload,
    reveal: &RevealState,
    on_print: &Callback<MouseEvent>,
) -> Html {
    if payload.top_crops.is_empty() {
        return html! {};
    }
    html! {
        <div id={RESULTS_SECTION_ID} class="results-section">
            <h2>{ "Recommended Crops" }</h2>
            <div class="result-cards">
                { for payload.top_crops.iter().enumerate().map(|(j, rec)| {
                    render_crop_card(j, rec, reveal)
                }) }
            </div>
            <button type="button" class="preset-btn print-btn" onclick={on_print.clone()}>
                { "🖨️ Print Results" }
            </button>
        </div>
    }
}

fn render_crop_card(j: usize, rec: &Recommendation, reveal: &RevealState) -> Html {
    let idx = result_card(j);
    let confidence = rec.confidence.clamp(0.0, 100.0);
    // Bars start at zero width and animate to the rendered target.
    let fill_style = if reveal.bars_filled {
        format!("width: {confidence:.2}%; transition: width 1s ease;")
    } else {
        "width: 0%; transition: width 1s ease;".to_string()
    };
    let display_name = if rec.info.name.is_empty() {
        rec.name.clone()
    } else {
        rec.info.name.clone()
    };

    html! {
        <div class="crop-card"
            data-reveal-idx={idx.to_string()}
            style={reveal_style(reveal.is_revealed(idx))}
        >
            <div class="crop-header">
                <span class="crop-emoji">{ rec.info.emoji.clone() }</span>
                <h3>{ display_name }</h3>
            </div>
            <div class="confidence-bar">
                <div class="confidence-fill" style={fill_style}></div>
            </div>
            <div class="confidence-label">{ format!("{confidence:.1}% match") }</div>
            { if rec.info.description.is_empty() { html! {} } else {
                html! {
                    <div class="crop-details">
                        <p class="crop-description">{ rec.info.description.clone() }</p>
                        <p class="crop-meta">
                            { format!("Season: {} · Duration: {}", rec.info.season, rec.info.duration) }
                        </p>
                        { if rec.info.tips.is_empty() { html! {} } else {
                            html! {
                                <ul class="crop-tips">
                                    { for rec.info.tips.iter().map(|tip| html! { <li>{ tip.clone() }</li> }) }
                                </ul>
                            }
                        }}
                    </div>
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_group_scales_up_and_settles_back() {
        assert!(group_style(true).contains("scale(1.02)"));
        assert!(group_style(false).contains("scale(1)"));
        assert!(!group_style(false).contains("1.02"));
    }

    #[test]
    fn hidden_cards_sit_translated_at_zero_opacity() {
        assert!(reveal_style(false).contains("opacity: 0"));
        assert!(reveal_style(false).contains("translateY(20px)"));
        assert!(reveal_style(true).contains("opacity: 1"));
        assert!(reveal_style(true).contains("translateY(0)"));
    }
}
