//! Crop advisor form behavior, wired as a Yew application.
//!
//! The browser layer owns no values: every interaction dispatches a
//! `FormEvent` into the reducer store from the core crate, and deferred
//! effects come back as data that this module maps onto cancelable timers
//! and DOM calls.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crop_advisor::reveal::{entrance_timeline, result_card, Entrance, RevealState, FORM_CARD};
use crop_advisor::{Effect, Field, FormEvent, FormState, ResultsPayload, TooltipState};

mod components;
mod config;
mod dom;
mod hooks;

use components::{
    render_results, reveal_style, PresetToolbar, SliderRow, SubmitButton, TooltipMsg,
    TooltipOverlay,
};
use config::{FORM_ACTION, FORM_ID};

/// Form state plus the effect log reducer steps produce. Effects are only
/// appended; the component remembers how many it has already handled.
#[derive(Clone, Default)]
struct FormStore {
    form: FormState,
    effects: Vec<Effect>,
}

impl Reducible for FormStore {
    type Action = FormEvent;

    fn reduce(self: Rc<Self>, action: FormEvent) -> Rc<Self> {
        let mut next = (*self).clone();
        let produced = next.form.apply(action);
        next.effects.extend(produced);
        Rc::new(next)
    }
}

enum RevealAction {
    /// Start tracking the form card plus `n` result cards.
    Track(usize),
    /// A card became due (timer) or visible (observer).
    Card(usize),
    /// Fill the confidence bars.
    Bars,
}

struct RevealStore {
    state: RevealState,
}

impl Reducible for RevealStore {
    type Action = RevealAction;

    fn reduce(self: Rc<Self>, action: RevealAction) -> Rc<Self> {
        let mut state = self.state.clone();
        match action {
            RevealAction::Track(n) => state = RevealState::new(n),
            RevealAction::Card(idx) => {
                state.reveal(idx);
            }
            RevealAction::Bars => state.fill_bars(),
        }
        Rc::new(RevealStore { state })
    }
}

/// Owns pending timeout handles. Dropping a pending handle cancels it, so
/// whatever is still queued dies with the component. Fired callbacks report
/// their id back; the handle is dropped on the next sweep rather than
/// accumulating until teardown. (A handle cannot drop itself mid-callback.)
struct TimerBag<H = Timeout> {
    next_id: u64,
    live: HashMap<u64, H>,
    fired: Vec<u64>,
}

impl<H> Default for TimerBag<H> {
    fn default() -> Self {
        TimerBag {
            next_id: 0,
            live: HashMap::new(),
            fired: Vec::new(),
        }
    }
}

impl<H> TimerBag<H> {
    fn reserve_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn mark_fired(&mut self, id: u64) {
        self.fired.push(id);
    }

    /// Drop handles whose callbacks have already run.
    fn sweep(&mut self) {
        for id in self.fired.drain(..) {
            self.live.remove(&id);
        }
    }
}

/// Queue `f` to run after `delay_ms`, parking the handle in the bag.
fn spawn_timer(timers: &Rc<RefCell<TimerBag>>, delay_ms: u32, f: impl FnOnce() + 'static) {
    let id = {
        let mut bag = timers.borrow_mut();
        bag.sweep();
        bag.reserve_id()
    };
    let done = {
        let timers = Rc::clone(timers);
        move || {
            f();
            timers.borrow_mut().mark_fired(id);
        }
    };
    let handle = Timeout::new(delay_ms, done);
    timers.borrow_mut().live.insert(id, handle);
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component() -> Html {
    let store = use_reducer(FormStore::default);
    let reveal = use_reducer(|| RevealStore {
        state: RevealState::new(0),
    });
    let tooltip = use_state(TooltipState::default);
    let results = use_state(|| None::<ResultsPayload>);
    let timers = use_mut_ref(TimerBag::default);
    let observer = use_mut_ref(|| None::<dom::RevealObserver>);
    // Number of effect-log entries already turned into timers.
    let handled_effects = use_mut_ref(|| 0usize);

    let dispatch: Callback<FormEvent> = {
        let store = store.clone();
        Callback::from(move |event| store.dispatch(event))
    };

    // Mount: inject the preset stylesheet (id-guarded), run the toolbar
    // one-shot, and pick up a server-rendered results payload if this is a
    // post-submission page.
    {
        let store = store.clone();
        let reveal = reveal.clone();
        let results = results.clone();
        let timers = timers.clone();
        use_effect_with((), move |_| {
            dom::ensure_preset_styles();
            store.dispatch(FormEvent::ToolbarRequested);

            if let Some(payload) = dom::read_results_payload() {
                if let Some(inputs) = payload.inputs.clone() {
                    store.dispatch(FormEvent::InputsRestored(inputs));
                }
                let cards = payload.top_crops.len();
                reveal.dispatch(RevealAction::Track(cards));
                for (delay_ms, task) in entrance_timeline(cards).into_tasks() {
                    let reveal = reveal.clone();
                    spawn_timer(&timers, delay_ms, move || match task {
                        Entrance::FillBars => reveal.dispatch(RevealAction::Bars),
                        Entrance::Card(j) => reveal.dispatch(RevealAction::Card(result_card(j))),
                    });
                }
                results.set(Some(payload));
            }
            || ()
        });
    }

    // Turn new reducer effects into real timers. Same consumption pattern
    // as a message log: remember the index, handle only the tail.
    {
        let effect_count = store.effects.len();
        let store = store.clone();
        let timers = timers.clone();
        let handled_effects = handled_effects.clone();
        use_effect_with(effect_count, move |_| {
            let start = *handled_effects.borrow();
            for effect in store.effects[start..].to_vec() {
                match effect {
                    Effect::Dispatch { delay_ms, event } => {
                        let store = store.clone();
                        spawn_timer(&timers, delay_ms, move || store.dispatch(event));
                    }
                    Effect::ScrollToResults { delay_ms } => {
                        spawn_timer(&timers, delay_ms, dom::scroll_to_results);
                    }
                }
            }
            *handled_effects.borrow_mut() = store.effects.len();
            || ()
        });
    }

    // (Re)attach the viewport observer whenever the tracked card set
    // changes. Without observer support the cards reveal immediately
    // rather than staying invisible.
    {
        let cards = (*results).as_ref().map(|p| p.top_crops.len()).unwrap_or(0);
        let reveal = reveal.clone();
        let observer = observer.clone();
        use_effect_with(cards, move |&cards| {
            let on_visible = {
                let reveal = reveal.clone();
                move |idx| reveal.dispatch(RevealAction::Card(idx))
            };
            match dom::RevealObserver::new(on_visible) {
                Some(obs) => {
                    obs.observe_all();
                    *observer.borrow_mut() = Some(obs);
                }
                None => {
                    for idx in 0..=cards {
                        reveal.dispatch(RevealAction::Card(idx));
                    }
                }
            }
            || ()
        });
    }

    let on_tooltip = {
        let tooltip = tooltip.clone();
        Callback::from(move |msg: TooltipMsg| {
            let mut next = (*tooltip).clone();
            match msg {
                TooltipMsg::Enter { text, x, y } => next.show(&text, x, y),
                TooltipMsg::Move { x, y } => next.follow(x, y),
                TooltipMsg::Leave => next.hide(),
            }
            tooltip.set(next);
        })
    };

    // Loading state only; the native POST proceeds and the server renders
    // the next page.
    let on_submit = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: SubmitEvent| dispatch.emit(FormEvent::FormSubmitted))
    };

    let on_pick = {
        let dispatch = dispatch.clone();
        Callback::from(move |key: String| dispatch.emit(FormEvent::PresetPicked { key }))
    };

    let on_print = Callback::from(|_: MouseEvent| dom::print_page());

    html! {
        <div class="container">
            <TooltipOverlay state={(*tooltip).clone()} />
            <div class="form-card"
                data-reveal-idx={FORM_CARD.to_string()}
                style={reveal_style(reveal.state.is_revealed(FORM_CARD))}
            >
                <PresetToolbar
                    installed={store.form.toolbar_installed()}
                    applied={store.form.applied_preset}
                    on_pick={on_pick}
                />
                <form id={FORM_ID} method="post" action={FORM_ACTION} onsubmit={on_submit}>
                    { for Field::ALL.iter().map(|&field| html! {
                        <SliderRow
                            key={field.name()}
                            {field}
                            value={store.form.value(field)}
                            pulsing={store.form.pulsing}
                            dispatch={dispatch.clone()}
                            on_tooltip={on_tooltip.clone()}
                        />
                    }) }
                    <SubmitButton submitting={store.form.submitting} />
                </form>
            </div>
            { match (*results).as_ref() {
                Some(payload) => render_results(payload, &reveal.state, &on_print),
                None => html! {},
            } }
        </div>
    }
}

#[function_component]
pub fn App() -> Html {
    html! { <Main /> }
}

/// Entry point: initializes the Yew renderer for the App component.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::TimerBag;

    #[test]
    fn fired_handles_are_dropped_on_the_next_sweep() {
        let mut bag: TimerBag<()> = TimerBag::default();
        let a = bag.reserve_id();
        bag.live.insert(a, ());
        let b = bag.reserve_id();
        bag.live.insert(b, ());
        assert_eq!(bag.live.len(), 2);

        bag.mark_fired(a);
        bag.sweep();
        assert_eq!(bag.live.len(), 1);
        assert!(bag.live.contains_key(&b));

        // Sweeping with nothing newly fired changes nothing.
        bag.sweep();
        assert_eq!(bag.live.len(), 1);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut bag: TimerBag<()> = TimerBag::default();
        let a = bag.reserve_id();
        bag.live.insert(a, ());
        bag.mark_fired(a);
        bag.sweep();
        assert_ne!(bag.reserve_id(), a);
    }
}
