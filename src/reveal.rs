//! Entrance animation sequencing and the scroll-reveal state machine.
//!
//! Each tracked card has exactly two states, hidden and revealed, and the
//! transition fires once. Reveals can come from two sources that race
//! harmlessly: the staggered entrance timeline on a post-submission render,
//! and the viewport intersection observer. Whichever arrives first wins;
//! the other becomes a no-op.
//!
//! Delays live in a [`Timeline`] rather than raw timers so tests can advance
//! virtual time deterministically; the browser layer drains the timeline
//! into real (cancelable) timeouts.

use crate::defaults;

/// Reveal index of the form card. Result cards follow at `1..=n`.
pub const FORM_CARD: usize = 0;

/// Reveal index of result card `j` (zero-based).
pub fn result_card(j: usize) -> usize {
    j + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardPhase {
    Hidden,
    Revealed,
}

/// Per-card `hidden → revealed` tracking. One-directional and terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealState {
    cards: Vec<CardPhase>,
    /// Whether confidence bars have filled to their target width.
    pub bars_filled: bool,
}

impl RevealState {
    /// Track the form card plus `result_cards` result cards.
    pub fn new(result_cards: usize) -> Self {
        RevealState {
            cards: vec![CardPhase::Hidden; result_cards + 1],
            bars_filled: false,
        }
    }

    /// Transition a card to revealed. Returns true only on the first
    /// transition; repeat calls and out-of-range indices are no-ops.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.cards.get_mut(index) {
            Some(phase @ CardPhase::Hidden) => {
                *phase = CardPhase::Revealed;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        matches!(self.cards.get(index), Some(CardPhase::Revealed))
    }

    pub fn fill_bars(&mut self) {
        self.bars_filled = true;
    }

    pub fn all_revealed(&self) -> bool {
        self.cards.iter().all(|c| *c == CardPhase::Revealed)
    }
}

/// Steps of the post-submission entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entrance {
    /// Fill every confidence bar to its server-rendered width.
    FillBars,
    /// Fade in result card `j`.
    Card(usize),
}

/// Delay before result card `j` fades in.
pub fn stagger_delay(j: usize) -> u32 {
    j as u32 * defaults::CARD_STAGGER_MS
}

/// The full entrance schedule for a render with `result_cards` cards.
pub fn entrance_timeline(result_cards: usize) -> Timeline<Entrance> {
    let mut timeline = Timeline::new();
    timeline.schedule(defaults::CONFIDENCE_BAR_DELAY_MS, Entrance::FillBars);
    for j in 0..result_cards {
        timeline.schedule(stagger_delay(j), Entrance::Card(j));
    }
    timeline
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Cancelable task queue over virtual time.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    now_ms: u32,
    next_id: u64,
    tasks: Vec<(TaskId, u32, T)>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Timeline {
            now_ms: 0,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Queue `task` to fire `delay_ms` after the current virtual instant.
    pub fn schedule(&mut self, delay_ms: u32, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push((id, self.now_ms + delay_ms, task));
        id
    }

    /// Drop a pending task. Returns false if it already fired or was
    /// canceled before.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(tid, _, _)| *tid != id);
        self.tasks.len() != before
    }

    /// Advance virtual time, returning tasks that came due, ordered by due
    /// time with insertion order breaking ties.
    pub fn advance(&mut self, ms: u32) -> Vec<T> {
        self.now_ms += ms;
        let now = self.now_ms;
        let mut due: Vec<(TaskId, u32, T)> = Vec::new();
        let mut remaining = Vec::with_capacity(self.tasks.len());
        for entry in self.tasks.drain(..) {
            if entry.1 <= now {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.tasks = remaining;
        due.sort_by_key(|(id, at, _)| (*at, id.0));
        due.into_iter().map(|(_, _, task)| task).collect()
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Hand the remaining schedule to a real timer facility as
    /// `(delay_from_now, task)` pairs.
    pub fn into_tasks(self) -> Vec<(u32, T)> {
        let now = self.now_ms;
        let mut tasks: Vec<(TaskId, u32, T)> = self.tasks;
        tasks.sort_by_key(|(id, at, _)| (*at, id.0));
        tasks
            .into_iter()
            .map(|(_, at, task)| (at.saturating_sub(now), task))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_is_one_way_and_terminal() {
        let mut state = RevealState::new(2);
        assert!(!state.is_revealed(FORM_CARD));
        assert!(state.reveal(FORM_CARD));
        assert!(state.is_revealed(FORM_CARD));
        // Second intersection of the same card never re-fires.
        assert!(!state.reveal(FORM_CARD));
        assert!(state.is_revealed(FORM_CARD));
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut state = RevealState::new(1);
        assert!(!state.reveal(99));
        assert!(!state.is_revealed(99));
    }

    #[test]
    fn timer_and_observer_race_harmlessly() {
        let mut state = RevealState::new(3);
        assert!(state.reveal(result_card(1)));
        // Observer fires for the same card later.
        assert!(!state.reveal(result_card(1)));
        assert!(state.reveal(FORM_CARD));
        assert!(state.reveal(result_card(0)));
        assert!(state.reveal(result_card(2)));
        assert!(state.all_revealed());
    }

    #[test]
    fn cards_stagger_at_fixed_intervals() {
        assert_eq!(stagger_delay(0), 0);
        assert_eq!(stagger_delay(1), 100);
        assert_eq!(stagger_delay(4), 400);
    }

    #[test]
    fn entrance_timeline_orders_cards_around_the_bar_fill() {
        let mut timeline = entrance_timeline(3);
        assert_eq!(timeline.pending(), 4);

        // t=0: first card only.
        assert_eq!(timeline.advance(0), vec![Entrance::Card(0)]);
        // t=100: second card.
        assert_eq!(timeline.advance(100), vec![Entrance::Card(1)]);
        // t=300: third card (t=200) then the bar fill (t=300).
        assert_eq!(
            timeline.advance(200),
            vec![Entrance::Card(2), Entrance::FillBars]
        );
        assert_eq!(timeline.pending(), 0);
    }

    #[test]
    fn canceled_tasks_never_fire() {
        let mut timeline = Timeline::new();
        let keep = timeline.schedule(10, "keep");
        let drop = timeline.schedule(10, "drop");
        assert!(timeline.cancel(drop));
        assert!(!timeline.cancel(drop));
        assert_eq!(timeline.advance(20), vec!["keep"]);
        // Fired tasks cannot be canceled retroactively.
        assert!(!timeline.cancel(keep));
    }

    #[test]
    fn into_tasks_reports_delays_relative_to_now() {
        let mut timeline = entrance_timeline(2);
        let _ = timeline.advance(50);
        let tasks = timeline.into_tasks();
        assert_eq!(tasks, vec![(50, Entrance::Card(1)), (250, Entrance::FillBars)]);
    }
}
