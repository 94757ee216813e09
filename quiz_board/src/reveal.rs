//! The presentation state of a leaderboard.
//!
//! A leaderboard is shown either all at once, or group by group starting from
//! the worst rank. The state is a plain value and every input produces a new
//! value through [`PresenterState::apply`]; renderers only read it.

use log::debug;

/// How the leaderboard is laid out on screen.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ViewMode {
    /// Every group visible, spread over two columns.
    AllAtOnce,
    /// A single column where only the revealed groups are shown.
    Reveal,
}

impl ViewMode {
    pub fn from_name(name: &str) -> Option<ViewMode> {
        match name.to_lowercase().as_str() {
            "all" | "all_at_once" | "allatonce" => Some(ViewMode::AllAtOnce),
            "reveal" => Some(ViewMode::Reveal),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::AllAtOnce => "all",
            ViewMode::Reveal => "reveal",
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Visibility {
    Hidden,
    Revealed,
}

/// The discrete inputs of the presenter.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum PresenterEvent {
    /// Reveal the next group (towards the best rank).
    Advance,
    /// Hide the last revealed group.
    Retreat,
    /// Hide everything.
    Reset,
    ShowAll,
    StartReveal,
}

impl PresenterEvent {
    /// Maps a key name (as reported by a browser or typed in a terminal) to an event.
    pub fn from_key(key: &str) -> Option<PresenterEvent> {
        match key {
            "ArrowRight" | "ArrowDown" | " " | "Space" | "Enter" | "n" | "PageDown" => {
                Some(PresenterEvent::Advance)
            }
            "ArrowLeft" | "ArrowUp" | "Backspace" | "b" | "p" | "PageUp" => {
                Some(PresenterEvent::Retreat)
            }
            "r" | "Escape" | "Home" => Some(PresenterEvent::Reset),
            "a" => Some(PresenterEvent::ShowAll),
            "s" => Some(PresenterEvent::StartReveal),
            _ => None,
        }
    }
}

/// How many rank groups are revealed, counted from the bottom of the leaderboard.
///
/// Group indexes are best-first (index 0 is rank 1). With `revealed` groups out
/// of `num_groups`, the groups `num_groups - revealed .. num_groups` are visible.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct RevealCursor {
    revealed: usize,
    num_groups: usize,
}

impl RevealCursor {
    pub fn new(num_groups: usize) -> RevealCursor {
        RevealCursor {
            revealed: 0,
            num_groups,
        }
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn num_groups(&self) -> usize {
        self.num_groups
    }

    pub fn is_initial(&self) -> bool {
        self.revealed == 0
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.num_groups
    }

    pub fn advance(self) -> RevealCursor {
        if self.is_complete() {
            return self;
        }
        RevealCursor {
            revealed: self.revealed + 1,
            ..self
        }
    }

    pub fn retreat(self) -> RevealCursor {
        if self.is_initial() {
            return self;
        }
        RevealCursor {
            revealed: self.revealed - 1,
            ..self
        }
    }

    pub fn reset(self) -> RevealCursor {
        RevealCursor::new(self.num_groups)
    }

    /// The index of the first visible group, or `num_groups` when nothing is visible.
    pub fn first_revealed(&self) -> usize {
        self.num_groups - self.revealed
    }

    pub fn visibility(&self, group_index: usize) -> Visibility {
        if group_index < self.num_groups && group_index >= self.first_revealed() {
            Visibility::Revealed
        } else {
            Visibility::Hidden
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct PresenterState {
    pub mode: ViewMode,
    pub cursor: RevealCursor,
}

impl PresenterState {
    pub fn new(num_groups: usize, mode: ViewMode) -> PresenterState {
        PresenterState {
            mode,
            cursor: RevealCursor::new(num_groups),
        }
    }

    /// The transition function of the presenter.
    ///
    /// Navigation events only apply in reveal mode. Switching modes keeps the cursor.
    pub fn apply(self, event: PresenterEvent) -> PresenterState {
        let next = match (self.mode, event) {
            (_, PresenterEvent::ShowAll) => PresenterState {
                mode: ViewMode::AllAtOnce,
                ..self
            },
            (_, PresenterEvent::StartReveal) => PresenterState {
                mode: ViewMode::Reveal,
                ..self
            },
            (ViewMode::AllAtOnce, _) => self,
            (ViewMode::Reveal, PresenterEvent::Advance) => PresenterState {
                cursor: self.cursor.advance(),
                ..self
            },
            (ViewMode::Reveal, PresenterEvent::Retreat) => PresenterState {
                cursor: self.cursor.retreat(),
                ..self
            },
            (ViewMode::Reveal, PresenterEvent::Reset) => PresenterState {
                cursor: self.cursor.reset(),
                ..self
            },
        };
        debug!("apply: {:?} + {:?} -> {:?}", self, event, next);
        next
    }

    pub fn apply_all(self, events: &[PresenterEvent]) -> PresenterState {
        events.iter().fold(self, |state, ev| state.apply(*ev))
    }

    /// Whether the group at this (best-first) index is shown in the current mode.
    pub fn group_visibility(&self, group_index: usize) -> Visibility {
        match self.mode {
            ViewMode::AllAtOnce if group_index < self.cursor.num_groups() => Visibility::Revealed,
            ViewMode::AllAtOnce => Visibility::Hidden,
            ViewMode::Reveal => self.cursor.visibility(group_index),
        }
    }

    /// The indexes of the visible groups, best-first.
    pub fn visible_groups(&self) -> Vec<usize> {
        (0..self.cursor.num_groups())
            .filter(|idx| self.group_visibility(*idx) == Visibility::Revealed)
            .collect()
    }
}
