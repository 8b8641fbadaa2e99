//! Pure state machine for batched item completion.
//!
//! Tracks which item ids are scheduled for completion and which have been
//! handed to the network. Every transition answers what the debounce timer
//! should do next; driving the timer is the batcher's job.

use std::collections::BTreeSet;

use uuid::Uuid;

/// What the debounce timer should do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Abort any running timer and start a fresh window.
    Restart,
    /// Abort any running timer; nothing is pending.
    Cancel,
    /// Leave the timer alone.
    Keep,
}

/// Pending and in-flight completion sets for one todo list.
#[derive(Debug, Default)]
pub struct CompletionBatch {
    pending: BTreeSet<Uuid>,
    in_flight: BTreeSet<Uuid>,
}

impl CompletionBatch {
    /// Empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip an item's scheduled state.
    ///
    /// A first click schedules the id; a second click inside the window
    /// unschedules it. Ids already handed to the network are ignored, so a
    /// click racing its own commit cannot double-complete.
    pub fn toggle(&mut self, id: Uuid) -> TimerCommand {
        if self.in_flight.contains(&id) {
            return TimerCommand::Keep;
        }
        if !self.pending.remove(&id) {
            self.pending.insert(id);
        }
        if self.pending.is_empty() {
            TimerCommand::Cancel
        } else {
            TimerCommand::Restart
        }
    }

    /// A new item landed in the list; restart the window so the scheduled
    /// completions don't fire mid-edit.
    pub fn note_item_created(&self) -> TimerCommand {
        if self.pending.is_empty() {
            TimerCommand::Keep
        } else {
            TimerCommand::Restart
        }
    }

    /// Hand every scheduled id to the network.
    ///
    /// Ids stay pending until settled, so the UI keeps rendering them as
    /// completing.
    pub fn begin_commit(&mut self) -> Vec<Uuid> {
        let ids: Vec<Uuid> = self.pending.difference(&self.in_flight).copied().collect();
        self.in_flight.extend(ids.iter().copied());
        ids
    }

    /// A completion request finished, successfully or not.
    pub fn settle(&mut self, id: Uuid) {
        self.pending.remove(&id);
        self.in_flight.remove(&id);
    }

    /// Whether the id is scheduled or mid-commit.
    pub fn is_pending(&self, id: Uuid) -> bool {
        self.pending.contains(&id)
    }

    /// Whether nothing is scheduled or mid-commit.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.in_flight.is_empty()
    }
}
