//! Editor session: what the user is in the middle of.
//!
//! Kept apart from [`GameLog`] and never saved. A session decides what a
//! submitted draft means (add, edit, or insert) and holds a delete until it
//! is confirmed.

use tracing::debug;

use crate::LogError;
use crate::log::GameLog;
use crate::model::{Play, PlayEntry, PlayId, preview};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Editing(PlayId),
    InsertingAfter(PlayId),
    ConfirmingDelete(PlayId),
}

#[derive(Debug, Default)]
pub struct EditorSession {
    state: SessionState,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_editing(&self, id: PlayId) -> bool {
        self.state == SessionState::Editing(id)
    }

    pub fn is_inserting_after(&self, id: PlayId) -> bool {
        self.state == SessionState::InsertingAfter(id)
    }

    pub fn pending_delete(&self) -> Option<PlayId> {
        match self.state {
            SessionState::ConfirmingDelete(id) => Some(id),
            _ => None,
        }
    }

    /// Enter edit mode for a play and return its fields as a draft.
    ///
    /// The log's active quarter follows the play being edited.
    pub fn start_edit(&mut self, log: &mut GameLog, id: PlayId) -> Result<PlayEntry, LogError> {
        let entry = log.play(id).ok_or(LogError::PlayNotFound(id))?.entry.clone();
        log.set_active_quarter(entry.quarter);
        self.state = SessionState::Editing(id);
        debug!(play_id = id, "editing");
        Ok(entry)
    }

    /// Enter insert mode below a play and return a blank draft.
    pub fn start_insert_after(&mut self, log: &GameLog, id: PlayId) -> Result<PlayEntry, LogError> {
        if log.play(id).is_none() {
            return Err(LogError::PlayNotFound(id));
        }
        self.state = SessionState::InsertingAfter(id);
        debug!(play_id = id, "inserting after");
        Ok(PlayEntry {
            quarter: log.active_quarter(),
            ..PlayEntry::default()
        })
    }

    pub fn cancel(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Apply a draft according to the current mode.
    ///
    /// Edit and insert modes end on success. A failed submit leaves the
    /// mode and the log untouched.
    pub fn submit(&mut self, log: &mut GameLog, draft: PlayEntry) -> Result<PlayId, LogError> {
        let id = match self.state {
            SessionState::Editing(id) => {
                log.edit_play(id, draft)?;
                id
            }
            SessionState::InsertingAfter(reference) => log.insert_after(reference, draft)?,
            SessionState::Idle | SessionState::ConfirmingDelete(_) => log.add_play(draft)?,
        };
        if matches!(
            self.state,
            SessionState::Editing(_) | SessionState::InsertingAfter(_)
        ) {
            self.state = SessionState::Idle;
        }
        Ok(id)
    }

    /// Ask to delete a play. Returns a short preview of its description.
    pub fn request_delete(&mut self, log: &GameLog, id: PlayId) -> Result<String, LogError> {
        let play = log.play(id).ok_or(LogError::PlayNotFound(id))?;
        self.state = SessionState::ConfirmingDelete(id);
        Ok(preview(&play.entry.description))
    }

    pub fn confirm_delete(&mut self, log: &mut GameLog) -> Result<Play, LogError> {
        let id = self.pending_delete().ok_or(LogError::NothingToConfirm)?;
        self.state = SessionState::Idle;
        log.delete_play(id)
    }
}
