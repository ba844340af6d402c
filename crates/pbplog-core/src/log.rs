//! The game log: the single owner of plays, drives, highlights, and metadata.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::LogError;
use crate::model::{
    DriveField, DriveId, DriveStatus, DriveSummary, GameInfo, Play, PlayEntry, PlayId, Quarter,
};

static OPEN: DriveStatus = DriveStatus::Open;

/// Everything that is saved for one game.
///
/// Plays are kept in display order. Each play names its drive by identifier;
/// drive state lives in `drives`, keyed by that identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameLog {
    pub game: GameInfo,
    active_quarter: Quarter,
    current_drive: DriveId,
    next_play_id: PlayId,
    plays: Vec<Play>,
    drives: BTreeMap<DriveId, DriveStatus>,
    highlights: BTreeSet<PlayId>,
}

impl Default for GameLog {
    fn default() -> Self {
        Self {
            game: GameInfo::default(),
            active_quarter: Quarter::FIRST,
            current_drive: 1,
            next_play_id: 1,
            plays: Vec::new(),
            drives: BTreeMap::new(),
            highlights: BTreeSet::new(),
        }
    }
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard everything and start a blank game.
    pub fn reset(&mut self) {
        *self = Self::default();
        info!("started new game");
    }

    // ── Read access ──

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn play(&self, id: PlayId) -> Option<&Play> {
        self.plays.iter().find(|p| p.id == id)
    }

    pub fn drives(&self) -> &BTreeMap<DriveId, DriveStatus> {
        &self.drives
    }

    /// State of a drive. A drive with no entry is open.
    pub fn drive_status(&self, id: DriveId) -> &DriveStatus {
        self.drives.get(&id).unwrap_or(&OPEN)
    }

    pub fn current_drive(&self) -> DriveId {
        self.current_drive
    }

    pub fn active_quarter(&self) -> Quarter {
        self.active_quarter
    }

    pub fn set_active_quarter(&mut self, quarter: Quarter) {
        self.active_quarter = quarter;
    }

    pub fn highlights(&self) -> &BTreeSet<PlayId> {
        &self.highlights
    }

    pub fn is_highlighted(&self, id: PlayId) -> bool {
        self.highlights.contains(&id)
    }

    /// Plays that count toward the displayed total.
    pub fn counted_plays(&self) -> usize {
        self.plays.iter().filter(|p| p.is_counted()).count()
    }

    // ── Play mutations ──

    /// Append a play to the current drive.
    pub fn add_play(&mut self, entry: PlayEntry) -> Result<PlayId, LogError> {
        let entry = entry.validated()?;
        let id = self.allocate_id();
        let drive_id = self.current_drive;
        self.drives.entry(drive_id).or_default();
        self.plays.push(Play {
            id,
            drive_id,
            entry,
        });
        info!(play_id = id, drive_id, "play added");
        Ok(id)
    }

    /// Place a play directly after `reference`, in `reference`'s drive.
    ///
    /// The new play joins the reference's drive even when that drive has
    /// already ended, which is how earlier drives get back-filled.
    pub fn insert_after(&mut self, reference: PlayId, entry: PlayEntry) -> Result<PlayId, LogError> {
        let idx = self
            .index_of(reference)
            .ok_or(LogError::PlayNotFound(reference))?;
        let entry = entry.validated()?;
        let drive_id = self.plays[idx].drive_id;
        let id = self.allocate_id();
        self.plays.insert(
            idx + 1,
            Play {
                id,
                drive_id,
                entry,
            },
        );
        info!(play_id = id, after = reference, drive_id, "play inserted");
        Ok(id)
    }

    /// Replace a play's fields. Identifier, position, and drive are kept.
    pub fn edit_play(&mut self, id: PlayId, entry: PlayEntry) -> Result<(), LogError> {
        let idx = self.index_of(id).ok_or(LogError::PlayNotFound(id))?;
        let entry = entry.validated()?;
        self.plays[idx].entry = entry;
        info!(play_id = id, "play updated");
        Ok(())
    }

    /// Remove a play along with its highlight.
    pub fn delete_play(&mut self, id: PlayId) -> Result<Play, LogError> {
        let idx = self.index_of(id).ok_or(LogError::PlayNotFound(id))?;
        let play = self.plays.remove(idx);
        self.highlights.remove(&id);
        info!(play_id = id, drive_id = play.drive_id, "play deleted");
        Ok(play)
    }

    /// Flip highlight membership. Returns whether the play is now highlighted.
    pub fn toggle_highlight(&mut self, id: PlayId) -> Result<bool, LogError> {
        if self.index_of(id).is_none() {
            return Err(LogError::PlayNotFound(id));
        }
        let on = if self.highlights.remove(&id) {
            false
        } else {
            self.highlights.insert(id);
            true
        };
        debug!(play_id = id, on, "highlight toggled");
        Ok(on)
    }

    // ── Drive mutations ──

    /// End the current drive and move new plays to the next one.
    ///
    /// Refused when the current drive has no plays. A drive that already
    /// carries a summary keeps it; the counter still advances.
    pub fn end_drive(&mut self) -> Result<DriveId, LogError> {
        let ended = self.current_drive;
        if !self.plays.iter().any(|p| p.drive_id == ended) {
            return Err(LogError::EmptyDrive(ended));
        }
        let status = self.drives.entry(ended).or_default();
        if !status.is_ended() {
            *status = DriveStatus::Ended(DriveSummary::default());
        }
        self.current_drive += 1;
        info!(drive_id = ended, next = self.current_drive, "drive ended");
        Ok(ended)
    }

    /// Flip an ended drive between collapsed and expanded.
    pub fn toggle_drive_collapsed(&mut self, id: DriveId) -> Result<bool, LogError> {
        let summary = self.summary_mut(id)?;
        summary.collapsed = !summary.collapsed;
        Ok(summary.collapsed)
    }

    pub fn update_drive(&mut self, id: DriveId, field: DriveField) -> Result<(), LogError> {
        let summary = self.summary_mut(id)?;
        field.apply(summary);
        debug!(drive_id = id, "drive summary updated");
        Ok(())
    }

    // ── Load fix-ups ──

    /// Repair a freshly loaded log so the invariants hold again.
    ///
    /// Raises the id counter past every stored play, gives every referenced
    /// drive an explicit entry, and drops highlights of plays that no longer
    /// exist.
    pub fn normalize(&mut self) {
        if let Some(max_id) = self.plays.iter().map(|p| p.id).max() {
            self.next_play_id = self.next_play_id.max(max_id.saturating_add(1));
        }
        self.next_play_id = self.next_play_id.max(1);
        self.current_drive = self.current_drive.max(1);
        for play in &self.plays {
            self.drives.entry(play.drive_id).or_default();
        }
        let plays = &self.plays;
        self.highlights.retain(|id| plays.iter().any(|p| p.id == *id));
    }

    fn allocate_id(&mut self) -> PlayId {
        let id = self.next_play_id;
        self.next_play_id = self.next_play_id.saturating_add(1);
        id
    }

    fn index_of(&self, id: PlayId) -> Option<usize> {
        self.plays.iter().position(|p| p.id == id)
    }

    fn summary_mut(&mut self, id: DriveId) -> Result<&mut DriveSummary, LogError> {
        match self.drives.get_mut(&id) {
            Some(DriveStatus::Ended(summary)) => Ok(summary),
            _ => Err(LogError::DriveNotEnded(id)),
        }
    }
}
