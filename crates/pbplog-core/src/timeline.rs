//! Drive grouping and separator decisions shared by every renderer.
//!
//! Nothing here is cached: each render regroups the current play sequence,
//! so the interactive view and the export always agree.

use std::collections::HashMap;

use tracing::debug;

use crate::log::GameLog;
use crate::model::{DriveId, DriveStatus, DriveSummary, Play, Quarter};

/// One drive's plays, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveGroup<'a> {
    pub drive_id: DriveId,
    /// 1-based position among the groups, used for "Drive N" labels.
    pub ordinal: usize,
    pub plays: Vec<&'a Play>,
    pub status: &'a DriveStatus,
}

impl<'a> DriveGroup<'a> {
    pub fn counted(&self) -> usize {
        self.plays.iter().filter(|p| p.is_counted()).count()
    }

    pub fn first_quarter(&self) -> Quarter {
        self.plays.first().map(|p| p.quarter()).unwrap_or_default()
    }

    pub fn last_quarter(&self) -> Quarter {
        self.plays.last().map(|p| p.quarter()).unwrap_or_default()
    }

    pub fn summary(&self) -> Option<&'a DriveSummary> {
        self.status.summary()
    }

    pub fn is_ended(&self) -> bool {
        self.status.is_ended()
    }

    pub fn is_collapsed(&self) -> bool {
        self.summary().is_some_and(|s| s.collapsed)
    }
}

/// What goes between two adjacent drive groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Halftime,
    /// Carries the ordinal of the drive that just finished.
    DriveEnd(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// `None` for the first section only.
    pub separator: Option<Separator>,
    pub group: DriveGroup<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timeline<'a> {
    Empty,
    Drives(Vec<Section<'a>>),
}

/// Group plays by drive, in order of each drive's first play.
pub fn group_drives(log: &GameLog) -> Vec<DriveGroup<'_>> {
    let mut index: HashMap<DriveId, usize> = HashMap::new();
    let mut groups: Vec<DriveGroup<'_>> = Vec::new();

    for play in log.plays() {
        match index.get(&play.drive_id) {
            Some(&i) => groups[i].plays.push(play),
            None => {
                index.insert(play.drive_id, groups.len());
                groups.push(DriveGroup {
                    drive_id: play.drive_id,
                    ordinal: groups.len() + 1,
                    plays: vec![play],
                    status: log.drive_status(play.drive_id),
                });
            }
        }
    }

    debug!(plays = log.plays().len(), drives = groups.len(), "grouped plays");
    groups
}

/// Halftime when the previous drive finished in Q2 and the next opens in Q3 or later.
pub fn separator_between(prev: &DriveGroup<'_>, next: &DriveGroup<'_>) -> Separator {
    if prev.last_quarter() == Quarter::SECOND && next.first_quarter() >= Quarter::THIRD {
        Separator::Halftime
    } else {
        Separator::DriveEnd(prev.ordinal)
    }
}

pub fn timeline(log: &GameLog) -> Timeline<'_> {
    if log.plays().is_empty() {
        return Timeline::Empty;
    }

    let mut sections: Vec<Section<'_>> = Vec::new();
    for group in group_drives(log) {
        let separator = sections
            .last()
            .map(|prev| separator_between(&prev.group, &group));
        sections.push(Section { separator, group });
    }
    Timeline::Drives(sections)
}

/// `1 play`, `3 plays`.
pub fn count_label(n: usize) -> String {
    if n == 1 {
        "1 play".to_string()
    } else {
        format!("{n} plays")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlayEntry, PlayType};

    fn add(log: &mut GameLog, kind: PlayType, q: u8) -> u64 {
        let mut entry = PlayEntry::new(kind, format!("{kind} in Q{q}"));
        entry.quarter = Quarter::new(q).unwrap();
        log.add_play(entry).unwrap()
    }

    fn separators(log: &GameLog) -> Vec<Option<Separator>> {
        match timeline(log) {
            Timeline::Empty => vec![],
            Timeline::Drives(sections) => sections.into_iter().map(|s| s.separator).collect(),
        }
    }

    #[test]
    fn empty_log_has_empty_timeline() {
        let log = GameLog::new();
        assert_eq!(timeline(&log), Timeline::Empty);
        assert!(group_drives(&log).is_empty());
    }

    #[test]
    fn single_rush_counts_one_with_no_separator() {
        let mut log = GameLog::new();
        add(&mut log, PlayType::Rush, 1);
        assert_eq!(log.counted_plays(), 1);
        assert_eq!(separators(&log), vec![None]);
    }

    #[test]
    fn groups_follow_first_appearance() {
        let mut log = GameLog::new();
        let a = add(&mut log, PlayType::Rush, 1);
        log.end_drive().unwrap();
        add(&mut log, PlayType::Pass, 1);
        log.insert_after(a, PlayEntry::new(PlayType::Sack, "late entry"))
            .unwrap();

        let groups = group_drives(&log);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].drive_id, 1);
        assert_eq!(groups[0].ordinal, 1);
        assert_eq!(groups[0].plays.len(), 2);
        assert!(groups[0].is_ended());
        assert_eq!(groups[1].drive_id, 2);
        assert_eq!(groups[1].ordinal, 2);
        assert!(!groups[1].is_ended());
    }

    #[test]
    fn grouping_is_deterministic() {
        let mut log = GameLog::new();
        add(&mut log, PlayType::Kickoff, 1);
        add(&mut log, PlayType::Rush, 1);
        log.end_drive().unwrap();
        add(&mut log, PlayType::Pass, 2);
        assert_eq!(group_drives(&log), group_drives(&log));
        assert_eq!(timeline(&log), timeline(&log));
    }

    #[test]
    fn halftime_between_q2_and_q3() {
        let mut log = GameLog::new();
        add(&mut log, PlayType::Rush, 1);
        add(&mut log, PlayType::Pass, 2);
        log.end_drive().unwrap();
        add(&mut log, PlayType::Kickoff, 3);
        assert_eq!(separators(&log), vec![None, Some(Separator::Halftime)]);
    }

    #[test]
    fn drive_end_within_a_half() {
        let mut log = GameLog::new();
        add(&mut log, PlayType::Rush, 1);
        log.end_drive().unwrap();
        add(&mut log, PlayType::Pass, 2);
        log.end_drive().unwrap();
        add(&mut log, PlayType::Pass, 2);
        assert_eq!(
            separators(&log),
            vec![
                None,
                Some(Separator::DriveEnd(1)),
                Some(Separator::DriveEnd(2)),
            ]
        );
    }

    #[test]
    fn overtime_after_q2_is_still_halftime() {
        let mut log = GameLog::new();
        add(&mut log, PlayType::Rush, 2);
        log.end_drive().unwrap();
        add(&mut log, PlayType::Rush, 5);
        assert_eq!(separators(&log)[1], Some(Separator::Halftime));
    }

    #[test]
    fn edited_quarter_changes_next_render() {
        let mut log = GameLog::new();
        add(&mut log, PlayType::Rush, 1);
        log.end_drive().unwrap();
        let b = add(&mut log, PlayType::Pass, 3);
        assert_eq!(separators(&log)[1], Some(Separator::DriveEnd(1)));

        let first = log.plays()[0].id;
        let mut entry = log.play(first).unwrap().entry.clone();
        entry.quarter = Quarter::SECOND;
        log.edit_play(first, entry).unwrap();
        assert_eq!(separators(&log)[1], Some(Separator::Halftime));
        assert!(log.play(b).is_some());
    }

    #[test]
    fn per_drive_counts() {
        let mut log = GameLog::new();
        add(&mut log, PlayType::Kickoff, 1);
        add(&mut log, PlayType::Rush, 1);
        add(&mut log, PlayType::Touchdown, 1);
        add(&mut log, PlayType::ExtraPoint, 1);
        log.end_drive().unwrap();
        add(&mut log, PlayType::Punt, 1);
        let groups = group_drives(&log);
        assert_eq!(groups[0].counted(), 2);
        assert_eq!(groups[1].counted(), 0);
        assert_eq!(groups[1].plays.len(), 1);
    }

    #[test]
    fn count_labels() {
        assert_eq!(count_label(0), "0 plays");
        assert_eq!(count_label(1), "1 play");
        assert_eq!(count_label(12), "12 plays");
    }
}
