//! Play, drive, and game metadata records.
//!
//! These are the persisted shapes. Every struct defaults field-by-field on
//! deserialisation so a game file written by an older build, or trimmed by
//! hand, still loads into the initial-state shape.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::LogError;

/// Play identifier. Assigned from a per-game counter, never reused.
pub type PlayId = u64;

/// Drive identifier. Assigned sequentially from 1, never reused.
pub type DriveId = u32;

/// Characters kept in a delete preview before it is cut with `…`.
pub const PREVIEW_CHARS: usize = 60;

// ── Quarter ──

/// Game period: 1-4 for regulation, 5 for overtime.
///
/// Deserialisation is lenient: a missing, null, or out-of-range number in a
/// stored game reads as [`Quarter::FIRST`] rather than failing the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Quarter(u8);

impl Quarter {
    pub const FIRST: Quarter = Quarter(1);
    pub const SECOND: Quarter = Quarter(2);
    pub const THIRD: Quarter = Quarter(3);
    pub const FOURTH: Quarter = Quarter(4);
    pub const OVERTIME: Quarter = Quarter(5);

    pub fn new(n: u8) -> Result<Self, LogError> {
        if (1..=5).contains(&n) {
            Ok(Self(n))
        } else {
            Err(LogError::InvalidQuarter(n))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// `Q1`..`Q4`, or `OT`.
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Q1",
            2 => "Q2",
            3 => "Q3",
            4 => "Q4",
            _ => "OT",
        }
    }
}

impl Default for Quarter {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for Quarter {
    type Error = LogError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<Quarter> for u8 {
    fn from(q: Quarter) -> u8 {
        q.0
    }
}

impl<'de> Deserialize<'de> for Quarter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(QuarterVisitor)
    }
}

struct QuarterVisitor;

impl QuarterVisitor {
    fn from_number(n: i128) -> Quarter {
        u8::try_from(n)
            .ok()
            .and_then(|n| Quarter::new(n).ok())
            .unwrap_or_default()
    }
}

impl<'de> Visitor<'de> for QuarterVisitor {
    type Value = Quarter;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a quarter number")
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Quarter, E> {
        Ok(Self::from_number(i128::from(n)))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Quarter, E> {
        Ok(Self::from_number(i128::from(n)))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Quarter, E> {
        if n.fract() == 0.0 && n.is_finite() {
            Ok(Self::from_number(n as i128))
        } else {
            Ok(Quarter::FIRST)
        }
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Quarter, E> {
        Ok(s.trim()
            .parse::<i128>()
            .map(Self::from_number)
            .unwrap_or_default())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Quarter, E> {
        Ok(Quarter::FIRST)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Quarter, E> {
        Ok(Quarter::FIRST)
    }

    fn visit_none<E: de::Error>(self) -> Result<Quarter, E> {
        Ok(Quarter::FIRST)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Side ──

/// Possessing team for a play or drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    #[serde(rename = "")]
    Unset,
    Away,
    Home,
}

impl Side {
    pub fn is_set(self) -> bool {
        self != Side::Unset
    }

    pub fn key(self) -> &'static str {
        match self {
            Side::Unset => "",
            Side::Away => "away",
            Side::Home => "home",
        }
    }
}

impl FromStr for Side {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "-" => Ok(Side::Unset),
            "away" => Ok(Side::Away),
            "home" => Ok(Side::Home),
            other => Err(LogError::UnknownSide(other.to_string())),
        }
    }
}

// ── Play type ──

/// What happened on a play.
///
/// Serialised under the short keys the game file has always used (`inc`,
/// `td`, `xp`, ...). Administrative types are excluded from play counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayType {
    #[default]
    #[serde(rename = "pass")]
    Pass,
    #[serde(rename = "inc")]
    Incomplete,
    #[serde(rename = "sack")]
    Sack,
    #[serde(rename = "rush")]
    Rush,
    #[serde(rename = "td")]
    Touchdown,
    #[serde(rename = "xp")]
    ExtraPoint,
    #[serde(rename = "fg")]
    FieldGoal,
    #[serde(rename = "punt")]
    Punt,
    #[serde(rename = "kick")]
    Kickoff,
    #[serde(rename = "turnover")]
    Turnover,
    #[serde(rename = "penalty")]
    Penalty,
    #[serde(rename = "timeout")]
    Timeout,
    #[serde(rename = "other")]
    Other,
}

impl PlayType {
    pub const ALL: [PlayType; 13] = [
        PlayType::Pass,
        PlayType::Incomplete,
        PlayType::Sack,
        PlayType::Rush,
        PlayType::Touchdown,
        PlayType::ExtraPoint,
        PlayType::FieldGoal,
        PlayType::Punt,
        PlayType::Kickoff,
        PlayType::Turnover,
        PlayType::Penalty,
        PlayType::Timeout,
        PlayType::Other,
    ];

    /// Short storage key, also used as the export's CSS tag suffix.
    pub fn key(self) -> &'static str {
        match self {
            PlayType::Pass => "pass",
            PlayType::Incomplete => "inc",
            PlayType::Sack => "sack",
            PlayType::Rush => "rush",
            PlayType::Touchdown => "td",
            PlayType::ExtraPoint => "xp",
            PlayType::FieldGoal => "fg",
            PlayType::Punt => "punt",
            PlayType::Kickoff => "kick",
            PlayType::Turnover => "turnover",
            PlayType::Penalty => "penalty",
            PlayType::Timeout => "timeout",
            PlayType::Other => "other",
        }
    }

    /// Hyphenated long name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            PlayType::Pass => "pass",
            PlayType::Incomplete => "incomplete",
            PlayType::Sack => "sack",
            PlayType::Rush => "rush",
            PlayType::Touchdown => "touchdown",
            PlayType::ExtraPoint => "extra-point",
            PlayType::FieldGoal => "field-goal",
            PlayType::Punt => "punt",
            PlayType::Kickoff => "kickoff",
            PlayType::Turnover => "turnover",
            PlayType::Penalty => "penalty",
            PlayType::Timeout => "timeout",
            PlayType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayType::Pass => "PASS",
            PlayType::Incomplete => "INCOMPLETE",
            PlayType::Sack => "SACK",
            PlayType::Rush => "RUSH",
            PlayType::Touchdown => "TOUCHDOWN",
            PlayType::ExtraPoint => "EXTRA POINT",
            PlayType::FieldGoal => "FIELD GOAL",
            PlayType::Punt => "PUNT",
            PlayType::Kickoff => "KICKOFF",
            PlayType::Turnover => "TURNOVER",
            PlayType::Penalty => "PENALTY",
            PlayType::Timeout => "TIMEOUT",
            PlayType::Other => "OTHER",
        }
    }

    /// False for punt, kickoff, penalty, timeout, and extra point.
    pub fn is_counted(self) -> bool {
        !matches!(
            self,
            PlayType::Punt
                | PlayType::Kickoff
                | PlayType::Penalty
                | PlayType::Timeout
                | PlayType::ExtraPoint
        )
    }
}

impl FromStr for PlayType {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        PlayType::ALL
            .into_iter()
            .find(|t| {
                t.key() == wanted
                    || t.name() == wanted
                    || t.label().eq_ignore_ascii_case(&wanted.replace('-', " "))
            })
            .ok_or_else(|| LogError::UnknownPlayType(s.trim().to_string()))
    }
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Plays ──

/// The user-editable fields of a play.
///
/// Edits replace the whole entry; the identifier and drive live on [`Play`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayEntry {
    pub quarter: Quarter,
    pub time: String,
    pub down: String,
    pub distance: String,
    pub yardline: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub kind: PlayType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_update: Option<String>,
}

impl PlayEntry {
    pub fn new(kind: PlayType, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            ..Self::default()
        }
    }

    /// `<down> & <distance> at <yardline>`, skipping whatever is blank.
    pub fn situation(&self) -> String {
        let distance = if self.distance.is_empty() {
            String::new()
        } else {
            format!("& {}", self.distance)
        };
        let yardline = if self.yardline.is_empty() {
            String::new()
        } else {
            format!("at {}", self.yardline)
        };
        [self.down.as_str(), distance.as_str(), yardline.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Trim text fields and reject an empty description.
    pub(crate) fn validated(mut self) -> Result<Self, LogError> {
        self.description = self.description.trim().to_string();
        if self.description.is_empty() {
            return Err(LogError::EmptyDescription);
        }
        for field in [
            &mut self.time,
            &mut self.down,
            &mut self.distance,
            &mut self.yardline,
        ] {
            *field = field.trim().to_string();
        }
        self.score_update = self
            .score_update
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub id: PlayId,
    /// Plays stored without a drive belong to the first one.
    #[serde(default = "first_drive")]
    pub drive_id: DriveId,
    #[serde(flatten)]
    pub entry: PlayEntry,
}

impl Play {
    pub fn is_counted(&self) -> bool {
        self.entry.kind.is_counted()
    }

    pub fn quarter(&self) -> Quarter {
        self.entry.quarter
    }
}

fn first_drive() -> DriveId {
    1
}

/// First [`PREVIEW_CHARS`] characters of a description, with `…` when cut.
pub fn preview(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

// ── Drives ──

/// Summary recorded once a drive has ended. Every field is editable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveSummary {
    pub side: Side,
    pub result: String,
    pub yards: String,
    pub duration: String,
    pub score: String,
    pub collapsed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DriveStatus {
    #[default]
    Open,
    Ended(DriveSummary),
}

impl DriveStatus {
    pub fn is_ended(&self) -> bool {
        matches!(self, DriveStatus::Ended(_))
    }

    pub fn summary(&self) -> Option<&DriveSummary> {
        match self {
            DriveStatus::Open => None,
            DriveStatus::Ended(summary) => Some(summary),
        }
    }
}

/// One editable field of a [`DriveSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveField {
    Side(Side),
    Result(String),
    Yards(String),
    Duration(String),
    Score(String),
}

impl DriveField {
    pub(crate) fn apply(self, summary: &mut DriveSummary) {
        match self {
            DriveField::Side(side) => summary.side = side,
            DriveField::Result(v) => summary.result = v,
            DriveField::Yards(v) => summary.yards = v,
            DriveField::Duration(v) => summary.duration = v,
            DriveField::Score(v) => summary.score = v,
        }
    }
}

// ── Game metadata ──

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub name: String,
    pub city: String,
}

/// Per-quarter points, Q1-Q4 then OT.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarterScores {
    pub away: [u32; 5],
    pub home: [u32; 5],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameInfo {
    pub away: Team,
    pub home: Team,
    pub quarter_scores: QuarterScores,
    pub away_total: u32,
    pub home_total: u32,
    pub kickoff: String,
    pub venue: String,
    pub event_name: String,
    pub weather: String,
}

impl GameInfo {
    /// Team name for display, falling back to `AWAY`/`HOME`. Unset sides get `""`.
    pub fn team_label(&self, side: Side) -> &str {
        match side {
            Side::Unset => "",
            Side::Away if self.away.name.is_empty() => "AWAY",
            Side::Away => &self.away.name,
            Side::Home if self.home.name.is_empty() => "HOME",
            Side::Home => &self.home.name,
        }
    }

    pub fn has_event_details(&self) -> bool {
        [&self.kickoff, &self.venue, &self.event_name, &self.weather]
            .iter()
            .any(|s| !s.is_empty())
    }
}
