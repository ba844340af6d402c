mod error;
pub mod log;
pub mod model;
pub mod session;
pub mod timeline;

pub use error::LogError;
pub use log::GameLog;
pub use model::{
    DriveField, DriveId, DriveStatus, DriveSummary, GameInfo, Play, PlayEntry, PlayId, PlayType,
    Quarter, QuarterScores, Side, Team,
};
pub use session::{EditorSession, SessionState};
pub use timeline::{DriveGroup, Section, Separator, Timeline, count_label, group_drives, timeline};
