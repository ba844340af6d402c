use thiserror::Error;

use crate::model::{DriveId, PlayId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogError {
    #[error("play description must not be empty")]
    EmptyDescription,

    #[error("drive {0} has no plays")]
    EmptyDrive(DriveId),

    #[error("no play with id {0}")]
    PlayNotFound(PlayId),

    #[error("drive {0} has not ended")]
    DriveNotEnded(DriveId),

    #[error("quarter must be 1-5 (5 = OT), got {0}")]
    InvalidQuarter(u8),

    #[error("unknown play type: {0}")]
    UnknownPlayType(String),

    #[error("unknown side: {0} (expected away, home, or none)")]
    UnknownSide(String),

    #[error("no delete is waiting for confirmation")]
    NothingToConfirm,
}
