use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pbplog_core::{DriveId, GameLog, PlayEntry, PlayId, PlayType, Quarter, Side};

#[derive(Parser)]
#[command(name = "pbplog", version, about = "Author an American-football play-by-play log")]
pub struct Cli {
    /// Game file to open (defaults to the platform data directory).
    #[arg(long, global = true, env = "PBPLOG_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start a new blank game, discarding the current one.
    New {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Show the play-by-play.
    Show,
    /// Set team names, totals, and event details.
    Game(GameArgs),
    /// Set one side's per-quarter scores, in order Q1 Q2 Q3 Q4 OT.
    Score {
        side: Side,
        #[arg(num_args = 1..=5, required = true)]
        points: Vec<u32>,
    },
    /// Select the quarter new plays are entered in.
    Quarter {
        #[arg(value_parser = parse_quarter)]
        quarter: Quarter,
    },
    /// Add a play to the current drive.
    Add(PlayArgs),
    /// Change a play's fields; unspecified fields keep their values.
    Edit {
        id: PlayId,
        #[command(flatten)]
        fields: PlayArgs,
    },
    /// Insert a play directly after another, in that play's drive.
    Insert {
        after: PlayId,
        #[command(flatten)]
        fields: PlayArgs,
    },
    /// Delete a play.
    Delete {
        id: PlayId,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Mark or unmark a play as notable.
    Highlight { id: PlayId },
    /// End the current drive; later plays start a new one.
    EndDrive,
    /// Work with ended drives.
    Drive {
        #[command(subcommand)]
        action: DriveCommand,
    },
    /// Write the game as a standalone HTML page.
    Export {
        /// Output file or directory (defaults to the current directory).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum DriveCommand {
    /// Collapse or expand an ended drive in `show`.
    Toggle { id: DriveId },
    /// Edit an ended drive's summary.
    Set {
        id: DriveId,
        #[arg(long)]
        side: Option<Side>,
        #[arg(long)]
        result: Option<String>,
        #[arg(long)]
        yards: Option<String>,
        /// Time of possession, e.g. 4:12.
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        score: Option<String>,
    },
}

#[derive(Args)]
pub struct GameArgs {
    #[arg(long)]
    pub away_name: Option<String>,
    #[arg(long)]
    pub away_city: Option<String>,
    #[arg(long)]
    pub home_name: Option<String>,
    #[arg(long)]
    pub home_city: Option<String>,
    #[arg(long)]
    pub away_total: Option<u32>,
    #[arg(long)]
    pub home_total: Option<u32>,
    #[arg(long)]
    pub kickoff: Option<String>,
    #[arg(long)]
    pub venue: Option<String>,
    #[arg(long = "event")]
    pub event_name: Option<String>,
    #[arg(long)]
    pub weather: Option<String>,
}

impl GameArgs {
    pub fn apply(self, log: &mut GameLog) {
        let game = &mut log.game;
        let text_fields = [
            (self.away_name, &mut game.away.name),
            (self.away_city, &mut game.away.city),
            (self.home_name, &mut game.home.name),
            (self.home_city, &mut game.home.city),
            (self.kickoff, &mut game.kickoff),
            (self.venue, &mut game.venue),
            (self.event_name, &mut game.event_name),
            (self.weather, &mut game.weather),
        ];
        for (value, field) in text_fields {
            if let Some(value) = value {
                *field = value.trim().to_string();
            }
        }
        if let Some(total) = self.away_total {
            game.away_total = total;
        }
        if let Some(total) = self.home_total {
            game.home_total = total;
        }
    }
}

/// Play fields shared by `add`, `edit`, and `insert`.
#[derive(Args)]
pub struct PlayArgs {
    #[arg(short = 't', long = "type")]
    pub kind: Option<PlayType>,
    #[arg(short, long)]
    pub desc: Option<String>,
    /// Also becomes the active quarter.
    #[arg(short, long, value_parser = parse_quarter)]
    pub quarter: Option<Quarter>,
    /// Game clock, e.g. 12:45.
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub down: Option<String>,
    #[arg(long)]
    pub dist: Option<String>,
    #[arg(long)]
    pub yardline: Option<String>,
    #[arg(long)]
    pub side: Option<Side>,
    /// Score after the play, e.g. "OWL 7 - HAW 0".
    #[arg(long)]
    pub score: Option<String>,
}

impl PlayArgs {
    /// Overlay the given fields onto a draft. A quarter switches the active quarter too.
    pub fn apply(self, log: &mut GameLog, draft: &mut PlayEntry) {
        if let Some(quarter) = self.quarter {
            log.set_active_quarter(quarter);
            draft.quarter = quarter;
        }
        if let Some(kind) = self.kind {
            draft.kind = kind;
        }
        if let Some(side) = self.side {
            draft.side = side;
        }
        for (value, field) in [
            (self.desc, &mut draft.description),
            (self.time, &mut draft.time),
            (self.down, &mut draft.down),
            (self.dist, &mut draft.distance),
            (self.yardline, &mut draft.yardline),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }
        if self.score.is_some() {
            draft.score_update = self.score;
        }
    }
}

fn parse_quarter(s: &str) -> Result<Quarter, String> {
    let n = match s.trim().to_ascii_uppercase().as_str() {
        "OT" => 5,
        other => other
            .trim_start_matches('Q')
            .parse::<u8>()
            .map_err(|_| format!("expected 1-5, Q1-Q4, or OT, got {s}"))?,
    };
    Quarter::new(n).map_err(|e| e.to_string())
}
