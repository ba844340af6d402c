mod args;
mod display;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use pbplog_core::{DriveField, EditorSession, GameLog, PlayEntry, Side};
use pbplog_store::JsonStore;

use crate::args::{Cli, Command, DriveCommand};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    tracing::debug!("pbplog v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let store = match cli.store {
        Some(path) => JsonStore::open(path),
        None => JsonStore::open_default()?,
    };
    let mut log = store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))?;
    let mut session = EditorSession::new();

    match cli.command {
        Command::Show => {
            display::print_log(&log, &session)?;
            return Ok(());
        }
        Command::Export { out } => {
            export(&log, out)?;
            return Ok(());
        }
        Command::New { yes } => {
            if !yes && !confirm("Start a new game? The current log will be discarded.")? {
                println!("Kept the current game.");
                return Ok(());
            }
            log.reset();
            println!("🆕 Started a new game.");
        }
        Command::Game(fields) => {
            fields.apply(&mut log);
            println!("Game details saved.");
        }
        Command::Score { side, points } => {
            let slots = match side {
                Side::Away => &mut log.game.quarter_scores.away,
                Side::Home => &mut log.game.quarter_scores.home,
                Side::Unset => bail!("score needs a side: away or home"),
            };
            for (slot, value) in slots.iter_mut().zip(points) {
                *slot = value;
            }
            let shown = *slots;
            println!("{} scores (Q1-OT): {shown:?}", log.game.team_label(side));
        }
        Command::Quarter { quarter } => {
            log.set_active_quarter(quarter);
            println!("Entering plays in {quarter}.");
        }
        Command::Add(fields) => {
            let mut draft = PlayEntry {
                quarter: log.active_quarter(),
                ..PlayEntry::default()
            };
            fields.apply(&mut log, &mut draft);
            let id = session.submit(&mut log, draft)?;
            println!("✅ Added play {id}.");
        }
        Command::Edit { id, fields } => {
            let mut draft = session.start_edit(&mut log, id)?;
            fields.apply(&mut log, &mut draft);
            session.submit(&mut log, draft)?;
            println!("✅ Updated play {id}.");
        }
        Command::Insert { after, fields } => {
            let mut draft = session.start_insert_after(&log, after)?;
            fields.apply(&mut log, &mut draft);
            let id = session.submit(&mut log, draft)?;
            println!("↓ Inserted play {id} after play {after}.");
        }
        Command::Delete { id, yes } => {
            let preview = session.request_delete(&log, id)?;
            if !yes && !confirm(&format!("Delete \"{preview}\"? This cannot be undone."))? {
                session.cancel();
                println!("Kept play {id}.");
                return Ok(());
            }
            session.confirm_delete(&mut log)?;
            println!("🗑 Deleted play {id}.");
        }
        Command::Highlight { id } => {
            let on = log.toggle_highlight(id)?;
            println!("Play {id} {}.", if on { "highlighted" } else { "unhighlighted" });
        }
        Command::EndDrive => {
            let ended = log.end_drive()?;
            println!("🏁 Ended drive {ended}. New plays go to drive {}.", log.current_drive());
        }
        Command::Drive { action } => match action {
            DriveCommand::Toggle { id } => {
                let collapsed = log.toggle_drive_collapsed(id)?;
                println!("Drive {id} {}.", if collapsed { "collapsed" } else { "expanded" });
            }
            DriveCommand::Set {
                id,
                side,
                result,
                yards,
                time,
                score,
            } => {
                let fields = [
                    side.map(DriveField::Side),
                    result.map(DriveField::Result),
                    yards.map(DriveField::Yards),
                    time.map(DriveField::Duration),
                    score.map(DriveField::Score),
                ];
                for field in fields.into_iter().flatten() {
                    log.update_drive(id, field)?;
                }
                println!("Drive {id} updated.");
            }
        },
    }

    store
        .save(&log)
        .with_context(|| format!("saving {}", store.path().display()))?;
    Ok(())
}

fn export(log: &GameLog, out: Option<PathBuf>) -> anyhow::Result<()> {
    let filename = pbplog_export::export_filename(&log.game, chrono::Utc::now().date_naive());
    let path = match out {
        Some(p) if p.is_dir() => p.join(filename),
        Some(p) => p,
        None => PathBuf::from(filename),
    };
    let html = pbplog_export::render_document(log, chrono::Local::now().naive_local())?;
    std::fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "exported game");
    println!("💾 Saved {}", path.display());
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
