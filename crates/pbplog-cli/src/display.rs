//! Terminal view of the play-by-play.
//!
//! Mirrors the export's grouping and separators, and adds what only the
//! editor needs: play ids to act on, collapsed drives, and session markers.

use std::fmt::{self, Write};

use pbplog_core::{
    DriveGroup, EditorSession, GameInfo, GameLog, Play, Separator, Side, Timeline, count_label,
    timeline,
};

const RULE_WIDTH: usize = 64;

/// Print the whole game to stdout.
pub fn print_log(log: &GameLog, session: &EditorSession) -> anyhow::Result<()> {
    print!("{}", render_log(log, session)?);
    Ok(())
}

pub fn render_log(log: &GameLog, session: &EditorSession) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_header(&mut out, &log.game)?;

    writeln!(
        out,
        "PLAY BY PLAY · {}   (entering {} · drive {})",
        count_label(log.counted_plays()),
        log.active_quarter(),
        log.current_drive()
    )?;
    writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;

    match timeline(log) {
        Timeline::Empty => {
            writeln!(out, "  🏈 No plays yet. Add one with `pbplog add -t <type> -d <text>`.")?;
        }
        Timeline::Drives(sections) => {
            for section in sections {
                if let Some(separator) = section.separator {
                    write_separator(&mut out, separator)?;
                }
                write_drive(&mut out, log, session, &section.group)?;
            }
        }
    }
    Ok(out)
}

// ── Header ──

fn write_header(out: &mut String, game: &GameInfo) -> fmt::Result {
    writeln!(
        out,
        "=== {} vs {} ===",
        game.team_label(Side::Away),
        game.team_label(Side::Home)
    )?;
    writeln!(out, "  {:<18} Q1  Q2  Q3  Q4  OT     T", "")?;
    for (side, city, scores, total) in [
        (Side::Away, &game.away.city, &game.quarter_scores.away, game.away_total),
        (Side::Home, &game.home.city, &game.quarter_scores.home, game.home_total),
    ] {
        let name = if city.is_empty() {
            game.team_label(side).to_string()
        } else {
            format!("{} ({city})", game.team_label(side))
        };
        write!(out, "  {name:<18}")?;
        for score in scores {
            write!(out, " {score:>3}")?;
        }
        writeln!(out, "   {total:>3}")?;
    }

    let details: Vec<String> = [
        ("🕐", &game.kickoff),
        ("🏟", &game.venue),
        ("🏆", &game.event_name),
        ("🌤", &game.weather),
    ]
    .into_iter()
    .filter(|(_, v)| !v.is_empty())
    .map(|(icon, v)| format!("{icon} {v}"))
    .collect();
    if !details.is_empty() {
        writeln!(out, "  {}", details.join("   "))?;
    }
    writeln!(out)
}

// ── Drives ──

fn write_separator(out: &mut String, separator: Separator) -> fmt::Result {
    let label = match separator {
        Separator::Halftime => " HALFTIME ".to_string(),
        Separator::DriveEnd(n) => format!(" Drive {n} End "),
    };
    match separator {
        Separator::Halftime => writeln!(out, "{label:═^width$}", width = RULE_WIDTH),
        Separator::DriveEnd(_) => writeln!(out, "{label:─^width$}", width = RULE_WIDTH),
    }
}

fn write_drive(
    out: &mut String,
    log: &GameLog,
    session: &EditorSession,
    group: &DriveGroup<'_>,
) -> fmt::Result {
    let counted = count_label(group.counted());
    match group.summary() {
        None => {
            writeln!(
                out,
                "DRIVE {} ▶ IN PROGRESS · {counted}",
                group.drive_id
            )?;
        }
        Some(summary) => {
            let arrow = if summary.collapsed { "▶" } else { "▼" };
            let side = if summary.side.is_set() {
                log.game.team_label(summary.side)
            } else {
                "—"
            };
            let or_blank = |s: &str, placeholder: &'static str| {
                if s.is_empty() {
                    placeholder.to_string()
                } else {
                    s.to_string()
                }
            };
            writeln!(
                out,
                "{arrow} drive {} | {side} | {} · {counted} · {} yds · {} · {}",
                group.drive_id,
                or_blank(&summary.result, "Result..."),
                or_blank(&summary.yards, "-"),
                or_blank(&summary.duration, "0:00"),
                or_blank(&summary.score, "-"),
            )?;
            if summary.collapsed {
                return Ok(());
            }
        }
    }

    for play in &group.plays {
        write_play(out, log, session, play)?;
    }
    Ok(())
}

fn write_play(out: &mut String, log: &GameLog, session: &EditorSession, play: &Play) -> fmt::Result {
    let entry = &play.entry;
    let marker = if session.pending_delete() == Some(play.id) {
        '✕'
    } else if session.is_editing(play.id) {
        '✏'
    } else if session.is_inserting_after(play.id) {
        '↓'
    } else if log.is_highlighted(play.id) {
        '★'
    } else {
        ' '
    };
    let time = if entry.time.is_empty() { "—" } else { entry.time.as_str() };
    let situation = entry.situation();
    let situation = if situation.is_empty() { "—" } else { situation.as_str() };

    write!(
        out,
        " {marker} [{:>3}] {} {time:<6} {situation:<22}",
        play.id, entry.quarter
    )?;
    if entry.side.is_set() {
        write!(out, " [{}]", log.game.team_label(entry.side))?;
    }
    writeln!(out, " {:<11} {}", entry.kind.label(), entry.description)?;
    if let Some(score) = &entry.score_update {
        writeln!(out, "{:>14}🏆 {score}", "")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbplog_core::{DriveField, PlayEntry, PlayType, Quarter};

    fn entry(kind: PlayType, q: Quarter, desc: &str) -> PlayEntry {
        let mut e = PlayEntry::new(kind, desc);
        e.quarter = q;
        e
    }

    #[test]
    fn empty_log_shows_placeholder() {
        let text = render_log(&GameLog::new(), &EditorSession::new()).unwrap();
        assert!(text.contains("=== AWAY vs HOME ==="));
        assert!(text.contains("0 plays"));
        assert!(text.contains("No plays yet"));
    }

    #[test]
    fn in_progress_and_ended_drives() {
        let mut log = GameLog::new();
        log.game.away.name = "Owls".into();
        let a = log
            .add_play(entry(PlayType::Rush, Quarter::SECOND, "Dive for 3"))
            .unwrap();
        log.end_drive().unwrap();
        log.update_drive(1, DriveField::Side(Side::Away)).unwrap();
        log.add_play(entry(PlayType::Kickoff, Quarter::THIRD, "Second-half kick"))
            .unwrap();
        log.toggle_highlight(a).unwrap();

        let text = render_log(&log, &EditorSession::new()).unwrap();
        assert!(text.contains("▼ drive 1 | Owls | Result..."));
        assert!(text.contains("HALFTIME"));
        assert!(text.contains("DRIVE 2 ▶ IN PROGRESS · 0 plays"));
        assert!(text.contains(&format!(" ★ [{a:>3}] Q2")));
        assert!(text.contains("Second-half kick"));
    }

    #[test]
    fn collapsed_drive_hides_plays() {
        let mut log = GameLog::new();
        log.add_play(entry(PlayType::Rush, Quarter::FIRST, "Tucked away"))
            .unwrap();
        log.end_drive().unwrap();
        log.toggle_drive_collapsed(1).unwrap();
        log.add_play(entry(PlayType::Pass, Quarter::FIRST, "Visible"))
            .unwrap();

        let text = render_log(&log, &EditorSession::new()).unwrap();
        assert!(text.starts_with("=== AWAY vs HOME ==="));
        assert!(text.contains("▶ drive 1"));
        assert!(!text.contains("Tucked away"));
        assert!(text.contains("Drive 1 End"));
        assert!(text.contains("Visible"));
    }

    #[test]
    fn headers_name_drives_by_id_after_a_drive_empties() {
        let mut log = GameLog::new();
        let gone = log
            .add_play(entry(PlayType::Rush, Quarter::FIRST, "Fumbled snap"))
            .unwrap();
        log.end_drive().unwrap();
        log.add_play(entry(PlayType::Pass, Quarter::FIRST, "Out route"))
            .unwrap();
        log.end_drive().unwrap();
        log.add_play(entry(PlayType::Rush, Quarter::FIRST, "Draw"))
            .unwrap();
        log.delete_play(gone).unwrap();

        let text = render_log(&log, &EditorSession::new()).unwrap();
        assert!(text.contains("▼ drive 2 |"));
        assert!(text.contains("DRIVE 3 ▶ IN PROGRESS · 1 play"));
        assert!(!text.contains("DRIVE 2 ▶"));
    }

    #[test]
    fn session_markers() {
        let mut log = GameLog::new();
        let a = log
            .add_play(entry(PlayType::Pass, Quarter::FIRST, "First"))
            .unwrap();
        let mut session = EditorSession::new();
        session.start_insert_after(&log, a).unwrap();
        let text = render_log(&log, &session).unwrap();
        assert!(text.contains(&format!(" ↓ [{a:>3}]")));

        session.request_delete(&log, a).unwrap();
        let text = render_log(&log, &session).unwrap();
        assert!(text.contains(&format!(" ✕ [{a:>3}]")));
    }
}
