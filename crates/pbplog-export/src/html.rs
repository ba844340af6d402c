//! HTML rendering for the exported document.
//!
//! Every visual rule is inlined on the element it styles, so the file renders
//! the same when opened from disk, mailed, or pasted into another page.

use std::fmt::{self, Write};

use chrono::NaiveDateTime;
use pbplog_core::{
    DriveGroup, GameInfo, GameLog, Play, PlayType, Separator, Side, Timeline, count_label,
    timeline,
};
use tracing::debug;

const ACCENT: &str = "#00d4ff";
const ACCENT_HOME: &str = "#7c4dff";
const MUTED: &str = "#6b7280";
const TEXT: &str = "#e8eaf6";
const GOLD: &str = "#ffca28";
const BORDER: &str = "#2a2f45";

const QUARTER_HEADERS: [&str; 6] = ["Q1", "Q2", "Q3", "Q4", "OT", "T"];

/// Escape text for use in element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole game as a standalone HTML page.
///
/// `saved_at` is printed in the page header. Drive collapse flags are
/// ignored; the export always lists every play.
pub fn render_document(log: &GameLog, saved_at: NaiveDateTime) -> Result<String, fmt::Error> {
    let game = &log.game;
    let away = escape(game.team_label(Side::Away));
    let home = escape(game.team_label(Side::Home));
    let mut out = String::new();

    writeln!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\"/>\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1.0\"/>"
    )?;
    writeln!(out, "<title>🏈 {away} vs {home} – Play by Play</title>")?;
    writeln!(
        out,
        "<style>*{{box-sizing:border-box;margin:0;padding:0}}\
         body{{font-family:'Inter',system-ui,sans-serif;background:#0d0f14;color:{TEXT};\
         min-height:100vh;padding-bottom:40px}}</style>"
    )?;
    writeln!(out, "</head><body>")?;
    writeln!(
        out,
        "<div style=\"background:linear-gradient(135deg,#0d0f14,#151a2e);border-bottom:1px solid {BORDER};\
         padding:13px 18px;display:flex;align-items:center;gap:10px\">\
         <span style=\"font-size:1rem;font-weight:700;color:{ACCENT};letter-spacing:2px\">🏈 pbplog</span>\
         <span style=\"font-size:.72rem;color:{MUTED}\">Saved {}</span></div>",
        saved_at.format("%Y/%m/%d %H:%M:%S")
    )?;
    writeln!(out, "<div style=\"max-width:860px;margin:20px auto;padding:0 14px\">")?;

    write_scoreboard(&mut out, game)?;
    write_plays_panel(&mut out, log)?;

    writeln!(out, "</div></body></html>")?;
    debug!(bytes = out.len(), "rendered export");
    Ok(out)
}

// ── Scoreboard ──

fn write_scoreboard(out: &mut String, game: &GameInfo) -> fmt::Result {
    writeln!(
        out,
        "<div style=\"background:#151820;border:1px solid {BORDER};border-radius:12px;overflow:hidden;margin-bottom:16px\">\
         <div style=\"background:linear-gradient(135deg,#1a2040,#0d1428);padding:13px 17px\">\
         <table style=\"width:100%;border-collapse:collapse\">"
    )?;
    write!(
        out,
        "<thead><tr style=\"font-size:.67rem;font-weight:700;color:{MUTED};text-transform:uppercase\">\
         <th style=\"text-align:left;padding:4px 7px;border-bottom:1px solid {BORDER};min-width:110px\">TEAM</th>"
    )?;
    for header in QUARTER_HEADERS {
        write!(
            out,
            "<th style=\"padding:4px 7px;border-bottom:1px solid {BORDER}\">{header}</th>"
        )?;
    }
    writeln!(out, "</tr></thead><tbody>")?;

    write_score_row(
        out,
        game.team_label(Side::Away),
        &game.away.city,
        &game.quarter_scores.away,
        game.away_total,
        ACCENT,
    )?;
    write_score_row(
        out,
        game.team_label(Side::Home),
        &game.home.city,
        &game.quarter_scores.home,
        game.home_total,
        ACCENT_HOME,
    )?;
    writeln!(out, "</tbody></table>")?;

    if game.has_event_details() {
        write!(
            out,
            "<div style=\"display:flex;flex-wrap:wrap;gap:8px 18px;padding:10px 14px 12px;\
             border-top:1px solid rgba(42,47,69,.5);margin-top:8px\">"
        )?;
        for (icon, value) in [
            ("🕐", &game.kickoff),
            ("🏟", &game.venue),
            ("🏆", &game.event_name),
            ("🌤", &game.weather),
        ] {
            if !value.is_empty() {
                write!(
                    out,
                    "<span style=\"font-size:.75rem;color:#9ca3af\">{icon} \
                     <span style=\"color:{TEXT}\">{}</span></span>",
                    escape(value)
                )?;
            }
        }
        writeln!(out, "</div>")?;
    }

    writeln!(out, "</div></div>")
}

fn write_score_row(
    out: &mut String,
    name: &str,
    city: &str,
    scores: &[u32; 5],
    total: u32,
    colour: &str,
) -> fmt::Result {
    write!(
        out,
        "<tr><td style=\"padding:5px 7px\">\
         <div style=\"font-size:.9rem;font-weight:800;text-transform:uppercase;letter-spacing:1px\">{}</div>\
         <div style=\"font-size:.68rem;color:{MUTED}\">{}</div></td>",
        escape(name),
        escape(city)
    )?;
    for score in scores {
        write!(
            out,
            "<td style=\"text-align:center;padding:5px 7px;border-bottom:1px solid {BORDER}\">{score}</td>"
        )?;
    }
    writeln!(
        out,
        "<td style=\"text-align:center;padding:5px 10px;font-size:1.1rem;font-weight:700;color:{colour}\">{total}</td></tr>"
    )
}

// ── Play-by-play ──

fn write_plays_panel(out: &mut String, log: &GameLog) -> fmt::Result {
    writeln!(
        out,
        "<div style=\"background:#151820;border:1px solid {BORDER};border-radius:12px;overflow:hidden\">\
         <div style=\"padding:11px 16px;background:#1c2030;border-bottom:1px solid {BORDER};\
         display:flex;align-items:center;justify-content:space-between\">\
         <span style=\"font-size:.86rem;font-weight:700;letter-spacing:.5px\">PLAY BY PLAY</span>\
         <span style=\"font-size:.72rem;color:{MUTED};background:#0d0f14;padding:2px 8px;border-radius:20px\">{}</span></div>",
        count_label(log.counted_plays())
    )?;

    match timeline(log) {
        Timeline::Empty => writeln!(
            out,
            "<div style=\"padding:40px;text-align:center;color:{MUTED}\">No plays recorded.</div>"
        )?,
        Timeline::Drives(sections) => {
            for section in sections {
                if let Some(separator) = section.separator {
                    write_separator(out, separator)?;
                }
                write_drive_header(out, &log.game, &section.group)?;
                for play in &section.group.plays {
                    write_play(out, &log.game, play, log.is_highlighted(play.id))?;
                }
            }
        }
    }

    writeln!(out, "</div>")
}

fn write_separator(out: &mut String, separator: Separator) -> fmt::Result {
    match separator {
        Separator::Halftime => writeln!(
            out,
            "<div style=\"padding:10px 18px;display:flex;align-items:center;gap:11px;\
             background:linear-gradient(90deg,rgba(255,202,40,.06),rgba(124,77,255,.06));\
             border-top:2px solid rgba(255,202,40,.3);border-bottom:2px solid rgba(255,202,40,.3)\">\
             <div style=\"flex:1;height:1px;background:rgba(255,202,40,.2)\"></div>\
             <span style=\"font-size:.72rem;font-weight:700;color:{GOLD};letter-spacing:2px\">HALFTIME</span>\
             <div style=\"flex:1;height:1px;background:rgba(255,202,40,.2)\"></div></div>"
        ),
        Separator::DriveEnd(n) => writeln!(
            out,
            "<div style=\"padding:8px 18px;display:flex;align-items:center;gap:11px;\
             background:rgba(255,68,68,.04);border-top:1px solid rgba(255,68,68,.22);\
             border-bottom:1px solid rgba(255,68,68,.22)\">\
             <div style=\"flex:1;height:1px;background:rgba(255,68,68,.2)\"></div>\
             <span style=\"font-size:.68rem;font-weight:700;color:#ff4444;letter-spacing:1.5px;opacity:.7\">DRIVE {n} END</span>\
             <div style=\"flex:1;height:1px;background:rgba(255,68,68,.2)\"></div></div>"
        ),
    }
}

fn write_drive_header(out: &mut String, game: &GameInfo, group: &DriveGroup<'_>) -> fmt::Result {
    let summary = group.summary().cloned().unwrap_or_default();
    let (team, colour) = if summary.side.is_set() {
        (game.team_label(summary.side), side_colour(summary.side))
    } else {
        ("—", MUTED)
    };
    let result = if summary.result.is_empty() {
        "—"
    } else {
        summary.result.as_str()
    };

    write!(
        out,
        "<div style=\"display:flex;align-items:center;gap:8px;padding:9px 14px;background:#1c2030;\
         border-bottom:1px solid {BORDER};flex-wrap:wrap\">\
         <span style=\"font-size:1rem;font-weight:700;color:{colour};text-transform:uppercase;min-width:60px\">{}</span>\
         <span style=\"color:{BORDER}\">|</span><span style=\"font-size:.78rem;color:{TEXT}\">{}</span>\
         <span style=\"color:{BORDER}\">·</span><span style=\"font-size:.7rem;color:{MUTED}\">{}</span>",
        escape(team),
        escape(result),
        count_label(group.counted())
    )?;
    for (value, suffix, style) in [
        (&summary.yards, " yds", TEXT),
        (&summary.duration, "", TEXT),
        (&summary.score, "", GOLD),
    ] {
        if !value.is_empty() {
            write!(
                out,
                "<span style=\"color:{BORDER}\">·</span>\
                 <span style=\"font-size:.76rem;color:{style}\">{}{suffix}</span>",
                escape(value)
            )?;
        }
    }
    writeln!(out, "</div>")
}

fn write_play(out: &mut String, game: &GameInfo, play: &Play, highlighted: bool) -> fmt::Result {
    let entry = &play.entry;
    let highlight = if highlighted {
        format!("border-left:3px solid {ACCENT};background:rgba(0,212,255,.07);")
    } else {
        String::new()
    };
    let time = if entry.time.is_empty() {
        "—".to_string()
    } else {
        escape(&entry.time)
    };
    let situation = entry.situation();
    let situation = if situation.is_empty() {
        "—".to_string()
    } else {
        escape(&situation)
    };

    write!(
        out,
        "<div style=\"padding:11px 14px;border-bottom:1px solid rgba(42,47,69,.5);display:grid;\
         grid-template-columns:82px 1fr;gap:9px;align-items:start;{highlight}\">\
         <div style=\"text-align:center\"><div>\
         <span style=\"font-size:.6rem;color:{MUTED};font-weight:600\">{} </span>\
         <span style=\"font-size:.76rem;color:{ACCENT};font-weight:700\">{time}</span></div>\
         <div style=\"font-size:.66rem;color:{MUTED};margin-top:2px\">{situation}</div>",
        entry.quarter.label()
    )?;
    if entry.side.is_set() {
        let colour = side_colour(entry.side);
        write!(
            out,
            "<div style=\"display:inline-block;font-size:.6rem;font-weight:700;padding:1px 5px;\
             border-radius:3px;background:{colour}22;color:{colour};text-transform:uppercase;\
             margin-top:3px\">{}</div>",
            escape(game.team_label(entry.side))
        )?;
    }
    write!(
        out,
        "</div><div><span style=\"display:inline-block;font-size:.63rem;font-weight:700;padding:2px 6px;\
         border-radius:4px;text-transform:uppercase;letter-spacing:.5px;background:{};margin-bottom:4px\" \
         data-type=\"{}\">{}</span>\
         <div style=\"font-size:.84rem;line-height:1.55;color:{TEXT}\">{}</div>",
        tag_style(entry.kind),
        entry.kind.key(),
        entry.kind.label(),
        escape(&entry.description)
    )?;
    if let Some(score) = &entry.score_update {
        write!(
            out,
            "<div style=\"font-size:.71rem;color:{GOLD};font-weight:600;margin-top:3px\">🏆 {}</div>",
            escape(score)
        )?;
    }
    writeln!(out, "</div></div>")
}

fn side_colour(side: Side) -> &'static str {
    match side {
        Side::Home => ACCENT_HOME,
        Side::Away | Side::Unset => ACCENT,
    }
}

/// Tag background and text colour, in one `background:...;color:...` run.
fn tag_style(kind: PlayType) -> &'static str {
    match kind {
        PlayType::Pass => "rgba(0,212,255,.15);color:#00d4ff",
        PlayType::Incomplete => "rgba(255,68,68,.15);color:#ff4444",
        PlayType::Sack => "rgba(255,111,0,.15);color:#ff6f00",
        PlayType::Rush => "rgba(0,230,118,.12);color:#00e676",
        PlayType::Touchdown => "rgba(255,202,40,.15);color:#ffca28",
        PlayType::ExtraPoint => "rgba(255,202,40,.08);color:#e0ac00",
        PlayType::FieldGoal => "rgba(124,77,255,.18);color:#b388ff",
        PlayType::Punt | PlayType::Kickoff => "rgba(107,114,128,.2);color:#6b7280",
        PlayType::Turnover => "rgba(255,68,68,.18);color:#ff8a80",
        PlayType::Penalty => "rgba(255,68,68,.12);color:#ff4444",
        PlayType::Timeout => "rgba(255,202,40,.1);color:#ffca28",
        PlayType::Other => "rgba(107,114,128,.15);color:#6b7280",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pbplog_core::{DriveField, PlayEntry, Quarter};

    fn saved_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap()
    }

    fn play(kind: PlayType, q: Quarter, desc: &str) -> PlayEntry {
        let mut entry = PlayEntry::new(kind, desc);
        entry.quarter = q;
        entry
    }

    #[test]
    fn escape_covers_markup() {
        assert_eq!(
            escape(r#"<b>"A&B"</b>"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn empty_game_has_placeholder() {
        let html = render_document(&GameLog::new(), saved_at()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("No plays recorded."));
        assert!(html.contains("0 plays"));
        assert!(html.contains("Saved 2026/10/17 19:30:00"));
        assert!(html.contains("AWAY vs HOME"));
        assert!(!html.contains("🏟"));
    }

    #[test]
    fn scoreboard_lists_quarters_and_totals() {
        let mut log = GameLog::new();
        log.game.away.name = "Owls".into();
        log.game.away.city = "Portland".into();
        log.game.quarter_scores.away = [7, 3, 0, 14, 6];
        log.game.away_total = 30;
        log.game.venue = "Riverside <Field>".into();
        let html = render_document(&log, saved_at()).unwrap();
        assert!(html.contains(">Owls</div>"));
        assert!(html.contains(">Portland</div>"));
        assert!(html.contains(">14</td>"));
        assert!(html.contains(">30</td>"));
        assert!(html.contains("Riverside &lt;Field&gt;"));
        assert!(!html.contains("🌤"));
    }

    #[test]
    fn halftime_and_drive_end_separators() {
        let mut log = GameLog::new();
        log.add_play(play(PlayType::Rush, Quarter::FIRST, "d1")).unwrap();
        log.end_drive().unwrap();
        log.add_play(play(PlayType::Pass, Quarter::SECOND, "d2")).unwrap();
        log.end_drive().unwrap();
        log.add_play(play(PlayType::Kickoff, Quarter::THIRD, "d3")).unwrap();

        let html = render_document(&log, saved_at()).unwrap();
        assert!(html.contains("DRIVE 1 END"));
        assert!(!html.contains("DRIVE 2 END"));
        assert!(html.contains("HALFTIME"));
        assert!(html.find("DRIVE 1 END") < html.find("HALFTIME"));
    }

    #[test]
    fn plays_render_with_escaping_and_highlight() {
        let mut log = GameLog::new();
        log.game.home.name = "Hawks".into();
        let mut entry = play(PlayType::Touchdown, Quarter::FOURTH, "QB <keeps> it & scores");
        entry.side = Side::Home;
        entry.time = "2:01".into();
        entry.down = "1st".into();
        entry.distance = "Goal".into();
        entry.yardline = "OPP 3".into();
        entry.score_update = Some("HAW 21-17".into());
        let id = log.add_play(entry).unwrap();
        log.toggle_highlight(id).unwrap();

        let html = render_document(&log, saved_at()).unwrap();
        assert!(html.contains("QB &lt;keeps&gt; it &amp; scores"));
        assert!(html.contains("TOUCHDOWN"));
        assert!(html.contains("1st &amp; Goal at OPP 3"));
        assert!(html.contains(">Q4 </span>"));
        assert!(html.contains("🏆 HAW 21-17"));
        assert!(html.contains("border-left:3px solid #00d4ff"));
        assert!(html.contains(">Hawks</div>"));
    }

    #[test]
    fn collapsed_drives_still_exported() {
        let mut log = GameLog::new();
        log.add_play(play(PlayType::Rush, Quarter::FIRST, "hidden in the app"))
            .unwrap();
        log.end_drive().unwrap();
        log.toggle_drive_collapsed(1).unwrap();
        log.update_drive(1, DriveField::Result("Punt".into())).unwrap();
        log.update_drive(1, DriveField::Yards("12".into())).unwrap();
        log.update_drive(1, DriveField::Side(Side::Away)).unwrap();

        let html = render_document(&log, saved_at()).unwrap();
        assert!(html.contains("hidden in the app"));
        assert!(html.contains(">Punt</span>"));
        assert!(html.contains("12 yds"));
    }

    #[test]
    fn administrative_plays_listed_but_not_counted() {
        let mut log = GameLog::new();
        log.add_play(play(PlayType::Kickoff, Quarter::FIRST, "Opening kick"))
            .unwrap();
        log.add_play(play(PlayType::Rush, Quarter::FIRST, "Run"))
            .unwrap();
        let html = render_document(&log, saved_at()).unwrap();
        assert!(html.contains("Opening kick"));
        assert!(html.contains("KICKOFF"));
        assert!(html.contains(">1 play</span>"));
    }
}
