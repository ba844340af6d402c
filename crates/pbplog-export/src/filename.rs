use chrono::NaiveDate;
use pbplog_core::{GameInfo, Side};

/// `pbp_<away>_vs_<home>_<YYYY-MM-DD>.html`, restricted to `[A-Za-z0-9_.-]`.
///
/// Anything else, spaces and non-ASCII letters included, becomes `_`.
pub fn export_filename(game: &GameInfo, date: NaiveDate) -> String {
    let raw = format!(
        "pbp_{}_vs_{}_{}.html",
        game.team_label(Side::Away),
        game.team_label(Side::Home),
        date.format("%Y-%m-%d")
    );
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn blank_teams_use_fallbacks() {
        let game = GameInfo::default();
        assert_eq!(
            export_filename(&game, date()),
            "pbp_AWAY_vs_HOME_2026-10-17.html"
        );
    }

    #[test]
    fn unsafe_characters_replaced() {
        let mut game = GameInfo::default();
        game.away.name = "St. Mary's".into();
        game.home.name = "Köln/Bonn Rams".into();
        assert_eq!(
            export_filename(&game, date()),
            "pbp_St._Mary_s_vs_K_ln_Bonn_Rams_2026-10-17.html"
        );
    }
}
