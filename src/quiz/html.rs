// Rendering of the leaderboard as a standalone HTML page.
//
// The ranking is embedded as JSON; the script of the page implements the same
// presenter state machine as quiz_board::reveal, so that the page works
// without any server.

use askama::Template;
use serde_json::json;

use crate::quiz::config_reader::LeaderboardSettings;
use crate::quiz::*;

/// Totals are shown without decimals when they are whole numbers.
pub fn format_total(total: f64) -> String {
    if total.fract() == 0.0 && total.abs() < 1e15 {
        format!("{}", total as i64)
    } else {
        format!("{}", total)
    }
}

/// The color of a rank: the first colors of the palette go to the first ranks, the last
/// color to every other rank.
pub fn rank_color(rank: u32, palette: &[String]) -> String {
    if palette.is_empty() {
        return "#808080".to_string();
    }
    let idx = (rank.max(1) as usize - 1).min(palette.len() - 1);
    palette[idx].clone()
}

/// The rank groups in JSON format. This is also the format of the reference files.
pub fn leaderboard_to_json(board: &Leaderboard) -> JSValue {
    let groups: Vec<JSValue> = board
        .groups
        .iter()
        .map(|g| {
            let teams: Vec<JSValue> = g
                .teams
                .iter()
                .map(|t| json!({"name": t.name, "total": t.total, "count": t.count}))
                .collect();
            json!({"rank": g.rank, "teams": teams})
        })
        .collect();
    json!({ "groups": groups })
}

fn page_data(board: &Leaderboard, settings: &LeaderboardSettings) -> JSValue {
    let groups: Vec<JSValue> = board
        .groups
        .iter()
        .map(|g| {
            let teams: Vec<JSValue> = g
                .teams
                .iter()
                .map(|t| {
                    json!({
                        "name": t.name,
                        "total": format_total(t.total),
                        "count": t.count
                    })
                })
                .collect();
            json!({
                "rank": g.rank,
                "tied": g.is_tied(),
                "color": rank_color(g.rank, &settings.palette),
                "teams": teams
            })
        })
        .collect();
    json!({
        "title": settings.title,
        "mode": settings.default_mode.name(),
        "groups": groups
    })
}

mod filters {
    /// JSON that can sit inside a script element: a script ends at the first "</",
    /// whatever the JSON says.
    pub fn script_json<T: std::fmt::Display>(s: T) -> ::askama::Result<String> {
        Ok(s.to_string()
            .replace('<', "\\u003c")
            .replace('>', "\\u003e")
            .replace('&', "\\u0026"))
    }
}

#[derive(Template)]
#[template(path = "leaderboard.html")]
struct LeaderboardPage<'a> {
    title: &'a str,
    data: JSValue,
}

pub fn render_leaderboard(board: &Leaderboard, settings: &LeaderboardSettings) -> QuizResult<String> {
    let page = LeaderboardPage {
        title: &settings.title,
        data: page_data(board, settings),
    };
    let html = page.render().context(RenderingPageSnafu {})?;
    debug!("render_leaderboard: {} bytes", html.len());
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LeaderboardSettings {
        let mut s = LeaderboardSettings::resolve(&None).unwrap();
        s.title = "Quiz <night> & co".to_string();
        s
    }

    fn board() -> Leaderboard {
        rank_teams(&[
            TeamRecord::new("A", 92.0, 3),
            TeamRecord::new("F", 92.0, 3),
            TeamRecord::new("</script><b>", 78.5, 5),
        ])
    }

    #[test]
    fn totals() {
        assert_eq!(format_total(92.0), "92");
        assert_eq!(format_total(78.5), "78.5");
        assert_eq!(format_total(-3.0), "-3");
    }

    #[test]
    fn colors() {
        let palette: Vec<String> = vec!["gold".to_string(), "silver".to_string()];
        assert_eq!(rank_color(1, &palette), "gold");
        assert_eq!(rank_color(2, &palette), "silver");
        assert_eq!(rank_color(7, &palette), "silver");
        assert_eq!(rank_color(1, &[]), "#808080");
    }

    #[test]
    fn json_groups() {
        let js = leaderboard_to_json(&board());
        assert_eq!(js["groups"][0]["rank"], 1);
        assert_eq!(js["groups"][0]["teams"][1]["name"], "F");
        assert_eq!(js["groups"][1]["rank"], 3);
    }

    fn embedded_data(page: &str) -> JSValue {
        let marker = r#"id="leaderboard-data">"#;
        let start = page.find(marker).unwrap() + marker.len();
        let end = start + page[start..].find("</script>").unwrap();
        serde_json::from_str(&page[start..end]).unwrap()
    }

    #[test]
    fn page_embeds_escaped_data() {
        let page = render_leaderboard(&board(), &settings()).unwrap();
        assert!(page.contains("<title>Quiz &lt;night&gt; &amp; co</title>"));
        assert!(page.contains(r#"\u003c/script\u003e\u003cb\u003e"#));
        assert!(!page.contains("</script><b>"));
        assert!(page.contains(r#""mode":"all""#));
        assert!(page.contains("function apply(state, event)"));
    }

    #[test]
    fn embedded_data_round_trips() {
        let page = render_leaderboard(&board(), &settings()).unwrap();
        let js = embedded_data(&page);
        assert_eq!(js["groups"].as_array().unwrap().len(), 2);
        assert_eq!(js["groups"][0]["tied"], true);
        assert_eq!(js["groups"][1]["teams"][0]["total"], "78.5");
        assert_eq!(js["groups"][1]["teams"][0]["name"], "</script><b>");
        assert_eq!(js["title"], "Quiz <night> & co");
    }

    #[test]
    fn names_are_not_template_markup() {
        let mut s = settings();
        s.title = "Round {{ title }} @DATA@".to_string();
        let b = rank_teams(&[
            TeamRecord::new("@SCRIPT@", 10.0, 1),
            TeamRecord::new("{% raw %}", 9.0, 1),
        ]);
        let page = render_leaderboard(&b, &s).unwrap();
        assert!(page.contains("<title>Round {{ title }} @DATA@</title>"));
        let js = embedded_data(&page);
        assert_eq!(js["groups"][0]["teams"][0]["name"], "@SCRIPT@");
        assert_eq!(js["groups"][1]["teams"][0]["name"], "{% raw %}");
        assert_eq!(js["title"], "Round {{ title }} @DATA@");
    }
}
