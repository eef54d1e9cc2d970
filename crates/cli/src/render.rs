//! Text and JSON rendering of a [`Session`].

use std::fmt::Write;

use serde::Serialize;
use tracker::{FollowStatus, Phase, Session, TableRow, Theme};

const TITLE: &str = "Github Following Tracker";
const TAGLINE: &str = "Enter a github username to get its following info.";

/// ANSI escape sequences for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    title: &'static str,
    error: &'static str,
    following: &'static str,
    not_following: &'static str,
    unknown: &'static str,
    muted: &'static str,
    reset: &'static str,
}

impl Palette {
    const PLAIN: Palette = Palette {
        title: "",
        error: "",
        following: "",
        not_following: "",
        unknown: "",
        muted: "",
        reset: "",
    };

    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Palette {
                title: "\x1b[1;97m",
                error: "\x1b[91m",
                following: "\x1b[92m",
                not_following: "\x1b[93m",
                unknown: "\x1b[2m",
                muted: "\x1b[37m",
                reset: "\x1b[0m",
            },
            Theme::Light => Palette {
                title: "\x1b[1;30m",
                error: "\x1b[31m",
                following: "\x1b[32m",
                not_following: "\x1b[33m",
                unknown: "\x1b[2m",
                muted: "\x1b[90m",
                reset: "\x1b[0m",
            },
        }
    }

    fn status(&self, status: FollowStatus) -> &'static str {
        match status {
            FollowStatus::Following => self.following,
            FollowStatus::NotFollowing => self.not_following,
            FollowStatus::Unknown => self.unknown,
        }
    }
}

/// Renders the whole screen as text.
///
/// With `color` off no escape sequences are emitted, which keeps piped output
/// and tests readable.
pub fn render(session: &Session, color: bool) -> String {
    let p = if color {
        Palette::for_theme(session.theme())
    } else {
        Palette::PLAIN
    };
    let rows = session.rows();
    let mut out = String::new();

    let _ = writeln!(out, "{}{TITLE}{}", p.title, p.reset);
    if rows.is_empty() {
        let _ = writeln!(out, "{}{TAGLINE}{}", p.muted, p.reset);
    }

    if let Some(message) = session.error_message() {
        let _ = writeln!(out, "{}{message}{}", p.error, p.reset);
    }
    match session.phase() {
        Phase::Fetching => {
            let _ = writeln!(out, "{}Loading...{}", p.muted, p.reset);
        }
        Phase::Reconciling => {
            let _ = writeln!(out, "{}Checking follow status...{}", p.muted, p.reset);
        }
        Phase::Idle => {}
    }

    if rows.is_empty() {
        return out;
    }

    let login_width = rows
        .iter()
        .map(|row| row.login.as_str().len())
        .max()
        .unwrap_or(0)
        .max("login".len());
    let status_width = FollowStatus::NotFollowing.label().len();

    let _ = writeln!(out);
    let _ = writeln!(out, "{}You are Following{}", p.title, p.reset);
    let _ = writeln!(
        out,
        "{}{:<login_width$}  {:<status_width$}  profile{}",
        p.muted, "login", "status", p.reset
    );
    for row in &rows {
        let _ = writeln!(
            out,
            "{:<login_width$}  {}{:<status_width$}{}  {}",
            row.login.as_str(),
            p.status(row.status),
            row.status.label(),
            p.reset,
            row.profile_url,
        );
    }

    let _ = writeln!(out);
    let _ = write!(
        out,
        "{}{} results · page {}",
        p.muted,
        rows.len(),
        session.current_page()
    );
    if let Some(page) = session.visible_page() {
        let _ = write!(out, " · fetched at {}", page.fetched_at);
    }
    let _ = writeln!(out, "{}", p.reset);
    out
}

/// Machine-readable view of the session.
#[derive(Debug, Serialize)]
pub struct JsonView<'a> {
    pub username: Option<&'a str>,
    pub page: u32,
    pub phase: Phase,
    pub error: Option<&'a str>,
    pub rows: Vec<TableRow>,
}

impl<'a> JsonView<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            username: session.username().map(|u| u.as_str()),
            page: session.current_page().get(),
            phase: session.phase(),
            error: session.error_message(),
            rows: session.rows(),
        }
    }
}

/// Renders the session as pretty-printed JSON.
pub fn render_json(session: &Session) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonView::new(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker::{
        Followee, FolloweeId, FolloweePage, Login, Resolutions, Timestamp, ValidationError,
    };

    fn session_with(names: &[(&str, Option<bool>)]) -> Session {
        let mut session = Session::default();
        let request = session.submit("alice").unwrap();
        let followees = names
            .iter()
            .enumerate()
            .map(|(i, (name, _))| Followee {
                id: FolloweeId::new(i as u64 + 1),
                login: Login::new(*name).unwrap(),
                avatar_url: String::new(),
                profile_url: format!("https://github.com/{name}"),
            })
            .collect();
        let page = FolloweePage {
            username: request.username.clone(),
            page: request.page,
            followees,
            fetched_at: Timestamp::now(),
        };
        let round = session.apply_fetch(request, Ok(page)).unwrap();
        let mut resolutions = Resolutions::default();
        for (name, status) in names {
            match status {
                Some(following) => resolutions.resolve(Login::new(*name).unwrap(), *following),
                None => resolutions.leave_unresolved(Login::new(*name).unwrap()),
            }
        }
        session.apply_reconcile(round.complete(resolutions));
        session
    }

    #[test]
    fn empty_session_shows_the_tagline() {
        let text = render(&Session::default(), false);
        assert!(text.contains(TITLE));
        assert!(text.contains(TAGLINE));
        assert!(!text.contains("results"));
    }

    #[test]
    fn validation_message_is_shown() {
        let mut session = Session::default();
        assert_eq!(session.submit(""), Err(ValidationError::EmptyUsername));
        assert!(render(&session, false).contains("Please enter a username"));
    }

    #[test]
    fn table_lists_rows_with_labels_and_footer() {
        let session = session_with(&[("bob", Some(true)), ("carol", Some(false)), ("dan", None)]);
        let text = render(&session, false);

        assert!(text.contains("You are Following"));
        let bob = text.lines().find(|l| l.starts_with("bob")).unwrap();
        assert!(bob.contains("Following"));
        assert!(bob.contains("https://github.com/bob"));
        assert!(text.lines().any(|l| l.starts_with("carol") && l.contains("Not Following")));
        assert!(text.lines().any(|l| l.starts_with("dan") && l.contains("Unknown")));
        assert!(text.contains("3 results · page 1"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn color_follows_the_theme() {
        let mut session = session_with(&[("bob", Some(true))]);
        assert!(render(&session, true).contains("\x1b[92m"));
        session.toggle_theme();
        assert!(render(&session, true).contains("\x1b[32m"));
    }

    #[test]
    fn json_view_carries_rows_and_status() {
        let session = session_with(&[("bob", Some(true))]);
        let json: serde_json::Value = serde_json::from_str(&render_json(&session).unwrap()).unwrap();

        assert_eq!(json["username"], "alice");
        assert_eq!(json["page"], 1);
        assert_eq!(json["phase"], "idle");
        assert_eq!(json["rows"][0]["login"], "bob");
        assert_eq!(json["rows"][0]["status"], "following");
    }
}
