//! Interactive prompt.
//!
//! Reads one command per line from stdin and re-renders after each one. Every
//! tracker error is already reflected in the session's error banner, so the
//! loop only ends on `quit` or end of input.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};
use tracker::ports::{FollowingSource, RelationshipChecker};
use tracker::{Tracker, TrackerError};

use crate::render::{render, render_json};

const HELP: &str = "\
commands:
  user <name>   look up the accounts <name> follows (a bare name works too)
  next          next page
  prev          previous page
  theme         toggle dark/light
  help          show this help
  quit          exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Next,
    Prev,
    Theme,
    Help,
    Quit,
    Nothing,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word {
            "" => Command::Nothing,
            "user" | "u" => Command::Submit(rest.to_owned()),
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "theme" | "t" => Command::Theme,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Submit(line.to_owned()),
        }
    }
}

/// Output options shared by the shell and one-shot mode.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub color: bool,
}

impl Output {
    /// Renders the tracker's session in the selected format.
    pub fn screen<S, C>(&self, tracker: &Tracker<S, C>) -> anyhow::Result<String>
    where
        S: FollowingSource,
        C: RelationshipChecker,
    {
        if self.json {
            render_json(tracker.session()).context("failed to encode session as JSON")
        } else {
            Ok(render(tracker.session(), self.color))
        }
    }
}

/// Runs the prompt until `quit` or end of input.
pub async fn run<S, C>(tracker: &mut Tracker<S, C>, output: Output) -> anyhow::Result<()>
where
    S: FollowingSource,
    C: RelationshipChecker,
{
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    write_out(&mut stdout, &output.screen(tracker)?).await?;
    write_out(&mut stdout, "type 'help' for commands\n").await?;

    loop {
        write_out(&mut stdout, "> ").await?;
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };

        let command = Command::parse(&line);
        debug!(?command, "shell command");
        match command {
            Command::Nothing => continue,
            Command::Quit => break,
            Command::Help => {
                write_out(&mut stdout, HELP).await?;
                write_out(&mut stdout, "\n").await?;
                continue;
            }
            command => {
                if let Err(error) = execute(tracker, &command).await {
                    warn!(%error, ?command, "command failed");
                }
            }
        }

        write_out(&mut stdout, &output.screen(tracker)?).await?;
    }

    Ok(())
}

/// Applies one tracker command. The returned error is also shown in the
/// session's error banner.
async fn execute<S, C>(tracker: &mut Tracker<S, C>, command: &Command) -> Result<(), TrackerError>
where
    S: FollowingSource,
    C: RelationshipChecker,
{
    match command {
        Command::Submit(name) => tracker.submit(name).await,
        Command::Next => tracker.next_page().await.map(drop),
        Command::Prev => tracker.prev_page().await.map(drop),
        Command::Theme => {
            tracker.session_mut().toggle_theme();
            Ok(())
        }
        Command::Help | Command::Quit | Command::Nothing => Ok(()),
    }
}

async fn write_out(stdout: &mut tokio::io::Stdout, text: &str) -> anyhow::Result<()> {
    stdout
        .write_all(text.as_bytes())
        .await
        .context("failed to write to stdout")?;
    stdout.flush().await.context("failed to flush stdout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker::ports::MockGithub;
    use tracker::{FetchError, PageSize, SessionSettings, ValidationError};

    fn tracker(github: &MockGithub) -> Tracker<MockGithub, MockGithub> {
        Tracker::new(
            github.clone(),
            github.clone(),
            PageSize::DEFAULT,
            SessionSettings::default(),
        )
    }

    #[test]
    fn keywords_and_aliases() {
        assert_eq!(Command::parse("next"), Command::Next);
        assert_eq!(Command::parse(" p "), Command::Prev);
        assert_eq!(Command::parse("theme"), Command::Theme);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse("?"), Command::Help);
    }

    #[test]
    fn user_command_takes_the_rest_of_the_line() {
        assert_eq!(
            Command::parse("user   octocat "),
            Command::Submit("octocat".into())
        );
    }

    #[test]
    fn bare_user_keyword_submits_an_empty_name() {
        assert_eq!(Command::parse("user"), Command::Submit(String::new()));
    }

    #[test]
    fn anything_else_is_a_username() {
        assert_eq!(Command::parse("octocat"), Command::Submit("octocat".into()));
    }

    #[test]
    fn blank_line_does_nothing() {
        assert_eq!(Command::parse("   "), Command::Nothing);
    }

    #[tokio::test]
    async fn failed_commands_surface_their_error() {
        let github = MockGithub::new();
        github.fail_page("ghost", 1, FetchError::NotFound);
        let mut tracker = tracker(&github);

        let blank = execute(&mut tracker, &Command::Submit(String::new())).await;
        assert_eq!(
            blank,
            Err(TrackerError::Validation(ValidationError::EmptyUsername))
        );

        let missing = execute(&mut tracker, &Command::Submit("ghost".into())).await;
        assert_eq!(missing, Err(TrackerError::Fetch(FetchError::NotFound)));
        assert_eq!(tracker.session().error_message(), Some("User not found"));
    }

    #[tokio::test]
    async fn navigation_without_a_user_is_not_an_error() {
        let github = MockGithub::new();
        let mut tracker = tracker(&github);

        assert_eq!(execute(&mut tracker, &Command::Next).await, Ok(()));
        assert_eq!(execute(&mut tracker, &Command::Prev).await, Ok(()));
        assert_eq!(execute(&mut tracker, &Command::Theme).await, Ok(()));
        assert_eq!(github.call_count(), 0);
    }
}
