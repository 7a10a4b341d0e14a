use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use temple_core::AppInfo;
use temple_core::game::interface::LeaderboardStore;
use temple_core::game::match_state::MatchState;
use temple_core::game::runner::{MatchOutcome, MatchRunner, PersistOutcome};
use temple_ui::{Renderer, Style};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::input::{Console, DEFAULT_NAME};
use crate::terminal::TerminalView;

/// What the player picked from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    Leaderboard,
    Quit,
}

impl MenuChoice {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim() {
            "1" => Some(MenuChoice::Play),
            "2" => Some(MenuChoice::Leaderboard),
            "3" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// One run of the program: the menu loop and every match played from it.
pub struct Session<S> {
    config: AppConfig,
    store: S,
    matches_played: u64,
}

impl<S: LeaderboardStore> Session<S> {
    pub fn new(config: AppConfig, store: S) -> Self {
        Self {
            config,
            store,
            matches_played: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs the menu until the player quits or input ends.
    pub fn run<R, W, V>(
        &mut self,
        console: &mut Console<R, W>,
        view: &mut TerminalView<V>,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
        V: Write,
    {
        loop {
            let title = format!("{} v{}", AppInfo::codename().to_uppercase(), AppInfo::version());
            let menu = console.renderer().main_menu(&title);
            console.say(&menu).context("writing menu")?;

            let Some(answer) = console
                .ask("Select option (1-3): ")
                .context("reading menu choice")?
            else {
                info!(target: "temple_app::session", "input closed at menu");
                return Ok(());
            };
            match MenuChoice::parse(&answer) {
                Some(MenuChoice::Play) => {
                    self.play(console, view)?;
                    if console.is_closed() {
                        return Ok(());
                    }
                }
                Some(MenuChoice::Leaderboard) => self.show_leaderboard(console)?,
                Some(MenuChoice::Quit) => {
                    console.say("Thanks for exploring!")?;
                    return Ok(());
                }
                None => {
                    console.say_styled("Invalid choice. Please select 1, 2, or 3.", Style::Red)?
                }
            }
        }
    }

    fn next_state(&mut self, name: String) -> MatchState {
        let automated = self.config.players;
        let state = match self.config.seed {
            // Later matches in the same run step the seed so they differ.
            Some(seed) => {
                MatchState::with_seed(name, automated, seed.wrapping_add(self.matches_played))
            }
            None => MatchState::new(name, automated),
        };
        self.matches_played += 1;
        state
    }

    fn play<R, W, V>(
        &mut self,
        console: &mut Console<R, W>,
        view: &mut TerminalView<V>,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
        V: Write,
    {
        let Some(name) = console.prompt_name(DEFAULT_NAME).context("reading player name")? else {
            return Ok(());
        };
        let mut state = self.next_state(name);
        info!(
            target: "temple_app::session",
            seed = state.seed(),
            players = state.players().len(),
            "match starting"
        );
        let greeting = format!(
            "Welcome, {}! You face {} rival explorer(s). Seed: {}",
            state.players()[0].name(),
            state.players().len() - 1,
            state.seed()
        );
        console.say_styled(&greeting, Style::Cyan)?;

        let outcome = {
            let mut runner = MatchRunner::new(&mut *view, &mut *console);
            runner
                .play_match(&mut state, &mut self.store)
                .context("match engine failed")?
        };

        match outcome {
            MatchOutcome::Abandoned { round_number } => {
                if !console.is_closed() {
                    let line = format!(
                        "You left the expedition in round {round_number}. Returning to menu."
                    );
                    console.say_styled(&line, Style::Yellow)?;
                }
            }
            MatchOutcome::Completed { persistence, .. } => {
                self.report_persistence(console, persistence)?;
                self.show_leaderboard(console)?;
            }
        }
        Ok(())
    }

    fn report_persistence<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        persistence: PersistOutcome,
    ) -> Result<()> {
        match persistence {
            PersistOutcome::Recorded { rank: Some(rank) } => {
                let line = format!("Score saved to leaderboard! Rank #{rank}");
                console.say_styled(&line, Style::Green)?
            }
            PersistOutcome::Recorded { rank: None } => {
                console.say("Your score did not make the leaderboard this time.")?
            }
            PersistOutcome::NotHuman => {
                console.say("An automated explorer won; the leaderboard only keeps human winners.")?
            }
            PersistOutcome::Failed(err) => {
                console.say_styled(&format!("Error saving leaderboard: {err}"), Style::Red)?
            }
        }
        Ok(())
    }

    fn show_leaderboard<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        match self.store.load() {
            Ok(board) => {
                let table = console.renderer().leaderboard(&board);
                console.say(&table)?;
            }
            Err(err) => {
                warn!(target: "temple_app::session", error = %err, "leaderboard unreadable");
                console.say_styled(&format!("Error loading leaderboard: {err}"), Style::Red)?;
            }
        }
        Ok(())
    }
}

pub fn renderer_for(config: &AppConfig) -> Renderer {
    let theme = temple_ui::Theme::default()
        .with_color(config.display.color)
        .with_cards_per_row(config.display.cards_per_row);
    Renderer::new(theme)
}
