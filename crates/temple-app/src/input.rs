use std::io::{self, BufRead, Write};

use temple_core::game::interface::{DecisionPrompt, HumanChoice, Pause};
use temple_core::game::snapshot::{PlayerSnapshot, TableSnapshot};
use temple_ui::{Renderer, Style};
use thiserror::Error;
use tracing::warn;

pub const MAX_NAME_LENGTH: usize = 18;
pub const NAME_ATTEMPTS: usize = 3;
pub const DEFAULT_NAME: &str = "Explorer";
const EDGE_CHARACTERS: &str = ".,!?@#$%^&*()[]{}|\\:\";'<>/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidName {
    #[error("name must be at least 1 character long")]
    Empty,
    #[error("name invalid after sanitization")]
    OnlyPunctuation,
}

/// Cleans a raw player name: whitespace runs collapse to one space, characters
/// that do not print are dropped, the result is cut to [`MAX_NAME_LENGTH`]
/// characters and edge punctuation is stripped.
pub fn sanitize_name(raw: &str) -> Result<String, InvalidName> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let printable: String = collapsed.chars().filter(|&c| is_printable(c)).collect();
    let printable = printable.trim();
    if printable.is_empty() {
        return Err(InvalidName::Empty);
    }

    // The trim above leaves a visible first character, so the cut keeps it.
    let mut name = printable.to_string();
    if name.chars().count() > MAX_NAME_LENGTH {
        name = name.chars().take(MAX_NAME_LENGTH).collect::<String>().trim_end().to_string();
    }

    let stripped = name.trim_matches(|c: char| EDGE_CHARACTERS.contains(c));
    if stripped.is_empty() {
        return Err(InvalidName::OnlyPunctuation);
    }
    Ok(stripped.to_string())
}

/// Space plus every character that is not a control, separator, format or
/// private-use code point.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    let format = matches!(
        c,
        '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{6dd}'
            | '\u{70f}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{e0001}'
            | '\u{e0020}'..='\u{e007f}'
    );
    let private_use = matches!(
        c,
        '\u{e000}'..='\u{f8ff}' | '\u{f0000}'..='\u{ffffd}' | '\u{100000}'..='\u{10fffd}'
    );
    !(c.is_control() || c.is_whitespace() || format || private_use)
}

/// Line-oriented terminal input. Once the input stream ends every further
/// request behaves as a quit.
pub struct Console<R, W> {
    input: R,
    output: W,
    renderer: Renderer,
    closed: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, renderer: Renderer) -> Self {
        Self {
            input,
            output,
            renderer,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.output.write_all(b"\n")?;
        }
        self.output.flush()
    }

    pub fn say_styled(&mut self, text: &str, style: Style) -> io::Result<()> {
        let painted = self.renderer.theme().paint(text, style);
        self.say(&painted)
    }

    /// Prints `prompt` and reads one line without its terminator. `None` means
    /// the input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.closed = true;
            self.output.write_all(b"\n")?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Asks for a name up to [`NAME_ATTEMPTS`] times. Empty input takes the
    /// default, and so does running out of attempts.
    pub fn prompt_name(&mut self, default: &str) -> io::Result<Option<String>> {
        for attempt in 1..=NAME_ATTEMPTS {
            let Some(raw) = self.ask("Enter your name: ")? else {
                return Ok(None);
            };
            let raw = raw.trim();
            let candidate = if raw.is_empty() { default } else { raw };
            match sanitize_name(candidate) {
                Ok(name) => return Ok(Some(name)),
                Err(err) => {
                    self.say_styled(&format!("Invalid name: {err}"), Style::Red)?;
                    let remaining = NAME_ATTEMPTS - attempt;
                    if remaining > 0 {
                        let retry = format!("Please try again ({remaining} attempts remaining)");
                        self.say_styled(&retry, Style::Yellow)?;
                    }
                }
            }
        }
        let fallback = format!("Too many invalid attempts. Using default name: {default}");
        self.say_styled(&fallback, Style::Yellow)?;
        Ok(Some(default.to_string()))
    }

    fn read_choice(&mut self) -> io::Result<HumanChoice> {
        loop {
            let prompt =
                "\nDo you want to (C)ontinue exploring, (L)eave the temple, or (Q)uit game? ";
            let Some(answer) = self.ask(prompt)? else {
                return Ok(HumanChoice::Quit);
            };
            match parse_choice(&answer) {
                Some(choice) => return Ok(choice),
                None => self.say("Please enter 'C' to continue, 'L' to leave, or 'Q' to quit.")?,
            }
        }
    }

    fn wait_for_enter(&mut self, prompt: &str) -> io::Result<()> {
        self.ask(prompt).map(|_| ())
    }
}

pub fn parse_choice(answer: &str) -> Option<HumanChoice> {
    match answer.trim().to_ascii_uppercase().as_str() {
        "C" | "CONTINUE" => Some(HumanChoice::Continue),
        "L" | "LEAVE" => Some(HumanChoice::Leave),
        "Q" | "QUIT" => Some(HumanChoice::Quit),
        _ => None,
    }
}

impl<R: BufRead, W: Write> DecisionPrompt for Console<R, W> {
    fn request_decision(
        &mut self,
        player: &PlayerSnapshot,
        _snapshot: &TableSnapshot,
    ) -> HumanChoice {
        let status = self.renderer.player_status(player);
        let outcome = self.say(&status).and_then(|()| self.read_choice());
        match outcome {
            Ok(choice) => choice,
            Err(err) => {
                warn!(
                    target: "temple_app::input",
                    error = %err,
                    "terminal input failed; quitting match"
                );
                self.closed = true;
                HumanChoice::Quit
            }
        }
    }

    fn pause(&mut self, pause: Pause) {
        let prompt = match pause {
            Pause::RoundStart(_) => "\nPress Enter to start exploring...".to_string(),
            Pause::BeforeDraw => "\nPress Enter to reveal the next card...".to_string(),
            Pause::CardRevealed => "\nPress Enter to continue...".to_string(),
            Pause::RoundOver(round) => {
                format!("\nRound {round} complete. Press Enter to continue...")
            }
        };
        if let Err(err) = self.wait_for_enter(&prompt) {
            warn!(target: "temple_app::input", error = %err, "terminal input failed");
            self.closed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use temple_core::model::deck::Deck;
    use temple_core::model::player::{Player, PlayerId};
    use temple_core::model::round::RoundState;
    use temple_ui::Theme;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Renderer::new(Theme::plain()),
        )
    }

    #[test]
    fn sanitize_collapses_and_strips() {
        assert_eq!(sanitize_name("  Indiana   Jones  ").unwrap(), "Indiana Jones");
        assert_eq!(sanitize_name("**Lara!**").unwrap(), "Lara");
        assert_eq!(sanitize_name("O'Brien").unwrap(), "O'Brien");
        assert_eq!(sanitize_name("Ana\u{7}Maria").unwrap(), "AnaMaria");
    }

    #[test]
    fn sanitize_drops_unprintables_after_collapsing() {
        // The bell is not whitespace, so the spaces around it are collapsed
        // separately and both survive once it is removed.
        assert_eq!(sanitize_name("Ana \u{7} Maria").unwrap(), "Ana  Maria");
        assert_eq!(sanitize_name("Zero\u{200b}Width\u{feff}").unwrap(), "ZeroWidth");
        assert_eq!(sanitize_name("\u{7} Ana").unwrap(), "Ana");
        assert_eq!(sanitize_name("\u{200b}\u{e000}"), Err(InvalidName::Empty));
    }

    #[test]
    fn sanitize_truncates_then_retrims() {
        let name = sanitize_name("Abcdefghijklmnopq rstuvwxyz").unwrap();
        assert_eq!(name, "Abcdefghijklmnopq");
        assert_eq!(name.chars().count(), 17);
        assert_eq!(
            sanitize_name("Abcdefghijklmnopqr.......").unwrap(),
            "Abcdefghijklmnopqr"
        );
    }

    #[test]
    fn sanitize_rejects_empty_results() {
        assert_eq!(sanitize_name("   "), Err(InvalidName::Empty));
        assert_eq!(sanitize_name("!?!?"), Err(InvalidName::OnlyPunctuation));
    }

    #[test]
    fn empty_name_uses_default() {
        let mut console = console("\n");
        assert_eq!(console.prompt_name("Explorer").unwrap().as_deref(), Some("Explorer"));
    }

    #[test]
    fn three_bad_names_fall_back_to_default() {
        let mut console = console("!!!\n???\n...\nNever read\n");
        assert_eq!(console.prompt_name("Explorer").unwrap().as_deref(), Some("Explorer"));
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("2 attempts remaining"));
        assert!(output.contains("Too many invalid attempts"));
    }

    #[test]
    fn name_prompt_reports_closed_input() {
        let mut console = console("");
        assert_eq!(console.prompt_name("Explorer").unwrap(), None);
        assert!(console.is_closed());
    }

    #[test]
    fn choices_accept_words_and_letters() {
        assert_eq!(parse_choice(" c "), Some(HumanChoice::Continue));
        assert_eq!(parse_choice("leave"), Some(HumanChoice::Leave));
        assert_eq!(parse_choice("Q"), Some(HumanChoice::Quit));
        assert_eq!(parse_choice("x"), None);
    }

    #[test]
    fn decision_retries_until_valid_and_quits_on_eof() {
        let mut players = vec![Player::human(PlayerId::new(0), "Ana")];
        let mut round = RoundState::new();
        round.setup_round_with_deck(Deck::standard(), &mut players);
        let snapshot = TableSnapshot::capture(&round, &players, 5);
        let me = snapshot.players[0].clone();

        let mut console = console("maybe\nL\n");
        assert_eq!(console.request_decision(&me, &snapshot), HumanChoice::Leave);
        assert_eq!(console.request_decision(&me, &snapshot), HumanChoice::Quit);
        assert!(console.is_closed());
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Ana's Status:"));
        assert!(output.contains("Please enter 'C' to continue"));
    }
}
