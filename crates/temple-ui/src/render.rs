use crate::theme::{Style, Theme};
use std::fmt::Write as _;
use temple_core::game::interface::{DecisionRecord, TableEvent};
use temple_core::game::leaderboard::Leaderboard;
use temple_core::game::snapshot::{PlayerSnapshot, TableSnapshot};
use temple_core::model::card::{Card, CardKind};
use temple_core::model::hazard::HazardTally;
use temple_core::model::player::PlayerId;
use temple_core::model::round::{CardOutcome, Decision, DepartureReport, RoundSummary};
use temple_core::model::score::FinalStandings;
use temple_core::model::treasure::TreasureKind;

pub const CARD_ART_HEIGHT: usize = 7;
const CARD_INNER_WIDTH: usize = 13;

/// Text renderer for table snapshots and match events. Every method returns the
/// finished text; printing is left to the caller.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn main_menu(&self, title: &str) -> String {
        let rule = self.theme.rule(self.theme.header_rule, 50);
        let mut out = String::new();
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{}", self.theme.paint(title, Style::Bold));
        let _ = writeln!(out, "{rule}");
        out.push_str("1. Play Game\n2. View Leaderboard\n3. Quit\n");
        out
    }

    /// Header, status bar and the cards revealed so far.
    pub fn table(&self, snapshot: &TableSnapshot) -> String {
        let theme = &self.theme;
        let mut out = String::new();
        let _ = writeln!(out, "{}", theme.header_rule());
        let title = format!(
            "TEMPLE RUN - ROUND {}/{} - TEMPLE EXPLORATION",
            snapshot.round_number, snapshot.max_rounds
        );
        let _ = writeln!(out, "{}", theme.paint(&title, Style::Bold));
        let _ = writeln!(out, "{}", theme.header_rule());

        let inside = join_names(snapshot.in_temple());
        if !inside.is_empty() {
            let _ = writeln!(out, "{}", theme.paint(&format!("In Temple: {inside}"), Style::Green));
        }
        let camp = join_names(snapshot.at_camp());
        if !camp.is_empty() {
            let _ = writeln!(out, "{}", theme.paint(&format!("At Camp: {camp}"), Style::Blue));
        }
        if let Some(hazards) = hazard_line(&snapshot.hazards) {
            let _ = writeln!(out, "{}", theme.paint(&hazards, Style::Red));
        }
        let on_path = snapshot.path_treasure();
        if on_path > 0 {
            let line = format!("Unclaimed treasure on path: {on_path}");
            let _ = writeln!(out, "{}", theme.paint(&line, Style::Yellow));
        }
        if snapshot.pending_artifacts > 0 {
            let line = format!(
                "Artifacts waiting for a lone explorer: {}",
                snapshot.pending_artifacts
            );
            let _ = writeln!(out, "{}", theme.paint(&line, Style::Cyan));
        }
        let _ = writeln!(out, "{}", theme.sub_rule());

        if snapshot.path.is_empty() {
            let line = "The temple entrance beckons... No cards revealed yet.";
            let _ = writeln!(out, "{}", theme.paint(line, Style::Cyan));
        } else {
            let _ = writeln!(out, "{}", theme.paint("CARDS REVEALED THIS ROUND:", Style::Bold));
            out.push_str(&self.card_path(&snapshot.path));
        }
        let _ = writeln!(out, "{}", theme.sub_rule());
        out
    }

    /// Cards laid side by side, `cards_per_row` at a time, with leftover
    /// treasure noted under each row.
    pub fn card_path(&self, path: &[Card]) -> String {
        let mut out = String::new();
        for (row_idx, row) in path.chunks(self.theme.cards_per_row).enumerate() {
            let arts: Vec<[String; CARD_ART_HEIGHT]> = row.iter().map(card_art).collect();
            for line in 0..CARD_ART_HEIGHT {
                let joined: Vec<&str> = arts.iter().map(|art| art[line].as_str()).collect();
                let _ = writeln!(out, "{}", joined.join("  "));
            }

            let first_number = row_idx * self.theme.cards_per_row + 1;
            let leftovers: Vec<String> = row
                .iter()
                .enumerate()
                .filter(|(_, card)| card.remaining_treasure() > 0)
                .map(|(offset, card)| {
                    format!(
                        "Card {}: {} treasure left",
                        first_number + offset,
                        card.remaining_treasure()
                    )
                })
                .collect();
            if !leftovers.is_empty() {
                let _ = writeln!(out, "  {}", leftovers.join(" | "));
            }
            out.push('\n');
        }
        out
    }

    pub fn player_status(&self, player: &PlayerSnapshot) -> String {
        let round_value = player.round_value();
        let mut out = String::new();
        let _ = writeln!(out, "{}'s Status:", player.name);
        let _ = writeln!(out, "   Round treasures: {round_value} (at risk)");
        let _ = writeln!(out, "   Safe in tent: {} points", player.tent_value());
        let _ = writeln!(out, "   Artifacts: {}", player.artifacts);
        if round_value > 0 {
            let warning = format!(
                "   You stand to lose {round_value} treasures if a second hazard appears!"
            );
            let _ = writeln!(out, "{}", self.theme.paint(&warning, Style::Yellow));
        }
        out
    }

    pub fn event(&self, event: &TableEvent, snapshot: &TableSnapshot) -> String {
        match event {
            TableEvent::RoundStarted { round_number } => {
                let mut out = String::new();
                let line = format!("ROUND {round_number} BEGINS!");
                let _ = writeln!(out, "{}", self.theme.paint(&line, Style::Bold));
                out.push_str(&self.table(snapshot));
                out
            }
            TableEvent::CardRevealed(outcome) => {
                let mut out = self.table(snapshot);
                out.push_str(&self.card_outcome(outcome, snapshot));
                out
            }
            TableEvent::DecisionsMade(records) => self.decisions(records, snapshot),
            TableEvent::Departures(report) => self.departures(report, snapshot),
            TableEvent::RoundEnded(summary) => self.round_summary(summary, snapshot),
            TableEvent::MatchFinished(standings) => self.final_standings(standings),
            TableEvent::MatchAbandoned { round_number } => {
                let line =
                    format!("Match abandoned during round {round_number}. No scores recorded.");
                format!("{}\n", self.theme.paint(&line, Style::Magenta))
            }
        }
    }

    pub fn card_outcome(&self, outcome: &CardOutcome, snapshot: &TableSnapshot) -> String {
        let theme = &self.theme;
        let mut out = String::new();
        match outcome {
            CardOutcome::TreasureShared {
                value,
                per_player,
                remainder,
                recipients,
            } => {
                let line = format!("TREASURE DISCOVERED! Value: {value}");
                let _ = writeln!(out, "{}", theme.paint(&line, Style::Yellow));
                if recipients.is_empty() {
                    let _ = writeln!(out, "Nobody is inside to claim it.");
                }
                if *per_player > 0 {
                    let line = format!("Each explorer receives {per_player} treasure(s)");
                    let _ = writeln!(out, "{}", theme.paint(&line, Style::Green));
                }
                if *remainder > 0 {
                    let line = format!("{remainder} treasure(s) left on the path");
                    let _ = writeln!(out, "{}", theme.paint(&line, Style::Yellow));
                }
            }
            CardOutcome::HazardSighted { kind } => {
                let line = format!("HAZARD ENCOUNTERED: {kind} (first one)");
                let _ = writeln!(out, "{}", theme.paint(&line, Style::Red));
            }
            CardOutcome::HazardStrike { kind, victims } => {
                let line = format!(
                    "DISASTER! SECOND {}! Temple collapses!",
                    kind.as_str().to_uppercase()
                );
                let _ = writeln!(out, "{}", theme.paint(&line, Style::Red));
                if !victims.is_empty() {
                    let names = names_for(victims, snapshot);
                    let line = format!("{names} lose their round treasures and flee!");
                    let _ = writeln!(out, "{}", theme.paint(&line, Style::Red));
                }
            }
            CardOutcome::ArtifactRevealed { pending } => {
                let line =
                    "ANCIENT ARTIFACT DISCOVERED! It will go to the next person who leaves alone.";
                let _ = writeln!(out, "{}", theme.paint(line, Style::Cyan));
                if *pending > 1 {
                    let _ = writeln!(out, "{pending} artifacts are now waiting.");
                }
            }
        }
        out
    }

    /// Automated decisions aligned by name, each with its rationale.
    pub fn decisions(&self, records: &[DecisionRecord], snapshot: &TableSnapshot) -> String {
        let automated: Vec<(&str, &DecisionRecord)> = records
            .iter()
            .filter(|record| record.rationale.is_some())
            .map(|record| (name_of(record.player, snapshot), record))
            .collect();
        if automated.is_empty() {
            return String::new();
        }

        let width = automated
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        let mut out = String::from("\nAI Decisions:\n");
        for (name, record) in automated {
            let verdict = match record.decision {
                Decision::Continue => self.theme.paint("Continue", Style::Green),
                Decision::Leave => self.theme.paint("Return to camp!", Style::Blue),
            };
            let _ = write!(out, "   {name:<width$}:  {verdict}");
            if let Some(rationale) = &record.rationale {
                let _ = write!(out, " {rationale}");
            }
            out.push('\n');
        }
        out
    }

    pub fn departures(&self, report: &DepartureReport, snapshot: &TableSnapshot) -> String {
        let theme = &self.theme;
        let mut out = String::new();
        if report.is_empty() {
            return out;
        }
        let names = names_for(&report.leavers, snapshot);
        let _ = writeln!(out, "{}", theme.paint(&format!("{names} return to camp."), Style::Blue));
        if report.path_treasure > 0 {
            let line = format!(
                "Departing explorers split {} path treasures ({} each)",
                report.path_treasure, report.share_per_leaver
            );
            let _ = writeln!(out, "{}", theme.paint(&line, Style::Green));
            if report.dropped > 0 {
                let _ = writeln!(
                    out,
                    "{} treasure(s) could not be split and are lost.",
                    report.dropped
                );
            }
        }
        if let Some((player, count)) = report.artifacts_awarded {
            let line = format!("{} gets {count} artifact(s)!", name_of(player, snapshot));
            let _ = writeln!(out, "{}", theme.paint(&line, Style::Cyan));
        }
        out
    }

    pub fn round_summary(&self, summary: &RoundSummary, snapshot: &TableSnapshot) -> String {
        let theme = &self.theme;
        let mut out = String::new();
        let line = format!(
            "Round {} over after {} card(s): {}.",
            summary.round_number, summary.cards_revealed, summary.reason
        );
        let _ = writeln!(out, "{}", theme.paint(&line, Style::Bold));
        if !summary.stranded.is_empty() {
            let names = names_for(&summary.stranded, snapshot);
            let line = format!("{names} never made it out and lose this round's treasure.");
            let _ = writeln!(out, "{}", theme.paint(&line, Style::Red));
        }
        if summary.forfeited_artifacts > 0 {
            let _ = writeln!(
                out,
                "{} unclaimed artifact(s) stay buried in the temple.",
                summary.forfeited_artifacts
            );
        }
        let _ = writeln!(out, "\nCamp totals:");
        for player in &snapshot.players {
            let _ = writeln!(
                out,
                "   {}: {} in tent, {} artifact(s)",
                player.name,
                player.tent_value(),
                player.artifacts
            );
        }
        out
    }

    pub fn final_standings(&self, standings: &FinalStandings) -> String {
        let theme = &self.theme;
        let rule = theme.rule(theme.header_rule, 60);
        let mut out = String::new();
        let _ = writeln!(out, "\n{rule}");
        let _ = writeln!(out, "{}", theme.paint("FINAL RESULTS", Style::Bold));
        let _ = writeln!(out, "{rule}");
        for standing in standings.standings() {
            let style = if standing.place == 1 {
                Style::Yellow
            } else {
                Style::White
            };
            let line = format!("{} Place: {}", ordinal(standing.place), standing.name);
            let _ = writeln!(out, "{}", theme.paint(&line, style));
            let _ = writeln!(out, "   Score: {}", standing.score);
            for kind in TreasureKind::ALL {
                let _ = writeln!(out, "   {kind}: {}", standing.tent.count(kind));
            }
            let _ = writeln!(out, "   Artifacts: {}", standing.artifacts);
            out.push('\n');
        }
        if let Some(winner) = standings.winner() {
            let line = format!("{} wins the expedition!", winner.name);
            let _ = writeln!(out, "{}", theme.paint(&line, Style::Yellow));
        }
        out
    }

    pub fn leaderboard(&self, leaderboard: &Leaderboard) -> String {
        if leaderboard.is_empty() {
            return "Leaderboard is empty.\n".to_string();
        }
        let theme = &self.theme;
        let rule = theme.rule(theme.header_rule, 50);
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", theme.paint("LEADERBOARD", Style::Bold));
        let _ = writeln!(out, "{rule}");
        for (idx, entry) in leaderboard.entries().iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>2}. {:<18} {:>4} points  {} artifact(s)",
                idx + 1,
                entry.name,
                entry.score,
                entry.artifacts
            );
        }
        out
    }
}

/// Seven lines of box art, fifteen columns wide.
pub fn card_art(card: &Card) -> [String; CARD_ART_HEIGHT] {
    let (title, middle, footer) = match card.kind() {
        CardKind::Treasure { value } => (
            "TREASURE".to_string(),
            value.to_string(),
            "* * * * *".to_string(),
        ),
        CardKind::Hazard { kind } => (
            "HAZARD".to_string(),
            "/!\\".to_string(),
            kind.as_str().to_string(),
        ),
        CardKind::Artifact => (
            "ARTIFACT".to_string(),
            "{=}".to_string(),
            "ANCIENT".to_string(),
        ),
    };
    let edge = "─".repeat(CARD_INNER_WIDTH);
    let blank = " ".repeat(CARD_INNER_WIDTH);
    [
        format!("┌{edge}┐"),
        format!("│{title:^CARD_INNER_WIDTH$}│"),
        format!("│{blank}│"),
        format!("│{middle:^CARD_INNER_WIDTH$}│"),
        format!("│{blank}│"),
        format!("│{footer:^CARD_INNER_WIDTH$}│"),
        format!("└{edge}┘"),
    ]
}

pub fn ordinal(place: usize) -> String {
    let suffix = match (place % 10, place % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{place}{suffix}")
}

fn hazard_line(hazards: &HazardTally) -> Option<String> {
    if !hazards.any_seen() {
        return None;
    }
    let seen: Vec<String> = hazards
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(kind, count)| {
            let marker = if count == 1 { "!" } else { "!!" };
            format!("{marker} {kind}: {count}")
        })
        .collect();
    Some(format!("Hazards: {}", seen.join(", ")))
}

fn join_names<'a>(players: impl Iterator<Item = &'a PlayerSnapshot>) -> String {
    players.map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")
}

fn name_of(id: PlayerId, snapshot: &TableSnapshot) -> &str {
    snapshot.player(id).map_or("Unknown explorer", |p| p.name.as_str())
}

fn names_for(ids: &[PlayerId], snapshot: &TableSnapshot) -> String {
    ids.iter()
        .map(|id| name_of(*id, snapshot))
        .collect::<Vec<_>>()
        .join(", ")
}
