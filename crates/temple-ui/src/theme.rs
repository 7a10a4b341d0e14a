/// Terminal styles used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Bold,
}

impl Style {
    pub const fn ansi_code(self) -> &'static str {
        match self {
            Style::Red => "\x1b[91m",
            Style::Green => "\x1b[92m",
            Style::Yellow => "\x1b[93m",
            Style::Blue => "\x1b[94m",
            Style::Magenta => "\x1b[95m",
            Style::Cyan => "\x1b[96m",
            Style::White => "\x1b[97m",
            Style::Bold => "\x1b[1m",
        }
    }
}

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub color: bool,
    pub rule_width: usize,
    pub header_rule: char,
    pub sub_rule: char,
    pub cards_per_row: usize,
}

impl Theme {
    pub fn new(name: impl Into<String>, color: bool, cards_per_row: usize) -> Self {
        Self {
            name: name.into(),
            color,
            rule_width: 80,
            header_rule: '=',
            sub_rule: '-',
            cards_per_row: cards_per_row.max(1),
        }
    }

    /// Same layout with escape codes switched off.
    pub fn plain() -> Self {
        Self::new("Plain Stone", false, 5)
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_cards_per_row(mut self, cards_per_row: usize) -> Self {
        self.cards_per_row = cards_per_row.max(1);
        self
    }

    pub fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            format!("{}{text}{RESET}", style.ansi_code())
        } else {
            text.to_string()
        }
    }

    pub fn header_rule(&self) -> String {
        self.rule(self.header_rule, self.rule_width)
    }

    pub fn sub_rule(&self) -> String {
        self.rule(self.sub_rule, self.rule_width)
    }

    pub fn rule(&self, ch: char, width: usize) -> String {
        std::iter::repeat_n(ch, width).collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("Torchlight", true, 5)
    }
}
