use std::io::Write;

use temple_core::game::interface::{TableEvent, TableView};
use temple_core::game::snapshot::TableSnapshot;
use temple_ui::Renderer;
use tracing::{Level, event, warn};

/// Prints every table event through the text renderer.
pub struct TerminalView<W> {
    out: W,
    renderer: Renderer,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, renderer: Renderer) -> Self {
        Self { out, renderer }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TableView for TerminalView<W> {
    fn render(&mut self, table_event: &TableEvent, snapshot: &TableSnapshot) {
        if tracing::enabled!(target: "temple_app::snapshot", Level::TRACE) {
            if let Ok(json) = snapshot.to_json() {
                event!(target: "temple_app::snapshot", Level::TRACE, snapshot = %json);
            }
        }

        let text = self.renderer.event(table_event, snapshot);
        if text.is_empty() {
            return;
        }
        let written = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(err) = written {
            warn!(target: "temple_app::terminal", error = %err, "failed to draw table");
        }
    }
}
