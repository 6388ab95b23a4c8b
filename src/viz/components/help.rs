use ratatui::{prelude::*, widgets::*};

fn binding(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::from(key).light_cyan().bold(),
        Span::raw(" : "),
        Span::raw(action),
    ])
}

/// Popup listing the key bindings of the app and of the selected tab
pub struct Help {
    pub selected_tab: usize,
}

impl Help {
    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            binding("  q  ", "Exit the visualizer"),
            binding("  h  ", "Toggle this help"),
            binding(" Tab ", "Switch tabs"),
        ];

        match self.selected_tab {
            0 => lines.extend([
                binding("  t  ", "Show/hide the object trail"),
                binding("  c  ", "Clear the object trail"),
            ]),
            1 => lines.push(binding("⬅ / ➡", "Switch plots")),
            2 => lines.extend([
                binding("  s  ", "Show/hide the target selector"),
                binding("  f  ", "Focus on the selected target"),
                binding("  v  ", "Toggle trace records"),
                binding("⬆ / ⬇", "Switch log target"),
                binding("⬅ / ➡", "Show one level less/more"),
                binding("- / +", "Capture one level less/more"),
                binding("PgUp ", "Page mode, scroll up"),
                binding("PgDn ", "Page mode, scroll down"),
                binding(" Esc ", "Leave page mode"),
                binding("Space", "Hide targets that are turned off"),
            ]),
            _ => {}
        }

        lines
    }
}

impl WidgetRef for Help {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();

        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(lines.len() as u16 + 4),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, center, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(64),
            Constraint::Fill(1),
        ])
        .areas(middle);

        Clear.render(center, buf);
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .padding(Padding::proportional(1))
                    .title("Help"),
            )
            .wrap(Wrap { trim: false })
            .render(center, buf);
    }
}
