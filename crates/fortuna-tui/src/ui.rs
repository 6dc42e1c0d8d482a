use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthChar;
use fortuna_core::persona::COMPANY_NAME;
use fortuna_core::ChatRole;
use crate::app::App;
use crate::content::{
    AI_WORKFLOW_BODY, AI_WORKFLOW_EYEBROW, AI_WORKFLOW_FEATURES, AI_WORKFLOW_NODES,
    AI_WORKFLOW_TITLE, CONTACT_BODY, CONTACT_HEADING, HERO_CALL_TO_ACTION, HERO_TAGLINE,
    HERO_TITLE, PROCESS, SERVICES, SHOWCASE_BODY, SHOWCASE_CARDS, SHOWCASE_EYEBROW,
    SHOWCASE_TITLE,
};

const ACCENT: Color = Color::Cyan;

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Collapse a run of styled characters into spans, one per style change
fn styled_line(chars: Vec<(char, Style)>) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut style = Style::default();

    for (c, char_style) in chars {
        if char_style != style && !text.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut text), style));
        }
        style = char_style;
        text.push(c);
    }
    if !text.is_empty() {
        spans.push(Span::styled(text, style));
    }

    Line::from(spans)
}

/// Wrap a styled line to `width` display columns.
/// Breaks at whitespace; a word wider than the line is split across lines.
pub(crate) fn wrap_line(line: &Line<'_>, width: usize) -> Vec<Line<'static>> {
    let chars: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |c| (c, span.style)))
        .collect();

    if width == 0 {
        return vec![styled_line(chars)];
    }

    let mut lines = Vec::new();
    let mut current: Vec<(char, Style)> = Vec::new();
    let mut current_width = 0;

    for word in chars.split(|(c, _)| c.is_whitespace()).filter(|w| !w.is_empty()) {
        let word_width: usize = word.iter().map(|(c, _)| char_width(*c)).sum();

        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push((' ', Style::default()));
            current.extend_from_slice(word);
            current_width += 1 + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(styled_line(std::mem::take(&mut current)));
            current_width = 0;
        }

        for &(c, style) in word {
            let c_width = char_width(c);
            if current_width > 0 && current_width + c_width > width {
                lines.push(styled_line(std::mem::take(&mut current)));
                current_width = 0;
            }
            current.push((c, style));
            current_width += c_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(styled_line(current));
    }

    lines
}

/// Wrap plain text to `width` display columns, returning one string per line
pub(crate) fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    wrap_line(&Line::from(Span::raw(text)), width)
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
        .collect()
}

/// Render `**bold**` runs; everything else is literal
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'*') {
            chars.next();

            if !current_text.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_text)));
            }

            let mut bold_text = String::new();
            let mut found_close = false;

            while let Some(c) = chars.next() {
                if c == '*' && chars.peek() == Some(&'*') {
                    chars.next();
                    found_close = true;
                    break;
                }
                bold_text.push(c);
            }

            if found_close && !bold_text.is_empty() {
                spans.push(Span::styled(
                    bold_text,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                // No closing **, treat as literal
                current_text.push_str("**");
                current_text.push_str(&bold_text);
            }
        } else {
            current_text.push(c);
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::raw(current_text));
    }

    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

fn push_wrapped(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    width: usize,
    indent: usize,
    style: Style,
) {
    let pad = " ".repeat(indent);
    for wrapped in wrap_text_to_width(text, width.saturating_sub(indent)) {
        lines.push(Line::from(Span::styled(format!("{}{}", pad, wrapped), style)));
    }
}

fn push_heading(lines: &mut Vec<Line<'static>>, label: &str, width: usize) {
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        label.to_uppercase(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "─".repeat(width.min(60)),
        Style::default().fg(Color::DarkGray),
    )));
}

/// The landing page, pre-wrapped so the line count is exact for scrolling
fn page_lines(width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let body = Style::default().fg(Color::Gray);
    let muted = Style::default().fg(Color::DarkGray);

    // Hero
    lines.push(Line::default());
    let title = Style::default().fg(Color::White).bold();
    for wrapped in wrap_text_to_width(HERO_TITLE, width) {
        lines.push(Line::from(Span::styled(wrapped, title)).centered());
    }
    lines.push(Line::default());
    for tagline in HERO_TAGLINE {
        for wrapped in wrap_text_to_width(tagline, width) {
            lines.push(Line::from(Span::styled(wrapped, body)).centered());
        }
    }
    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled(HERO_CALL_TO_ACTION, Style::default().fg(ACCENT))).centered(),
    );

    // Services
    push_heading(&mut lines, "Services", width);
    for category in SERVICES {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(format!("{}  ", category.id), Style::default().fg(ACCENT)),
            Span::styled(category.title, Style::default().fg(Color::White).bold()),
        ]));
        push_wrapped(&mut lines, category.description, width, 4, body);
        for sub in category.sub_services {
            lines.push(Line::from(vec![
                Span::styled("    • ", Style::default().fg(ACCENT)),
                Span::styled(sub.name, Style::default().fg(Color::White)),
            ]));
            push_wrapped(&mut lines, sub.detail, width, 6, muted);
        }
    }

    // SaaS showcase
    push_heading(&mut lines, SHOWCASE_EYEBROW, width);
    lines.push(Line::default());
    push_wrapped(&mut lines, SHOWCASE_TITLE, width, 0, title);
    push_wrapped(&mut lines, SHOWCASE_BODY, width, 0, body);
    for card in SHOWCASE_CARDS {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("  ▪ ", Style::default().fg(ACCENT)),
            Span::styled(card.title, Style::default().fg(Color::White).bold()),
        ]));
        push_wrapped(&mut lines, card.detail, width, 4, muted);
    }

    // AI workflow
    push_heading(&mut lines, AI_WORKFLOW_EYEBROW, width);
    lines.push(Line::default());
    for heading in AI_WORKFLOW_TITLE {
        push_wrapped(&mut lines, heading, width, 0, title);
    }
    push_wrapped(&mut lines, AI_WORKFLOW_BODY, width, 0, body);
    lines.push(Line::default());
    for feature in AI_WORKFLOW_FEATURES {
        lines.push(Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(Color::Green)),
            Span::styled(*feature, body),
        ]));
    }
    lines.push(Line::default());
    push_wrapped(&mut lines, &AI_WORKFLOW_NODES.join(" → "), width, 2, muted);

    // Process
    push_heading(&mut lines, "Our Process", width);
    for step in PROCESS {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(format!("{}  ", step.num), Style::default().fg(ACCENT)),
            Span::styled(step.title, Style::default().fg(Color::White).bold()),
        ]));
        push_wrapped(&mut lines, step.desc, width, 4, body);
    }

    // Contact
    push_heading(&mut lines, CONTACT_HEADING, width);
    push_wrapped(&mut lines, CONTACT_BODY, width, 0, body);

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(format!("© {}", COMPANY_NAME), muted)).centered());

    lines
}

/// The conversation as drawn in the chat panel, wrapped to `width`
pub(crate) fn transcript_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for msg in app.session.transcript().iter() {
        let label_color = match msg.role {
            ChatRole::Visitor => ACCENT,
            ChatRole::Assistant => Color::Yellow,
        };
        lines.push(Line::from(Span::styled(
            format!("{}:", msg.role.label()),
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        )));

        for line in msg.content.lines() {
            let line = match msg.role {
                ChatRole::Visitor => Line::from(line.to_string()),
                ChatRole::Assistant => parse_markdown_line(line),
            };
            lines.extend(wrap_line(&line, width));
        }
        lines.push(Line::default());
    }

    if app.session.is_pending() {
        lines.push(Line::from(Span::styled(
            format!("{}:", ChatRole::Assistant.label()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_page(app, frame, body_area);

    if app.session.is_panel_open() {
        app.toggle_area = None;
        render_chat_panel(app, frame, body_area);
    } else {
        app.chat_area = None;
        app.send_area = None;
        render_chat_toggle(app, frame, body_area);
    }

    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let status = if app.session.is_pending() {
        " [assistant typing]"
    } else {
        ""
    };

    let title = Line::from(vec![
        Span::styled(format!(" {} ", COMPANY_NAME), Style::default().fg(ACCENT).bold()),
        Span::styled(status, Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let chat_open = app.session.is_panel_open();

    let mode_style = if chat_open {
        Style::default().bg(Color::Yellow).fg(Color::Black)
    } else {
        Style::default().bg(Color::Blue).fg(Color::White)
    };
    let mode_text = if chat_open { " CHAT " } else { " PAGE " };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints: &[(&str, &str)] = if chat_open {
        &[("Enter", "send"), ("Esc", "close"), ("PgUp/PgDn", "scroll"), ("^C", "quit")]
    } else {
        &[("c", "chat"), ("j/k", "scroll"), ("g/G", "top/bottom"), ("q", "quit")]
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_page(app: &mut App, frame: &mut Frame, area: Rect) {
    app.page_area = Some(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let lines = page_lines(inner.width.saturating_sub(2) as usize);
    app.page_height = inner.height;
    app.total_page_lines = lines.len().min(u16::MAX as usize) as u16;

    // Keep scroll valid after a resize
    let max_scroll = app.total_page_lines.saturating_sub(app.page_height.max(1));
    app.page_scroll = app.page_scroll.min(max_scroll);

    let page = Paragraph::new(Text::from(lines))
        .block(block)
        .scroll((app.page_scroll, 0));

    frame.render_widget(page, area);
}

/// Floating button in the bottom-right corner while the panel is closed
fn render_chat_toggle(app: &mut App, frame: &mut Frame, area: Rect) {
    let label = " [c] Chat with us ";
    let width = (label.chars().count() as u16 + 2).min(area.width);
    let height = 3.min(area.height);

    let toggle_area = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    );
    app.toggle_area = Some(toggle_area);

    frame.render_widget(Clear, toggle_area);
    let button = Paragraph::new(Span::styled(label, Style::default().fg(ACCENT).bold()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        );
    frame.render_widget(button, toggle_area);
}

fn render_chat_panel(app: &mut App, frame: &mut Frame, area: Rect) {
    let popup_width = 64.min(area.width.saturating_sub(2));
    let popup_height = 26.min(area.height.saturating_sub(1));

    let popup_area = Rect::new(
        area.x + area.width.saturating_sub(popup_width + 1),
        area.y + area.height.saturating_sub(popup_height + 1),
        popup_width,
        popup_height,
    );
    app.chat_area = Some(popup_area);

    // Clear the page behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            format!(" {} Assistant ", COMPANY_NAME),
            Style::default().fg(Color::White).bold(),
        ))
        .title_bottom(Line::from(Span::styled(
            format!(" {}: {} ", app.provider.as_str(), app.session.model()),
            Style::default().fg(Color::DarkGray),
        )));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [transcript_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(inner);

    // Store transcript dimensions for scroll calculations
    app.chat_height = transcript_area.height;
    app.chat_width = transcript_area.width;

    let lines = transcript_lines(app, transcript_area.width as usize);
    let max_scroll = (lines.len().min(u16::MAX as usize) as u16)
        .saturating_sub(transcript_area.height.max(1));
    app.chat_scroll = if app.stick_to_bottom {
        max_scroll
    } else {
        app.chat_scroll.min(max_scroll)
    };

    // Lines are pre-wrapped so the scroll range matches what is drawn
    let transcript = Paragraph::new(Text::from(lines)).scroll((app.chat_scroll, 0));
    frame.render_widget(transcript, transcript_area);

    render_composer(app, frame, input_area);
}

fn render_composer(app: &mut App, frame: &mut Frame, area: Rect) {
    let pending = app.session.is_pending();
    let border_color = if pending { Color::DarkGray } else { Color::Yellow };
    let send_style = if pending {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(ACCENT).bold()
    };

    let send_label = "[Send]";
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(if pending { " Waiting for reply... " } else { " Message " })
        .title_top(Line::from(Span::styled(send_label, send_style)).right_aligned());

    // The label sits on the top border, one cell in from the right corner
    let send_width = (send_label.len() as u16).min(area.width.saturating_sub(2));
    app.send_area = Some(Rect::new(
        area.right().saturating_sub(send_width + 1),
        area.y,
        send_width,
        1,
    ));

    let composer = app.session.composer();
    let inner_width = area.width.saturating_sub(2) as usize;
    let (visible_text, cursor_x) = visible_input(composer.text(), composer.cursor(), inner_width);

    let input = if composer.text().is_empty() {
        Paragraph::new(Span::styled(
            "Ask about our solutions...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(visible_text).style(Style::default().fg(ACCENT))
    };

    frame.render_widget(input.block(input_block), area);
    frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
}

/// Horizontal scroll for the composer, in display columns: the slice of
/// `text` that fits in `width` with the cursor kept in view, and the
/// cursor's column within that slice.
fn visible_input(text: &str, cursor: usize, width: usize) -> (String, u16) {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    if width == 0 {
        return (String::new(), 0);
    }

    // Leave one column for the cursor after the last character
    let mut start = cursor;
    let mut before_cursor = 0;
    while start > 0 {
        let c_width = char_width(chars[start - 1]);
        if before_cursor + c_width > width - 1 {
            break;
        }
        before_cursor += c_width;
        start -= 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for &c in &chars[start..] {
        let c_width = char_width(c);
        if used + c_width > width {
            break;
        }
        visible.push(c);
        used += c_width;
    }

    (visible, before_cursor as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handle_event;
    use crate::test_support::{test_app, Scripted};
    use crate::tui::AppEvent;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_wrap_respects_word_boundaries() {
        let lines = wrap_text_to_width("We build low-code apps fast", 10);
        assert_eq!(lines, vec!["We build", "low-code", "apps fast"]);
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        let lines = wrap_text_to_width("supercalifragilistic ok", 5);
        assert_eq!(lines, vec!["super", "calif", "ragil", "istic", "ok"]);
    }

    #[test]
    fn test_wrap_counts_display_columns() {
        // Each of these characters is two columns wide
        let lines = wrap_text_to_width("日本語テキスト", 5);
        assert_eq!(lines, vec!["日本", "語テ", "キス", "ト"]);
    }

    #[test]
    fn test_wrap_line_keeps_span_styles() {
        let line = parse_markdown_line("Fast **delivery** always");
        let wrapped = wrap_line(&line, 13);

        assert_eq!(wrapped.len(), 2);
        let bold = &wrapped[0].spans[1];
        assert_eq!(bold.content, "delivery");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(wrapped[1].spans[0].content, "always");
    }

    #[test]
    fn test_wrap_empty_yields_single_blank_line() {
        assert_eq!(wrap_text_to_width("", 10), vec![String::new()]);
        assert_eq!(wrap_text_to_width("abc", 0), vec!["abc".to_string()]);
    }

    #[test]
    fn test_markdown_bold_runs() {
        let line = parse_markdown_line("We offer **speed** and cost savings");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "speed");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_markdown_unclosed_bold_is_literal() {
        let line = parse_markdown_line("**unfinished");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "**unfinished");
    }

    #[test]
    fn test_page_lines_include_every_service() {
        let text: String = page_lines(80)
            .iter()
            .flat_map(|line| line.spans.iter().map(|s| s.content.to_string()))
            .collect();
        for category in SERVICES {
            assert!(text.contains(category.title));
        }
        assert!(text.contains(HERO_TITLE));

        assert!(text.contains(SHOWCASE_TITLE));
        for card in SHOWCASE_CARDS {
            assert!(text.contains(card.title));
        }
        for heading in AI_WORKFLOW_TITLE {
            assert!(text.contains(heading));
        }
        for feature in AI_WORKFLOW_FEATURES {
            assert!(text.contains(feature));
        }
    }

    #[test]
    fn test_visible_input_scrolls_by_display_width() {
        let text = "价格是多少";
        let (visible, cursor_x) = visible_input(text, 5, 6);

        // Two wide characters fit before the cursor's own column
        assert_eq!(visible, "多少");
        assert_eq!(cursor_x, 4);

        let (visible, cursor_x) = visible_input("hello", 2, 10);
        assert_eq!(visible, "hello");
        assert_eq!(cursor_x, 2);
    }

    #[tokio::test]
    async fn test_long_token_reply_scrolls_fully_into_view() {
        let reply = format!("See https://fortuna.example/{} ENDMARK", "x".repeat(1500));
        let (mut app, mut rx) = test_app(Scripted::replying(reply));
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        press(&mut app, KeyCode::Char('c'));
        terminal.draw(|frame| render(&mut app, frame)).unwrap();

        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Enter);
        let outcome = rx.recv().await.unwrap();
        handle_event(&mut app, AppEvent::Dispatch(outcome));
        terminal.draw(|frame| render(&mut app, frame)).unwrap();

        assert!(screen_text(&terminal).contains("ENDMARK"));
        assert_eq!(app.chat_scroll, app.max_chat_scroll());

        // Scrolling down past the end stays on the tail
        press(&mut app, KeyCode::PageDown);
        terminal.draw(|frame| render(&mut app, frame)).unwrap();
        assert!(screen_text(&terminal).contains("ENDMARK"));
    }

    #[tokio::test]
    async fn test_send_label_is_drawn_on_composer_border() {
        let (mut app, _rx) = test_app(Scripted::offline());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        press(&mut app, KeyCode::Char('c'));
        terminal.draw(|frame| render(&mut app, frame)).unwrap();

        let send = app.send_area.unwrap();
        let buffer = terminal.backend().buffer();
        let label: String = (send.x..send.right())
            .map(|x| buffer[(x, send.y)].symbol().to_string())
            .collect();
        assert_eq!(label, "[Send]");
    }
}
