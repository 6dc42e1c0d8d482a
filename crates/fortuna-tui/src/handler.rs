use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::App;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Dispatch(outcome) => {
            app.session.resolve(outcome);
        }
    }

    app.follow_transcript();
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.session.is_panel_open() {
        handle_chat_key(app, key);
    } else {
        handle_page_key(app, key);
    }
}

fn handle_page_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),

        // Open the chat panel
        KeyCode::Char('c') | KeyCode::Char(' ') => app.toggle_chat(),

        KeyCode::Down | KeyCode::Char('j') => app.page_scroll_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.page_scroll_up(1),
        KeyCode::PageDown => app.page_scroll_down(app.page_height.max(1)),
        KeyCode::PageUp => app.page_scroll_up(app.page_height.max(1)),
        KeyCode::Home | KeyCode::Char('g') => app.page_top(),
        KeyCode::End | KeyCode::Char('G') => app.page_bottom(),
        _ => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_chat(),
        KeyCode::Enter => {
            app.session.submit();
        }

        // Transcript scrolling
        KeyCode::Up => app.chat_scroll_up(1),
        KeyCode::Down => app.chat_scroll_down(1),
        KeyCode::PageUp => app.chat_scroll_up(app.chat_height.max(1)),
        KeyCode::PageDown => app.chat_scroll_down(app.chat_height.max(1)),

        // Line editing
        KeyCode::Backspace => app.session.composer_mut().backspace(),
        KeyCode::Delete => app.session.composer_mut().delete(),
        KeyCode::Left => app.session.composer_mut().move_left(),
        KeyCode::Right => app.session.composer_mut().move_right(),
        KeyCode::Home => app.session.composer_mut().move_home(),
        KeyCode::End => app.session.composer_mut().move_end(),
        KeyCode::Char(c) => app.session.composer_mut().insert(c),
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_chat = app.session.is_panel_open()
        && app.chat_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_page = app.page_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let on_toggle = app.toggle_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let on_send = app.session.is_panel_open()
        && app.send_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if in_chat {
                app.chat_scroll_down(3);
            } else if in_page {
                app.page_scroll_down(3);
            }
        }
        MouseEventKind::ScrollUp => {
            if in_chat {
                app.chat_scroll_up(3);
            } else if in_page {
                app.page_scroll_up(3);
            }
        }
        MouseEventKind::Down(MouseButton::Left) if on_toggle => app.toggle_chat(),
        // Same path as Enter: ignored while a reply is pending or the text is blank
        MouseEventKind::Down(MouseButton::Left) if on_send => {
            app.session.submit();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_app, Scripted};
    use fortuna_core::persona::CALL_FAILURE_FALLBACK;
    use fortuna_core::ChatRole;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn test_q_quits_only_from_page() {
        let (mut app, _rx) = test_app(Scripted::offline());

        press(&mut app, KeyCode::Char('c'));
        assert!(app.session.is_panel_open());

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.session.composer().text(), "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_enter_submits_and_outcome_is_applied() {
        let (mut app, mut rx) = test_app(Scripted::offline());

        press(&mut app, KeyCode::Char(' '));
        type_text(&mut app, "Hello");
        press(&mut app, KeyCode::Enter);

        assert!(app.session.is_pending());
        assert_eq!(app.session.composer().text(), "");

        let outcome = rx.recv().await.unwrap();
        handle_event(&mut app, AppEvent::Dispatch(outcome));

        let last = app.session.transcript().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.content, CALL_FAILURE_FALLBACK);
        assert!(!app.session.is_pending());
    }

    #[tokio::test]
    async fn test_enter_on_blank_composer_does_nothing() {
        let (mut app, _rx) = test_app(Scripted::offline());

        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(!app.session.is_pending());
        assert_eq!(app.session.transcript().len(), 1);
        assert_eq!(app.session.composer().text(), "   ");
    }

    #[tokio::test]
    async fn test_ctrl_c_tears_down_session() {
        let (mut app, mut rx) = test_app(Scripted::offline());

        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "Hi");
        press(&mut app, KeyCode::Enter);
        handle_event(
            &mut app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(app.should_quit);

        // The late outcome must not land in the transcript
        let outcome = rx.recv().await.unwrap();
        handle_event(&mut app, AppEvent::Dispatch(outcome));
        assert_eq!(app.session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_page_scroll_is_clamped() {
        let (mut app, _rx) = test_app(Scripted::offline());
        app.total_page_lines = 30;
        app.page_height = 10;

        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.page_scroll, 20);

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.page_scroll, 0);
    }

    fn click(app: &mut App, x: u16, y: u16) {
        handle_event(
            app,
            AppEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: x,
                row: y,
                modifiers: KeyModifiers::NONE,
            }),
        );
    }

    #[tokio::test]
    async fn test_send_click_submits_composer() {
        let (mut app, mut rx) = test_app(Scripted::replying("We build low-code apps."));
        press(&mut app, KeyCode::Char('c'));
        app.send_area = Some(Rect::new(50, 20, 6, 1));

        type_text(&mut app, "Pricing?");
        click(&mut app, 52, 20);

        assert!(app.session.is_pending());
        assert_eq!(app.session.composer().text(), "");
        assert_eq!(app.session.transcript().last().unwrap().content, "Pricing?");

        // A second click while pending does not dispatch again
        type_text(&mut app, "More?");
        click(&mut app, 52, 20);
        assert_eq!(app.session.composer().text(), "More?");

        let outcome = rx.recv().await.unwrap();
        handle_event(&mut app, AppEvent::Dispatch(outcome));
        let last = app.session.transcript().last().unwrap();
        assert_eq!(last.content, "We build low-code apps.");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_click_outside_send_does_not_submit() {
        let (mut app, _rx) = test_app(Scripted::offline());
        press(&mut app, KeyCode::Char('c'));
        app.send_area = Some(Rect::new(50, 20, 6, 1));

        type_text(&mut app, "Pricing?");
        click(&mut app, 49, 20);

        assert!(!app.session.is_pending());
        assert_eq!(app.session.composer().text(), "Pricing?");
    }
}
