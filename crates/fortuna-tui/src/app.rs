use ratatui::layout::Rect;
use fortuna_core::{ChatSession, Provider};
use crate::ui::transcript_lines;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub session: ChatSession,
    pub provider: Provider,

    // Landing page scroll state
    pub page_scroll: u16,
    pub page_height: u16,
    pub total_page_lines: u16,

    // Chat panel state
    pub chat_scroll: u16,
    pub chat_height: u16, // Inner height of the transcript area
    pub chat_width: u16,  // Inner width of the transcript area, for wrap calculations
    pub stick_to_bottom: bool, // Re-pin the scroll to the newest line on the next render

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Areas for mouse hit-testing (updated during render)
    pub page_area: Option<Rect>,
    pub chat_area: Option<Rect>,
    pub toggle_area: Option<Rect>,
    pub send_area: Option<Rect>,
}

impl App {
    pub fn new(session: ChatSession, provider: Provider) -> Self {
        Self {
            should_quit: false,
            session,
            provider,

            page_scroll: 0,
            page_height: 0,
            total_page_lines: 0,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            stick_to_bottom: false,

            animation_frame: 0,

            page_area: None,
            chat_area: None,
            toggle_area: None,
            send_area: None,
        }
    }

    /// Detach from any outstanding dispatch and stop the main loop
    pub fn quit(&mut self) {
        self.session.teardown();
        self.should_quit = true;
    }

    pub fn tick_animation(&mut self) {
        if self.session.is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn toggle_chat(&mut self) {
        self.session.toggle_panel();
        if self.session.is_panel_open() {
            self.scroll_chat_to_bottom();
        }
    }

    pub fn close_chat(&mut self) {
        self.session.close_panel();
    }

    /// Scroll to the newest message whenever the transcript has grown
    pub fn follow_transcript(&mut self) {
        if self.session.take_scroll_request() {
            self.scroll_chat_to_bottom();
        }
    }

    /// Lines the transcript occupies at the current chat width
    pub fn chat_line_count(&self) -> u16 {
        // Default to 50 columns before the first render
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        transcript_lines(self, wrap_width).len().min(u16::MAX as usize) as u16
    }

    pub fn max_chat_scroll(&self) -> u16 {
        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        self.chat_line_count().saturating_sub(visible_height)
    }

    /// Pin to the newest line; the next render re-pins with the real panel size
    pub fn scroll_chat_to_bottom(&mut self) {
        self.chat_scroll = self.max_chat_scroll();
        self.stick_to_bottom = true;
    }

    pub fn chat_scroll_up(&mut self, lines: u16) {
        self.stick_to_bottom = false;
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn chat_scroll_down(&mut self, lines: u16) {
        self.stick_to_bottom = false;
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(self.max_chat_scroll());
    }

    pub fn page_scroll_up(&mut self, lines: u16) {
        self.page_scroll = self.page_scroll.saturating_sub(lines);
    }

    pub fn page_scroll_down(&mut self, lines: u16) {
        let max_scroll = self.total_page_lines.saturating_sub(self.page_height.max(1));
        self.page_scroll = self.page_scroll.saturating_add(lines).min(max_scroll);
    }

    pub fn page_top(&mut self) {
        self.page_scroll = 0;
    }

    pub fn page_bottom(&mut self) {
        self.page_scroll = self.total_page_lines.saturating_sub(self.page_height.max(1));
    }
}
