// TUI application state
//
// Wraps the SentimentAnalyzer with view-only state: cursor, focus, scroll,
// theme, toast, spinner and session statistics. Key handling lives here so
// it can be tested without a terminal; the event loop only dispatches the
// requests it returns.

use super::clipboard::copy_to_clipboard;
use super::components::Toast;
use super::input::{Edit, TextInput};
use super::theme::{Theme, ThemeKind};
use crate::analyzer::{AnalysisRequest, AnalysisResult, SentimentAnalyzer, Settle};
use crate::config::Config;
use crate::events::AnalysisEvent;
use crate::logging::LogBuffer;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Lines moved by PgUp/PgDn in the result panel
const PAGE_SCROLL: u16 = 10;

/// Which control receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Button,
    Result,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Button,
            Focus::Button => Focus::Result,
            Focus::Result => Focus::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Result,
            Focus::Button => Focus::Input,
            Focus::Result => Focus::Button,
        }
    }
}

/// Per-session request counters for the status bar
#[derive(Debug, Default, Clone)]
pub struct Stats {
    pub requests: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub discarded: usize,
    pub total_latency: Duration,
    pub last_latency: Option<Duration>,
}

impl Stats {
    fn record(&mut self, result: &AnalysisResult, elapsed: Duration) {
        if result.is_failure() {
            self.failed += 1;
        } else {
            self.succeeded += 1;
        }
        self.total_latency += elapsed;
        self.last_latency = Some(elapsed);
    }

    /// Mean time to settle across all settled requests
    pub fn avg_latency(&self) -> Duration {
        let settled = (self.succeeded + self.failed) as u32;
        if settled == 0 {
            return Duration::ZERO;
        }
        self.total_latency / settled
    }
}

pub struct App {
    pub analyzer: SentimentAnalyzer,
    pub input: TextInput,
    pub focus: Focus,
    pub theme_kind: ThemeKind,
    pub theme: Theme,
    pub toast: Option<Toast>,
    /// First visible line of the result JSON
    pub result_scroll: u16,
    pub log_buffer: LogBuffer,
    pub stats: Stats,
    pub endpoint: String,
    pub start_time: Instant,
    pub should_quit: bool,
    spinner_frame: usize,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using Dark", config.theme);
            ThemeKind::Dark
        });

        Self {
            analyzer: SentimentAnalyzer::new(config.analysis.response_policy),
            input: TextInput::default(),
            focus: Focus::default(),
            theme_kind,
            theme: theme_kind.theme(),
            toast: None,
            result_scroll: 0,
            log_buffer,
            stats: Stats::default(),
            endpoint: config.endpoint.clone(),
            start_time: Instant::now(),
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// Handle one key; returns a request when an analysis was triggered
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AnalysisRequest> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        // Ctrl+Alt is AltGr text on Windows, not a shortcut
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('y') if ctrl => {
                self.copy_result();
                return None;
            }
            KeyCode::Char('t') if ctrl => {
                self.cycle_theme();
                return None;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return None;
            }
            KeyCode::Enter if self.focus != Focus::Result => {
                return Some(self.trigger_analysis());
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.edit_input(&key),
            Focus::Result => self.scroll_result(key.code),
            Focus::Button => {
                if key.code == KeyCode::Char(' ') {
                    return Some(self.trigger_analysis());
                }
            }
        }
        None
    }

    /// Handle a bracketed paste; only the input box accepts text
    pub fn handle_paste(&mut self, pasted: &str) {
        if self.focus != Focus::Input {
            return;
        }
        if let Edit::Changed(text) = self.input.paste(self.analyzer.input(), pasted) {
            self.analyzer.on_text_change(text);
        }
    }

    fn edit_input(&mut self, key: &KeyEvent) {
        if let Edit::Changed(text) = self.input.handle_key(self.analyzer.input(), key) {
            self.analyzer.on_text_change(text);
        }
    }

    fn scroll_result(&mut self, code: KeyCode) {
        let max = self.result_line_count().saturating_sub(1);
        self.result_scroll = match code {
            KeyCode::Up => self.result_scroll.saturating_sub(1),
            KeyCode::Down => self.result_scroll.saturating_add(1),
            KeyCode::PageUp => self.result_scroll.saturating_sub(PAGE_SCROLL),
            KeyCode::PageDown => self.result_scroll.saturating_add(PAGE_SCROLL),
            KeyCode::Home => 0,
            KeyCode::End => max,
            _ => self.result_scroll,
        }
        .min(max);
    }

    fn result_line_count(&self) -> u16 {
        self.analyzer
            .result()
            .map(|r| r.to_pretty_json().lines().count())
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16
    }

    fn trigger_analysis(&mut self) -> AnalysisRequest {
        let request = self.analyzer.begin_analysis();
        self.stats.requests += 1;
        tracing::debug!(
            "Analysis #{} triggered ({} in flight)",
            request.generation,
            self.analyzer.in_flight()
        );
        request
    }

    /// Apply a settled request from a background task
    pub fn on_analysis_event(&mut self, event: AnalysisEvent) {
        match event {
            AnalysisEvent::Settled {
                generation,
                result,
                elapsed,
            } => {
                self.stats.record(&result, elapsed);
                match self.analyzer.settle(generation, result) {
                    Settle::Applied => self.result_scroll = 0,
                    Settle::Discarded => self.stats.discarded += 1,
                }
                tracing::debug!("Request #{} settled in {:?}", generation, elapsed);
            }
        }
    }

    fn copy_result(&mut self) {
        let Some(result) = self.analyzer.result() else {
            self.show_toast("Nothing to copy");
            return;
        };

        match copy_to_clipboard(&result.to_pretty_json()) {
            Ok(()) => self.show_toast("Copied result to clipboard"),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.show_toast("Copy failed");
            }
        }
    }

    fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        self.show_toast(format!("Theme: {}", self.theme_kind.name()));
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Periodic tick: advance the spinner and expire the toast
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }

    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResponsePolicy;
    use serde_json::json;

    fn app() -> App {
        App::new(&Config::default(), LogBuffer::new())
    }

    fn press(app: &mut App, code: KeyCode) -> Option<AnalysisRequest> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> Option<AnalysisRequest> {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn settled(generation: u64, result: AnalysisResult) -> AnalysisEvent {
        AnalysisEvent::Settled {
            generation,
            result,
            elapsed: Duration::from_millis(20),
        }
    }

    #[test]
    fn test_typing_updates_analyzer_input() {
        let mut app = app();
        type_text(&mut app, "good movie");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.analyzer.input(), "good movi");
    }

    #[test]
    fn test_enter_triggers_with_current_text() {
        let mut app = app();
        type_text(&mut app, "I love this");

        let request = press(&mut app, KeyCode::Enter).unwrap();
        assert_eq!(request.text, "I love this");
        assert_eq!(app.analyzer.in_flight(), 1);
        assert_eq!(app.stats.requests, 1);
    }

    #[test]
    fn test_empty_input_triggers() {
        let mut app = app();
        let request = press(&mut app, KeyCode::Enter).unwrap();
        assert_eq!(request.text, "");
    }

    #[test]
    fn test_button_focus_triggers_on_enter_and_space() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Button);

        assert!(press(&mut app, KeyCode::Enter).is_some());
        assert!(press(&mut app, KeyCode::Char(' ')).is_some());
        // Space on the button does not type into the input
        assert_eq!(app.analyzer.input(), "");
    }

    #[test]
    fn test_multiline_paste_does_not_trigger() {
        let mut app = app();
        type_text(&mut app, "Great ");
        app.handle_paste("movie,\nwould watch again");

        assert_eq!(app.analyzer.input(), "Great movie,would watch again");
        assert_eq!(app.analyzer.in_flight(), 0);
        assert_eq!(app.stats.requests, 0);
    }

    #[test]
    fn test_altgr_text_reaches_input() {
        let mut app = app();
        type_text(&mut app, "user");
        for c in ['@', 'c', 't'] {
            app.handle_key(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::CONTROL | KeyModifiers::ALT,
            ));
        }

        assert_eq!(app.analyzer.input(), "user@ct");
        assert!(!app.should_quit);
        assert_eq!(app.theme_kind, ThemeKind::Dark);
    }

    #[test]
    fn test_paste_ignored_outside_input() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        app.handle_paste("hello");
        assert_eq!(app.analyzer.input(), "");
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Result);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Input);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Result);
        // Enter does nothing while the result is focused
        assert!(press(&mut app, KeyCode::Enter).is_none());
    }

    #[test]
    fn test_settled_result_is_shown() {
        let mut app = app();
        let request = press(&mut app, KeyCode::Enter).unwrap();
        assert!(app.analyzer.result().is_none());

        app.on_analysis_event(settled(
            request.generation,
            AnalysisResult::success(json!({"sentiment": "positive", "confidence": 0.95})),
        ));
        assert_eq!(app.analyzer.result().unwrap().sentiment(), Some("positive"));
        assert_eq!(app.stats.succeeded, 1);
        assert_eq!(app.analyzer.in_flight(), 0);
    }

    #[test]
    fn test_failure_counts_and_displays() {
        let mut app = app();
        let request = press(&mut app, KeyCode::Enter).unwrap();
        app.on_analysis_event(settled(request.generation, AnalysisResult::failure()));

        assert_eq!(app.stats.failed, 1);
        assert!(app.analyzer.result().unwrap().is_failure());
    }

    #[test]
    fn test_latest_only_counts_discards() {
        let mut config = Config::default();
        config.analysis.response_policy = ResponsePolicy::LatestOnly;
        let mut app = App::new(&config, LogBuffer::new());

        let first = press(&mut app, KeyCode::Enter).unwrap();
        let second = press(&mut app, KeyCode::Enter).unwrap();
        app.on_analysis_event(settled(second.generation, AnalysisResult::failure()));
        app.on_analysis_event(settled(
            first.generation,
            AnalysisResult::success(json!({"sentiment": "stale"})),
        ));

        assert_eq!(app.stats.discarded, 1);
        assert!(app.analyzer.result().unwrap().is_failure());
    }

    #[test]
    fn test_result_scroll_is_clamped() {
        let mut app = app();
        let request = press(&mut app, KeyCode::Enter).unwrap();
        app.on_analysis_event(settled(
            request.generation,
            AnalysisResult::success(json!({"sentiment": "positive", "confidence": 0.95})),
        ));
        app.focus = Focus::Result;

        // Four lines of pretty JSON
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.result_scroll, 3);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.result_scroll, 2);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.result_scroll, 0);
    }

    #[test]
    fn test_copy_without_result_shows_toast() {
        let mut app = app();
        ctrl(&mut app, 'y');
        assert_eq!(app.toast.as_ref().unwrap().message, "Nothing to copy");
    }

    #[test]
    fn test_theme_cycles() {
        let mut app = app();
        ctrl(&mut app, 't');
        assert_eq!(app.theme_kind, ThemeKind::Light);
        assert!(app.toast.is_some());
        // Ctrl+T is not typed into the input
        assert_eq!(app.analyzer.input(), "");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);

        let mut app = self::app();
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = app();
        let mut key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(app.handle_key(key).is_none());
        assert_eq!(app.analyzer.input(), "");
    }

    #[test]
    fn test_avg_latency() {
        let mut stats = Stats::default();
        assert_eq!(stats.avg_latency(), Duration::ZERO);
        stats.record(&AnalysisResult::failure(), Duration::from_millis(10));
        stats.record(&AnalysisResult::failure(), Duration::from_millis(30));
        assert_eq!(stats.avg_latency(), Duration::from_millis(20));
    }
}
