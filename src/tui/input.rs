// Single-line text editing for the input box
//
// The text itself lives in `SentimentAnalyzer`; this only tracks the cursor
// (in characters) and computes the edited text for each key. Every edit
// yields the complete new text so the caller can hand it to
// `on_text_change` unchanged.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// What a key did to the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Text changed; carries the full new text
    Changed(String),
    /// Only the cursor moved
    Moved,
    /// Not an editing key
    Ignored,
}

/// Cursor position within the input text
#[derive(Debug, Default, Clone)]
pub struct TextInput {
    /// Position in characters, 0..=char count
    cursor: usize,
}

impl TextInput {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Keep the cursor inside `text`
    pub fn clamp(&mut self, text: &str) {
        self.cursor = self.cursor.min(text.chars().count());
    }

    /// Apply an editing key to `text`
    pub fn handle_key(&mut self, text: &str, key: &KeyEvent) -> Edit {
        self.clamp(text);
        let len = text.chars().count();

        match key.code {
            KeyCode::Char(c) if is_text_input(key.modifiers) => {
                let mut new_text = text.to_string();
                new_text.insert(byte_index(text, self.cursor), c);
                self.cursor += 1;
                Edit::Changed(new_text)
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let mut new_text = text.to_string();
                new_text.remove(byte_index(text, self.cursor - 1));
                self.cursor -= 1;
                Edit::Changed(new_text)
            }
            KeyCode::Delete if self.cursor < len => {
                let mut new_text = text.to_string();
                new_text.remove(byte_index(text, self.cursor));
                Edit::Changed(new_text)
            }
            KeyCode::Left if self.cursor > 0 => {
                self.cursor -= 1;
                Edit::Moved
            }
            KeyCode::Right if self.cursor < len => {
                self.cursor += 1;
                Edit::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                Edit::Moved
            }
            KeyCode::End => {
                self.cursor = len;
                Edit::Moved
            }
            // Backspace at start, Delete at end, arrows at the edges
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Left | KeyCode::Right => Edit::Moved,
            _ => Edit::Ignored,
        }
    }

    /// Insert pasted text at the cursor
    ///
    /// Line breaks are dropped: the input is a single line, and a newline
    /// must not turn into a submit.
    pub fn paste(&mut self, text: &str, pasted: &str) -> Edit {
        self.clamp(text);
        let cleaned: String = pasted.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if cleaned.is_empty() {
            return Edit::Ignored;
        }

        let mut new_text = text.to_string();
        new_text.insert_str(byte_index(text, self.cursor), &cleaned);
        self.cursor += cleaned.chars().count();
        Edit::Changed(new_text)
    }

    /// Visible slice of `text` for a box `width` columns wide, plus the
    /// cursor's column within it. Scrolls horizontally to keep the cursor
    /// in view.
    pub fn viewport<'a>(&self, text: &'a str, width: u16) -> (&'a str, u16) {
        let width = width as usize;
        let cursor_byte = byte_index(text, self.cursor.min(text.chars().count()));
        let before = &text[..cursor_byte];

        if width == 0 {
            return ("", 0);
        }

        // Drop leading characters until the cursor fits (leave room for it)
        let mut start = 0;
        let mut before_width = before.width();
        let mut chars = before.char_indices();
        while before_width >= width {
            match chars.next() {
                Some((_, c)) => {
                    start += c.len_utf8();
                    before_width = text[start..cursor_byte].width();
                }
                None => break,
            }
        }

        (&text[start..], before_width as u16)
    }
}

/// Whether a character key with `modifiers` types text
///
/// Ctrl or Alt alone marks a shortcut. Both together is how AltGr arrives
/// on Windows (`@`, `{`, `€` on many European layouts), which is text.
fn is_text_input(modifiers: KeyModifiers) -> bool {
    let ctrl_alt = KeyModifiers::CONTROL | KeyModifiers::ALT;
    modifiers.contains(ctrl_alt) || !modifiers.intersects(ctrl_alt)
}

/// Byte offset of the `char_idx`-th character (or the end of `text`)
fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Type `keys` into `start`, returning the final text
    fn type_keys(input: &mut TextInput, start: &str, keys: &[KeyCode]) -> String {
        let mut text = start.to_string();
        for &code in keys {
            if let Edit::Changed(new_text) = input.handle_key(&text, &key(code)) {
                text = new_text;
            }
        }
        text
    }

    #[test]
    fn test_typing_appends() {
        let mut input = TextInput::default();
        let text = type_keys(
            &mut input,
            "",
            &[KeyCode::Char('h'), KeyCode::Char('i'), KeyCode::Char(' ')],
        );
        assert_eq!(text, "hi ");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_insert_in_middle_and_delete() {
        let mut input = TextInput::default();
        let text = type_keys(
            &mut input,
            "ac",
            &[KeyCode::Right, KeyCode::Char('b'), KeyCode::End, KeyCode::Backspace],
        );
        assert_eq!(text, "ab");

        let text = type_keys(&mut input, &text, &[KeyCode::Home, KeyCode::Delete]);
        assert_eq!(text, "b");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::default();
        let text = type_keys(
            &mut input,
            "日本",
            &[KeyCode::End, KeyCode::Char('語'), KeyCode::Left, KeyCode::Backspace],
        );
        assert_eq!(text, "日語");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_edges_are_noops() {
        let mut input = TextInput::default();
        assert_eq!(input.handle_key("", &key(KeyCode::Backspace)), Edit::Moved);
        assert_eq!(input.handle_key("", &key(KeyCode::Delete)), Edit::Moved);
        assert_eq!(input.handle_key("", &key(KeyCode::Left)), Edit::Moved);
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_control_chars_are_not_typed() {
        let mut input = TextInput::default();
        let ctrl_y = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key("abc", &ctrl_y), Edit::Ignored);
        assert_eq!(input.handle_key("abc", &key(KeyCode::Tab)), Edit::Ignored);

        // Shifted characters are ordinary input
        let shift_a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(input.handle_key("", &shift_a), Edit::Changed("A".into()));
    }

    #[test]
    fn test_altgr_chars_are_typed() {
        let mut input = TextInput::default();
        type_keys(&mut input, "user", &[KeyCode::End]);

        let altgr_at = KeyEvent::new(
            KeyCode::Char('@'),
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        );
        assert_eq!(
            input.handle_key("user", &altgr_at),
            Edit::Changed("user@".into())
        );

        let altgr_euro = KeyEvent::new(
            KeyCode::Char('€'),
            KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT,
        );
        assert_eq!(
            input.handle_key("user@", &altgr_euro),
            Edit::Changed("user@€".into())
        );

        // Alt alone is still a shortcut
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(input.handle_key("user@€", &alt_x), Edit::Ignored);
    }

    #[test]
    fn test_paste_inserts_at_cursor_without_newlines() {
        let mut input = TextInput::default();
        type_keys(&mut input, "ad", &[KeyCode::Right]);

        assert_eq!(
            input.paste("ad", "b\r\nc"),
            Edit::Changed("abcd".into())
        );
        assert_eq!(input.cursor(), 3);
        assert_eq!(input.paste("abcd", "\n"), Edit::Ignored);
    }

    #[test]
    fn test_cursor_clamped_after_external_change() {
        let mut input = TextInput::default();
        type_keys(&mut input, "hello", &[KeyCode::End]);
        input.clamp("hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_viewport_scrolls_to_cursor() {
        let mut input = TextInput::default();
        let text = "abcdefghij";
        type_keys(&mut input, text, &[KeyCode::End]);

        let (visible, col) = input.viewport(text, 5);
        assert_eq!(visible, "ghij");
        assert_eq!(col, 4);

        type_keys(&mut input, text, &[KeyCode::Home]);
        assert_eq!(input.viewport(text, 5), (text, 0));
    }

    #[test]
    fn test_viewport_counts_wide_chars() {
        let mut input = TextInput::default();
        type_keys(&mut input, "日本語", &[KeyCode::End]);
        // Three double-width chars = 6 columns
        assert_eq!(input.viewport("日本語", 10), ("日本語", 6));
        assert_eq!(input.viewport("日本語", 4), ("語", 2));
    }
}
