//! Text state of a keyboard input session.
//!
//! `TextState` holds the preedit (text composed but not yet committed), the
//! surrounding text reported by the host text field, and the cursor offset
//! into that surrounding text. The host owns one instance per session and
//! calls the setters as it receives updates from the input method framework.
//!
//! All lengths, offsets and cursor positions are counted in characters
//! (Unicode scalar values), not bytes.

use crate::{Config, DEFAULT_MAX_SURROUNDING_TEXT_LENGTH};

/// Display hint the host uses when rendering the preedit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreeditFace {
    /// Plain underlined composition
    #[default]
    Default,
    /// Composition is being actively edited
    Active,
    /// Word engine found no candidates for the preedit
    NoCandidates,
    /// Preedit is a recognised word
    HighlightedWord,
    /// Preedit is likely misspelled
    Error,
}

/// Preedit and surrounding text of one input session.
///
/// Invariants held after every mutation:
/// - the surrounding text never exceeds `max_surrounding_len()` characters
/// - `surrounding_offset()` never exceeds the surrounding text length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextState {
    preedit: String,
    preedit_cursor_position: usize,
    surrounding: String,
    surrounding_offset: usize,
    face: PreeditFace,
    primary_candidate: String,
    restored_preedit: bool,
    max_surrounding_len: usize,
}

impl TextState {
    /// Create an empty state with the default surrounding text limit.
    pub fn new() -> Self {
        Self::with_max_surrounding_len(DEFAULT_MAX_SURROUNDING_TEXT_LENGTH)
    }

    /// Create an empty state using the limit from `config`.
    pub fn with_config(config: &Config) -> Self {
        Self::with_max_surrounding_len(config.max_surrounding_text_length)
    }

    /// Create an empty state keeping at most `max_len` characters of
    /// surrounding text.
    pub fn with_max_surrounding_len(max_len: usize) -> Self {
        Self {
            preedit: String::new(),
            preedit_cursor_position: 0,
            surrounding: String::new(),
            surrounding_offset: 0,
            face: PreeditFace::Default,
            primary_candidate: String::new(),
            restored_preedit: false,
            max_surrounding_len: max_len,
        }
    }

    /// Maximum number of surrounding characters this state retains.
    pub fn max_surrounding_len(&self) -> usize {
        self.max_surrounding_len
    }

    // ========== Preedit ==========

    /// Get the preedit text.
    pub fn preedit(&self) -> &str {
        &self.preedit
    }

    /// Get the preedit cursor position (character index).
    pub fn preedit_cursor_position(&self) -> usize {
        self.preedit_cursor_position
    }

    /// Replace the preedit and its cursor position together.
    ///
    /// The cursor is not range-checked; the caller supplies a position that
    /// matches `text`.
    pub fn set_preedit(&mut self, text: &str, cursor_position: usize) {
        self.preedit = text.to_string();
        self.preedit_cursor_position = cursor_position;
    }

    /// Insert `text` at the preedit cursor and move the cursor past it.
    pub fn append_to_preedit(&mut self, text: &str) {
        let cursor = self.preedit_cursor_position.min(self.preedit_len());
        let at = byte_index(&self.preedit, cursor);
        self.preedit.insert_str(at, text);
        self.preedit_cursor_position = cursor + text.chars().count();
    }

    /// Remove `delete_length` characters immediately before the preedit
    /// cursor. Returns true if the characters were removed.
    ///
    /// Nothing changes when `delete_length` is 0 or larger than the number
    /// of characters before the cursor.
    pub fn remove_from_preedit(&mut self, delete_length: usize) -> bool {
        let cursor = self.preedit_cursor_position.min(self.preedit_len());
        if delete_length == 0 || delete_length > cursor {
            tracing::trace!(
                delete_length,
                cursor = self.preedit_cursor_position,
                "preedit removal rejected"
            );
            return false;
        }

        let start = cursor - delete_length;
        let range = byte_index(&self.preedit, start)..byte_index(&self.preedit, cursor);
        self.preedit.replace_range(range, "");
        self.preedit_cursor_position = start;
        true
    }

    /// Empty the preedit and reset everything that describes it.
    pub fn clear_preedit(&mut self) {
        self.preedit.clear();
        self.preedit_cursor_position = 0;
        self.face = PreeditFace::Default;
        self.primary_candidate.clear();
        self.restored_preedit = false;
    }

    /// Take the preedit for committing to the host, leaving it empty.
    pub fn commit_preedit(&mut self) -> String {
        let committed = std::mem::take(&mut self.preedit);
        tracing::debug!(len = committed.chars().count(), "preedit committed");
        self.clear_preedit();
        committed
    }

    /// Get the preedit display face.
    pub fn face(&self) -> PreeditFace {
        self.face
    }

    /// Set the preedit display face.
    pub fn set_face(&mut self, face: PreeditFace) {
        self.face = face;
    }

    /// Get the best candidate for the current preedit, if the host set one.
    pub fn primary_candidate(&self) -> &str {
        &self.primary_candidate
    }

    pub fn set_primary_candidate(&mut self, candidate: &str) {
        self.primary_candidate = candidate.to_string();
    }

    /// Whether the preedit was restored from surrounding text rather than typed.
    pub fn restored_preedit(&self) -> bool {
        self.restored_preedit
    }

    pub fn set_restored_preedit(&mut self, restored: bool) {
        self.restored_preedit = restored;
    }

    // ========== Surrounding text ==========

    /// Get the surrounding text.
    pub fn surrounding(&self) -> &str {
        &self.surrounding
    }

    /// Get the cursor offset into the surrounding text (character index).
    pub fn surrounding_offset(&self) -> usize {
        self.surrounding_offset
    }

    /// Store the surrounding text, keeping only the first
    /// `max_surrounding_len()` characters.
    ///
    /// A previously stored offset is clamped to the new length.
    pub fn set_surrounding(&mut self, text: &str) {
        let kept = match text.char_indices().nth(self.max_surrounding_len) {
            Some((cut, _)) => {
                tracing::debug!(
                    len = text.chars().count(),
                    max = self.max_surrounding_len,
                    "surrounding text truncated"
                );
                &text[..cut]
            }
            None => text,
        };
        self.surrounding = kept.to_string();
        self.surrounding_offset = self.surrounding_offset.min(self.surrounding_len());
    }

    /// Store the surrounding offset, clamped to the surrounding text length.
    pub fn set_surrounding_offset(&mut self, offset: usize) {
        let len = self.surrounding_len();
        if offset > len {
            tracing::trace!(offset, len, "surrounding offset clamped");
        }
        self.surrounding_offset = offset.min(len);
    }

    /// Surrounding text before the offset.
    pub fn surrounding_left(&self) -> &str {
        let at = byte_index(&self.surrounding, self.surrounding_offset);
        &self.surrounding[..at]
    }

    /// Surrounding text from the offset to the end.
    pub fn surrounding_right(&self) -> &str {
        let at = byte_index(&self.surrounding, self.surrounding_offset);
        &self.surrounding[at..]
    }

    /// Reset all text state, keeping the configured limit.
    pub fn clear(&mut self) {
        *self = Self::with_max_surrounding_len(self.max_surrounding_len);
    }

    fn preedit_len(&self) -> usize {
        self.preedit.chars().count()
    }

    fn surrounding_len(&self) -> usize {
        self.surrounding.chars().count()
    }
}

impl Default for TextState {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of character `index` in `s`, or `s.len()` past the end.
fn byte_index(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map_or(s.len(), |(i, _)| i)
}
