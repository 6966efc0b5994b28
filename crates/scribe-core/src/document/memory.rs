use std::sync::Mutex;

use crate::document::{ChangeListener, DocumentAdapter};

/// In-memory reference implementation of [`DocumentAdapter`]: a
/// mutex-guarded string plus a cursor offset and a listener list. Stands in
/// for the rich-text engine in the CLI and in tests.
pub struct TextDocument {
    inner: Mutex<Inner>,
    listeners: Mutex<Vec<ChangeListener>>,
}

struct Inner {
    content: String,
    cursor: usize,
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDocument {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                content: String::new(),
                cursor: 0,
            }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self {
            inner: Mutex::new(Inner { content, cursor }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Cursor position in characters from the start of the document.
    pub fn cursor(&self) -> usize {
        self.inner.lock().expect("document lock poisoned").cursor
    }

    fn notify(&self, plain: &str) {
        let listeners = self.listeners.lock().expect("listener lock poisoned");
        for listener in listeners.iter() {
            listener(plain);
        }
    }
}

fn strip_control(content: &str) -> String {
    content
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect()
}

impl DocumentAdapter for TextDocument {
    fn plain_text(&self) -> String {
        let inner = self.inner.lock().expect("document lock poisoned");
        strip_control(&inner.content)
    }

    fn append_text(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        let plain = {
            let mut inner = self.inner.lock().expect("document lock poisoned");
            inner.content.push_str(text);
            strip_control(&inner.content)
        };
        // Listeners run outside the content lock so they may read the
        // document without deadlocking.
        self.notify(&plain);
    }

    fn clear(&self) {
        let plain = {
            let mut inner = self.inner.lock().expect("document lock poisoned");
            if inner.content.is_empty() {
                return;
            }
            inner.content.clear();
            inner.cursor = 0;
            String::new()
        };
        self.notify(&plain);
    }

    fn move_cursor_to_end(&self) {
        let mut inner = self.inner.lock().expect("document lock poisoned");
        inner.cursor = inner.content.chars().count();
    }

    fn on_change(&self, listener: ChangeListener) {
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .push(listener);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn append_then_read_round_trip() {
        let doc = TextDocument::new();
        doc.append_text("a");
        doc.append_text("b");
        assert_eq!(doc.plain_text(), "ab");
    }

    #[test]
    fn clear_empties_the_document() {
        let doc = TextDocument::with_content("Hello world");
        doc.clear();
        assert_eq!(doc.plain_text(), "");
    }

    #[test]
    fn plain_text_strips_control_characters() {
        let doc = TextDocument::new();
        doc.append_text("Hello\u{0007} wor\u{0000}ld\nnext");
        assert_eq!(doc.plain_text(), "Hello world\nnext");
    }

    #[test]
    fn each_content_change_notifies_once() {
        let doc = TextDocument::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        doc.on_change(Box::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        doc.append_text("a");
        doc.append_text("b");
        doc.clear();
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn empty_append_and_empty_clear_do_not_notify() {
        let doc = TextDocument::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        doc.on_change(Box::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        doc.append_text("");
        doc.clear();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn listener_receives_new_plain_text() {
        let doc = TextDocument::new();
        let last = Arc::new(Mutex::new(String::new()));
        let sink = last.clone();
        doc.on_change(Box::new(move |plain| {
            *sink.lock().unwrap() = plain.to_string();
        }));

        doc.append_text("Hello");
        doc.append_text(" world");
        assert_eq!(last.lock().unwrap().as_str(), "Hello world");
    }

    #[test]
    fn cursor_moves_to_end_on_request_only() {
        let doc = TextDocument::with_content("Hi");
        assert_eq!(doc.cursor(), 2);
        doc.append_text(" there");
        // Appending does not move the cursor by itself.
        assert_eq!(doc.cursor(), 2);
        doc.move_cursor_to_end();
        assert_eq!(doc.cursor(), 8);
    }
}
