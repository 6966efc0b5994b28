pub mod memory;

pub use memory::TextDocument;

/// Observer invoked with the new plain text after each content-changing
/// mutation.
pub type ChangeListener = Box<dyn Fn(&str) + Send + Sync>;

/// The minimal contract the session core requires from a rich-text engine.
///
/// Mutations must be synchronous and atomic from the caller's perspective:
/// one `append_text`/`clear` that changes content produces exactly one
/// change notification. The reveal sequencer calls `append_text` once per
/// character at ~30ms intervals, so implementations keep the mutation path
/// cheap.
pub trait DocumentAdapter: Send + Sync {
    /// Current document content with control characters stripped
    /// (newlines are kept).
    fn plain_text(&self) -> String;

    /// Insert `text` immediately before the document's trailing boundary.
    /// Appending an empty string is a no-op and produces no notification.
    fn append_text(&self, text: &str);

    /// Remove all content. No notification when the document was already
    /// empty.
    fn clear(&self);

    /// Move the selection to the document end. The only cursor side effect
    /// performed outside direct user typing.
    fn move_cursor_to_end(&self);

    /// Register a change observer.
    fn on_change(&self, listener: ChangeListener);
}
