//! A text input that only reports changes when it loses focus.
//!
//! Propagating every keystroke to an owner that normalizes or validates the
//! value tends to fight the user mid-edit: half-typed input gets reset or
//! rewritten under the cursor. The blur input keeps a local draft while
//! focused and commits it to the owner only on blur.

pub struct BlurInput {
    draft: String,
    on_commit: Box<dyn FnMut(&str)>,
}

impl BlurInput {
    pub fn new(value: impl Into<String>, on_commit: impl FnMut(&str) + 'static) -> Self {
        Self {
            draft: value.into(),
            on_commit: Box::new(on_commit),
        }
    }

    /// The owner's value changed; the draft is replaced wholesale.
    pub fn sync_value(&mut self, value: &str) {
        self.draft = value.to_string();
    }

    /// A keystroke: only the local draft moves.
    pub fn input(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Focus left the input: the draft is committed to the owner.
    pub fn blur(&mut self) {
        (self.on_commit)(&self.draft);
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }
}
