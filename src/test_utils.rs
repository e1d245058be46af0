//! Scripted text sources for tests

use std::sync::Mutex;

use flume::Receiver;

use crate::source::{ExtractError, TextSource};
use crate::types::TextFragment;

/// Build a fragment with the usual test defaults
#[must_use]
pub fn fragment(text: &str, page: usize, x: f32, y: f32, width: f32, height: f32) -> TextFragment {
    TextFragment {
        text: text.to_string(),
        page_number: page,
        origin_x: x,
        origin_y: y,
        width,
        height,
    }
}

enum PageScript {
    Fragments(Vec<TextFragment>),
    PageBroken(String),
    DocumentBroken(String),
}

/// In-memory `TextSource` built from scripted pages.
///
/// Pages are appended in order with the builder methods; every
/// extraction call is recorded so tests can assert which pages were
/// touched. An optional gate makes each extraction block until the
/// test releases it (or drops the sender), which is how slow
/// extraction is simulated.
pub struct FakeTextSource {
    pages: Vec<PageScript>,
    height: f32,
    gate: Option<Receiver<()>>,
    extraction_log: Mutex<Vec<usize>>,
}

impl FakeTextSource {
    #[must_use]
    pub fn new(height: f32) -> Self {
        Self {
            pages: Vec::new(),
            height,
            gate: None,
            extraction_log: Mutex::new(Vec::new()),
        }
    }

    /// Append a page with the given fragments
    #[must_use]
    pub fn page(mut self, fragments: Vec<TextFragment>) -> Self {
        self.pages.push(PageScript::Fragments(fragments));
        self
    }

    /// Append a page whose extraction fails (non-fatal)
    #[must_use]
    pub fn failing_page(mut self, detail: &str) -> Self {
        self.pages.push(PageScript::PageBroken(detail.to_string()));
        self
    }

    /// Append a page whose extraction reports the whole document broken
    #[must_use]
    pub fn broken_document(mut self, detail: &str) -> Self {
        self.pages
            .push(PageScript::DocumentBroken(detail.to_string()));
        self
    }

    /// Gate every extraction call on a ticket from the returned sender.
    ///
    /// Dropping the sender releases all further extractions.
    #[must_use]
    pub fn gated(mut self) -> (Self, flume::Sender<()>) {
        let (tx, rx) = flume::unbounded();
        self.gate = Some(rx);
        (self, tx)
    }

    /// Total number of extraction calls made so far
    #[must_use]
    pub fn extraction_count(&self) -> usize {
        self.extraction_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Pages extracted so far, in call order
    #[must_use]
    pub fn extracted_pages(&self) -> Vec<usize> {
        self.extraction_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl TextSource for FakeTextSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_height(&self, _page: usize) -> Result<f32, ExtractError> {
        Ok(self.height)
    }

    fn text_fragments(&self, page: usize) -> Result<Vec<TextFragment>, ExtractError> {
        if let Some(gate) = &self.gate {
            // A closed gate (sender dropped) releases the call
            let _ = gate.recv();
        }

        self.extraction_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(page);

        match self.pages.get(page.wrapping_sub(1)) {
            Some(PageScript::Fragments(fragments)) => Ok(fragments.clone()),
            Some(PageScript::PageBroken(detail)) => Err(ExtractError::PageUnreadable {
                page,
                detail: detail.clone(),
            }),
            Some(PageScript::DocumentBroken(detail)) => Err(ExtractError::DocumentUnreadable {
                detail: detail.clone(),
            }),
            None => Err(ExtractError::PageUnreadable {
                page,
                detail: "page out of range".to_string(),
            }),
        }
    }
}
