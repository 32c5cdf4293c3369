//! Ordered recognizer registry and first-match dispatch.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use super::layouts::{layout_by_name, DEFAULT_LAYOUT_ORDER};
use super::{LayoutRecognizer, Result};
use crate::error::LayoutError;
use crate::models::ledger::Ledger;
use crate::pdf::StatementDocument;

/// Recognizers in priority order.
pub struct Registry {
    recognizers: Vec<Box<dyn LayoutRecognizer>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            recognizers: Vec::new(),
        }
    }

    /// All built-in layouts in their default priority order.
    pub fn standard() -> Self {
        DEFAULT_LAYOUT_ORDER
            .iter()
            .filter_map(|name| layout_by_name(name))
            .fold(Self::new(), Self::with)
    }

    /// Build a registry from layout names, keeping the given order.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut registry = Self::new();
        for name in names {
            let name = name.as_ref();
            let recognizer =
                layout_by_name(name).ok_or_else(|| LayoutError::UnknownLayout(name.to_string()))?;
            registry.push(recognizer);
        }
        Ok(registry)
    }

    /// Append a recognizer at the lowest priority.
    pub fn push(&mut self, recognizer: Box<dyn LayoutRecognizer>) {
        self.recognizers.push(recognizer);
    }

    /// Builder form of [`Registry::push`].
    pub fn with(mut self, recognizer: Box<dyn LayoutRecognizer>) -> Self {
        self.push(recognizer);
        self
    }

    /// Layout names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    /// Look up a registered recognizer by name.
    pub fn get(&self, name: &str) -> Option<&dyn LayoutRecognizer> {
        self.recognizers
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
    }

    /// Iterate recognizers in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn LayoutRecognizer> {
        self.recognizers.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Run recognizers in order and return the first non-empty ledger.
    ///
    /// Failing recognizers are logged and skipped. Returns `None` when no
    /// recognizer produced records.
    pub fn select_and_extract(
        &self,
        document: &dyn StatementDocument,
    ) -> Option<(&dyn LayoutRecognizer, Ledger)> {
        for recognizer in self.iter() {
            match run_isolated(recognizer, document) {
                Ok(ledger) if !ledger.is_empty() => {
                    info!(
                        "Layout '{}' matched with {} records",
                        recognizer.name(),
                        ledger.len()
                    );
                    return Some((recognizer, ledger));
                }
                Ok(_) => debug!("Layout '{}' found no records", recognizer.name()),
                Err(e) => warn!("Layout '{}' failed: {}", recognizer.name(), e),
            }
        }

        info!("No layout matched");
        None
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Invoke a recognizer, converting panics into [`LayoutError::Panicked`].
fn run_isolated(
    recognizer: &dyn LayoutRecognizer,
    document: &dyn StatementDocument,
) -> Result<Ledger> {
    panic::catch_unwind(AssertUnwindSafe(|| recognizer.recognize(document))).unwrap_or_else(
        |payload| {
            Err(LayoutError::Panicked {
                layout: recognizer.name().to_string(),
                message: panic_message(payload.as_ref()),
            })
        },
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
