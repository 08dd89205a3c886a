//! Parsed formulas keyed by their source text.

use crate::ast::{Expression, Parser};
use crate::error::ParseError;
use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// Bounded, thread-safe cache in front of a [`Parser`]. Stored formulas are
/// re-parsed on demand; this keeps the repeat cost to a lookup.
///
/// Failed parses are not cached.
pub struct ExpressionCache {
    parser: Parser,
    entries: Mutex<LruCache<String, Arc<Expression>>>,
}

impl ExpressionCache {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self::with_parser(capacity, Parser::default())
    }

    pub fn with_parser(capacity: usize, parser: Parser) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            parser,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, source: &str) -> Result<Arc<Expression>, ParseError> {
        if let Some(expression) = self.lock().get(source) {
            return Ok(Arc::clone(expression));
        }

        debug!("Cache miss: {}", source);
        // parse outside the lock; a concurrent miss on the same text parses twice
        let expression = Arc::new(self.parser.parse(source)?);
        self.lock().put(source.to_string(), Arc::clone(&expression));
        Ok(expression)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, Arc<Expression>>> {
        // a poisoned lock still guards a usable cache
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
