//! Branch tables: `if/elif/else` chains and `match` statements
//!
//! Both evaluate arms lazily and in order; the first arm that applies wins.
//! A result is only obtainable through the default arm (`otherwise` or
//! `wildcard`), so every table is exhaustive.

use crate::core::Value;
use crate::errors::Result;
use crate::logging::trace;

type Arm<'a, T> = (Box<dyn FnOnce() -> Result<bool> + 'a>, Box<dyn FnOnce() -> Result<T> + 'a>);

/// Ordered `(condition, consequence)` list with a default path
pub struct Branches<'a, T> {
    arms: Vec<Arm<'a, T>>,
}

impl<'a, T> Branches<'a, T> {
    pub fn new() -> Self {
        Self { arms: Vec::new() }
    }

    /// `if cond:` / `elif cond:`
    pub fn when(
        mut self,
        cond: impl FnOnce() -> Result<bool> + 'a,
        then: impl FnOnce() -> Result<T> + 'a,
    ) -> Self {
        self.arms.push((Box::new(cond), Box::new(then)));
        self
    }

    /// `else:`; evaluates conditions until one holds
    pub fn otherwise(self, default: impl FnOnce() -> Result<T> + 'a) -> Result<T> {
        for (index, (cond, then)) in self.arms.into_iter().enumerate() {
            if cond()? {
                trace!(arm = index, "branch taken");
                return then();
            }
        }
        trace!("default branch taken");
        default()
    }
}

impl<'a, T> Default for Branches<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

enum Pattern<'a> {
    Literal(Value),
    Guard(Box<dyn Fn(&Value) -> bool + 'a>),
}

impl Pattern<'_> {
    fn matches(&self, subject: &Value) -> bool {
        match self {
            Pattern::Literal(literal) => literal == subject,
            Pattern::Guard(pred) => pred(subject),
        }
    }
}

/// `match subject:` with literal and guarded `case` arms
pub struct Match<'a, T> {
    subject: Value,
    arms: Vec<(Pattern<'a>, Box<dyn FnOnce(&Value) -> Result<T> + 'a>)>,
}

impl<'a, T> Match<'a, T> {
    pub fn on(subject: impl Into<Value>) -> Self {
        Self {
            subject: subject.into(),
            arms: Vec::new(),
        }
    }

    /// `case <literal>:`
    pub fn case(mut self, literal: impl Into<Value>, handler: impl FnOnce(&Value) -> Result<T> + 'a) -> Self {
        self.arms.push((Pattern::Literal(literal.into()), Box::new(handler)));
        self
    }

    /// `case x if pred(x):`
    pub fn case_if(
        mut self,
        pred: impl Fn(&Value) -> bool + 'a,
        handler: impl FnOnce(&Value) -> Result<T> + 'a,
    ) -> Self {
        self.arms.push((Pattern::Guard(Box::new(pred)), Box::new(handler)));
        self
    }

    /// `case _:`
    pub fn wildcard(self, handler: impl FnOnce(&Value) -> Result<T> + 'a) -> Result<T> {
        let Match { subject, arms } = self;
        for (pattern, handler) in arms {
            if pattern.matches(&subject) {
                return handler(&subject);
            }
        }
        trace!(subject = %subject.repr(), "wildcard arm taken");
        handler(&subject)
    }
}
