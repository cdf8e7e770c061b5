use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PromptCheckError;

/// ========================================
/// Step-gated wizard state machine
/// ========================================
///
/// A linear sequence of steps fixed at construction. The machine is always
/// on exactly one step. Invalid transitions never panic or error; they come
/// back as a no-op [`Transition`] carrying the reason, so an interactive
/// caller can display it and carry on.

/// Outcome of a transition attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub moved: bool,
    /// Why the machine stayed put, when it did.
    pub reason: Option<String>,
}

impl Transition {
    fn moved(from: usize, to: usize) -> Self {
        Self { from, to, moved: true, reason: None }
    }

    fn blocked(at: usize, reason: impl Into<String>) -> Self {
        Self { from: at, to: at, moved: false, reason: Some(reason.into()) }
    }
}

#[derive(Debug, Clone)]
pub struct Wizard<S> {
    steps: Vec<S>,
    current: usize,
}

impl<S> Wizard<S> {
    pub fn new(steps: Vec<S>) -> Result<Self, PromptCheckError> {
        if steps.is_empty() {
            return Err(PromptCheckError::Wizard("a wizard needs at least one step".into()));
        }
        Ok(Self { steps, current: 0 })
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &S {
        &self.steps[self.current]
    }

    pub fn is_terminal(&self) -> bool {
        self.current == self.steps.len() - 1
    }

    /// Advance one step. No-op at the last step.
    pub fn next(&mut self) -> Transition {
        if self.is_terminal() {
            return Transition::blocked(self.current, "already at the last step");
        }
        let from = self.current;
        self.current += 1;
        Transition::moved(from, self.current)
    }

    /// Advance one step, but only if `gate` accepts the current step.
    /// A rejected gate leaves the machine where it is and surfaces the
    /// gate's message as the reason.
    pub fn next_guarded<F>(&mut self, gate: F) -> Transition
    where
        F: FnOnce(&S) -> Result<(), String>,
    {
        match gate(self.current()) {
            Ok(()) => self.next(),
            Err(reason) => Transition::blocked(self.current, reason),
        }
    }

    /// Step back. Always allowed except at the first step, so the user can
    /// go correct earlier input.
    pub fn previous(&mut self) -> Transition {
        if self.current == 0 {
            return Transition::blocked(0, "already at the first step");
        }
        let from = self.current;
        self.current -= 1;
        Transition::moved(from, self.current)
    }

    /// Jump straight to `index`; used for conditional skips.
    pub fn skip_to(&mut self, index: usize) -> Transition {
        if index >= self.steps.len() {
            return Transition::blocked(
                self.current,
                format!("step index {} is out of range", index),
            );
        }
        let from = self.current;
        self.current = index;
        Transition::moved(from, index)
    }

    /// Commit the wizard's accumulated data via `save`. Only valid from the
    /// terminal step. On success the machine resets to the first step; on
    /// failure it stays terminal and the error becomes the reason.
    pub fn commit<F>(&mut self, save: F) -> Transition
    where
        F: FnOnce() -> Result<(), String>,
    {
        if !self.is_terminal() {
            return Transition::blocked(self.current, "commit is only available from the last step");
        }
        match save() {
            Ok(()) => {
                let from = self.current;
                self.current = 0;
                Transition::moved(from, 0)
            }
            Err(reason) => Transition::blocked(self.current, reason),
        }
    }
}

/// Steps of the bundle-authoring flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorStep {
    Intent,
    Template,
    BasicInfo,
    Content,
    Advanced,
    Marketplace,
}

impl AuthorStep {
    pub fn all() -> Vec<AuthorStep> {
        vec![
            AuthorStep::Intent,
            AuthorStep::Template,
            AuthorStep::BasicInfo,
            AuthorStep::Content,
            AuthorStep::Advanced,
            AuthorStep::Marketplace,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthorStep::Intent => "Intent",
            AuthorStep::Template => "Template",
            AuthorStep::BasicInfo => "Basic Info",
            AuthorStep::Content => "Content",
            AuthorStep::Advanced => "Advanced",
            AuthorStep::Marketplace => "Marketplace",
        }
    }
}

impl fmt::Display for AuthorStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_steps() -> Wizard<&'static str> {
        Wizard::new(vec!["a", "b", "c", "d"]).unwrap()
    }

    #[test]
    fn construction_rejects_empty_step_lists() {
        assert!(Wizard::<&str>::new(vec![]).is_err());
    }

    #[test]
    fn previous_at_first_step_is_a_noop() {
        let mut w = four_steps();
        let t = w.previous();
        assert!(!t.moved);
        assert_eq!(w.current_index(), 0);
        assert!(t.reason.is_some());
    }

    #[test]
    fn next_at_last_step_is_a_noop() {
        let mut w = four_steps();
        w.skip_to(3);
        let t = w.next();
        assert!(!t.moved);
        assert_eq!(w.current_index(), 3);
    }

    #[test]
    fn failed_gate_blocks_without_moving() {
        let mut w = four_steps();
        w.next();
        let t = w.next_guarded(|step| Err(format!("fill in step '{}' first", step)));
        assert!(!t.moved);
        assert_eq!(w.current_index(), 1);
        assert_eq!(t.reason.as_deref(), Some("fill in step 'b' first"));

        let t = w.next_guarded(|_| Ok(()));
        assert!(t.moved);
        assert_eq!(w.current_index(), 2);
    }

    #[test]
    fn skip_to_is_bounds_checked() {
        let mut w = four_steps();
        let t = w.skip_to(4);
        assert!(!t.moved);
        assert_eq!(w.current_index(), 0);
        assert!(w.skip_to(2).moved);
        assert_eq!(w.current(), &"c");
    }

    #[test]
    fn commit_outside_the_terminal_step_is_a_noop() {
        let mut w = four_steps();
        let t = w.commit(|| Ok(()));
        assert!(!t.moved);
        assert_eq!(w.current_index(), 0);
    }

    #[test]
    fn successful_commit_resets_to_the_first_step() {
        let mut w = four_steps();
        w.skip_to(3);
        let t = w.commit(|| Ok(()));
        assert!(t.moved);
        assert_eq!(t.from, 3);
        assert_eq!(w.current_index(), 0);
    }

    #[test]
    fn failed_commit_stays_terminal_with_the_reason() {
        let mut w = four_steps();
        w.skip_to(3);
        let t = w.commit(|| Err("disk full".into()));
        assert!(!t.moved);
        assert!(w.is_terminal());
        assert_eq!(t.reason.as_deref(), Some("disk full"));
    }

    #[test]
    fn author_steps_run_intent_through_marketplace() {
        let w = Wizard::new(AuthorStep::all()).unwrap();
        assert_eq!(w.steps().len(), 6);
        assert_eq!(w.current(), &AuthorStep::Intent);
        assert_eq!(w.steps().last(), Some(&AuthorStep::Marketplace));
    }
}
