//! Invariant checking for recorded traces.
//!
//! Invariants are properties every trace must have, whichever algorithm
//! produced it. Unlike example-based tests that check specific scenarios,
//! they run against every trace a test can build, including proptest-generated
//! inputs.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.check_all(&trace)?;
//! ```

mod checks;

pub use checks::{
    DistinctSteps, OrderMonotonicity, SingleActiveEdge, SortedMonotonicity, StableShape,
    TerminalResolved, UniformFamily,
};
use stepwise_core::Trace;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Snapshot index where it was detected. `None` for whole-trace checks.
    pub step: Option<usize>,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.step {
            Some(step) => write!(f, "{} at step {step}: {}", self.invariant, self.message),
            None => write!(f, "{}: {}", self.invariant, self.message),
        }
    }
}

impl std::error::Error for Violation {}

/// A property checked against a whole trace.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant.
    ///
    /// Returns `Ok(())` if it holds, or the first [`Violation`] found.
    fn check(&self, trace: &Trace) -> InvariantResult;
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the structural invariants every trace obeys.
    ///
    /// Includes:
    /// - [`UniformFamily`]: one snapshot family per trace
    /// - [`StableShape`]: element, node and edge counts never change
    /// - [`DistinctSteps`]: consecutive snapshots differ
    /// - [`SortedMonotonicity`]: a sorted slot stays sorted
    /// - [`OrderMonotonicity`]: topological numbers are fixed once assigned
    /// - [`SingleActiveEdge`]: at most one edge is active per snapshot
    ///
    /// [`TerminalResolved`] is not included: a cyclic topological sort
    /// legitimately ends unresolved.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(UniformFamily);
        registry.add(StableShape);
        registry.add(DistinctSteps);
        registry.add(SortedMonotonicity);
        registry.add(OrderMonotonicity);
        registry.add(SingleActiveEdge);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Builder form of [`InvariantRegistry::add`].
    #[must_use]
    pub fn with<I: Invariant + 'static>(mut self, invariant: I) -> Self {
        self.add(invariant);
        self
    }

    /// Check all invariants against the trace.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, trace: &Trace) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(trace).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, trace: &Trace) {
        if let Err(violations) = self.check_all(trace) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("invariant violation in {}:\n  {}", trace.name(), messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert_eq!(registry.len(), 6);
        assert!(InvariantRegistry::new().is_empty());
    }

    #[test]
    fn violation_display_names_step() {
        let v = Violation { invariant: "distinct-steps", step: Some(4), message: "same".into() };
        assert_eq!(v.to_string(), "distinct-steps at step 4: same");
    }
}
