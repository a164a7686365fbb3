//! Binding plans
//!
//! The plan decides, once per method shape, which formal parameter is filled
//! from which explicit argument and which ones are resolved from the context.
//!
//! The matcher is greedy and never backtracks: each parameter takes the next
//! explicit argument if that argument's type is assignable to it. When an early
//! service-typed parameter is also assignable from an explicit argument's type,
//! that parameter wins the argument even if a later parameter was the intended
//! target. Callers order explicit arguments to avoid that case.

use dif_domain::Type;

/// Source of one formal parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Filled from the explicit argument at `position`, declared as `source`
    Explicit {
        /// Index into the call-time explicit argument list
        position: usize,
        /// The explicit argument type the parameter was matched against
        source: Type,
    },
    /// Resolved from the resolution context by the parameter's declared type
    Resolve,
}

impl Binding {
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit { .. })
    }
}

/// Per-parameter bindings for one method shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingPlan {
    bindings: Vec<Binding>,
    supplied: Vec<Type>,
    consumed: usize,
}

impl BindingPlan {
    /// Match `explicit` against `parameters` left to right
    pub fn compute(parameters: &[Type], explicit: &[Type]) -> Self {
        let mut cursor = 0;
        let bindings = parameters
            .iter()
            .map(|parameter| match explicit.get(cursor) {
                Some(source) if source.is_assignable_to(parameter) => {
                    let binding = Binding::Explicit {
                        position: cursor,
                        source: source.clone(),
                    };
                    cursor += 1;
                    binding
                }
                _ => Binding::Resolve,
            })
            .collect();

        Self {
            bindings,
            supplied: explicit.to_vec(),
            consumed: cursor,
        }
    }

    /// One binding per formal parameter, in declaration order
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Number of explicit arguments the plan reads at call time
    pub fn explicit_count(&self) -> usize {
        self.consumed
    }

    /// Number of parameters resolved from the context
    pub fn resolved_count(&self) -> usize {
        self.bindings.len() - self.consumed
    }

    /// Explicit argument types that no parameter accepted
    pub fn unconsumed(&self) -> &[Type] {
        &self.supplied[self.consumed..]
    }
}
