//! Property-based tests for frameset invariants

mod frameset_invariants;
mod parameter_parsing;
