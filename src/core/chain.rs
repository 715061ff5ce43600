//! Chain-shaped PDDL domains for planner scaling runs.
//!
//! A chain of length `L` has predicates `rel0 .. rel(L-1)` plus `relGoal`,
//! and one action per link rewriting `rel<i>` into its successor. Reaching
//! `relGoal` from `rel0` takes exactly `L` steps.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("chain length must be a positive integer, got {0}")]
    InvalidLength(usize),
}

/// A generated chain domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDomain {
    pub length: usize,
    pub text: String,
}

impl ChainDomain {
    pub fn generate(length: usize) -> Result<ChainDomain, ChainError> {
        if length == 0 {
            return Err(ChainError::InvalidLength(length));
        }

        let mut predicates = String::new();
        let mut actions = String::new();

        for i in 0..length {
            let last = i + 1 == length;
            let precondition = format!("(rel{} ?var0 ?var1)", i);
            let effect = if last {
                "(relGoal ?var0 ?var1)".to_string()
            } else {
                format!("(rel{} ?var0 ?var1)", i + 1)
            };

            predicates.push_str(&precondition);
            predicates.push_str(if last { " (relGoal ?var0 ?var1)" } else { " " });

            actions.push_str(&format!(
                "(:action a{} :parameters (?var0 ?var1) :precondition {} :effect {})\n",
                i, precondition, effect
            ));
        }

        let text = format!(
            "(define (domain restdesc)\n\t(:predicates {})\n\t{}\n)",
            predicates, actions
        );

        Ok(ChainDomain { length, text })
    }

    pub fn file_name(&self) -> String {
        format!("domain-{}.pddl", self.length)
    }
}
