//! Domain layer: pure casino rules, no I/O.

pub mod actions;
pub mod build_calc;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod determination;
pub mod play;
pub mod round;
pub mod rule_registry;
pub mod rules_build;
pub mod rules_capture;
pub mod rules_staging;
pub mod rules_trail;
pub mod staging;

pub mod game_transition;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_build_calc;
#[cfg(test)]
mod tests_determination;
#[cfg(test)]
mod tests_props_conservation;
#[cfg(test)]
mod tests_round;
#[cfg(test)]
mod tests_rules;

// Re-exports for ergonomics
pub use actions::{Action, ActionKind, CaptureTarget, DraggedItem, StackResolution, TargetInfo};
pub use build_calc::{
    candidate_build_values, detect_build_type, validate_build_strict, BuildCalculator, BuildKind,
    DisplayValue, PlacedValue,
};
pub use cards_types::{Card, Rank, Suit};
pub use determination::{determine_actions, determine_actions_with, ActionDecision};
pub use play::{apply_action, ApplyOutcome};
pub use rule_registry::{RuleRegistry, STANDARD_RULES};
pub use seed_derivation::derive_dealing_seed;
pub use state::{CardSource, GameState, Phase, PlayerId, TableItem};
