//! # Módulo Inference — Regras e Ciclo de Decisão
//!
//! Este módulo contém o **motor de inferência** propriamente dito:
//!
//! | Tipo | Papel |
//! |------|-------|
//! | [`FuzzyRule`] | `SE antecedente ENTÃO consequente` |
//! | [`FuzzyModule`] | registro de FLVs + regras, dirige o ciclo |
//! | [`DefuzzifyMethod`] | MaxAv ou Centroid |
//!
//! ## Exemplo
//!
//! ```text
//! SE perto ENTÃO desejabilidade.alta
//! fuzzify(distance = 10) → perto = 0.6
//! defuzzify(desirability, MaxAv) → valor representativo de "alta"
//! ```

/// Sub-módulo com [`FuzzyRule`] e [`RuleId`].
pub mod rules;

/// Sub-módulo com [`FuzzyModule`] e [`DefuzzifyMethod`].
pub mod module;

pub use module::{DefuzzifyMethod, FuzzyModule};
pub use rules::{FuzzyRule, RuleId};
