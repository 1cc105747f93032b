//! # Fuzzy Decision — Motor de Inferência Fuzzy para Agentes
//!
//! Motor de lógica fuzzy para **tomada de decisão de agentes autônomos**:
//! entradas contínuas e imprecisas ("distância ao inimigo", "vida restante")
//! viram um valor crisp ("desejabilidade de atacar") a partir de regras
//! linguísticas sobre conjuntos sobrepostos.
//!
//! ## Fluxo por Tick
//!
//! ```text
//! sensores ──fuzzify──▶ FLVs de entrada
//!                          │
//!                  regras (AND / OR / VERY / FAIRLY)
//!                          │
//!                          ▼
//!               FLV de saída ──defuzzify (MaxAv | Centroid)──▶ decisão
//! ```
//!
//! ## Exemplo
//!
//! ```rust
//! use fuzzy_decision::{DefuzzifyMethod, FuzzyModule, FuzzyRule, FuzzyVariable, Term};
//!
//! let mut distance = FuzzyVariable::new("distance");
//! let close = distance.add_left_shoulder("close", 0.0, 25.0, 150.0).unwrap();
//! let far = distance.add_right_shoulder("far", 25.0, 150.0, 1000.0).unwrap();
//!
//! let mut attack = FuzzyVariable::new("attack");
//! let low = attack.add_left_shoulder("low", 0.0, 25.0, 50.0).unwrap();
//! let high = attack.add_right_shoulder("high", 50.0, 75.0, 100.0).unwrap();
//!
//! let mut module = FuzzyModule::new();
//! module.add_flv("distance", distance);
//! module.add_flv("attack", attack);
//! module.add_rule(FuzzyRule::new(&close, Term::very(&high))).unwrap();
//! module.add_rule(FuzzyRule::new(&far, &low)).unwrap();
//!
//! module.fuzzify("distance", 40.0).unwrap();
//! let desirability = module.defuzzify("attack", DefuzzifyMethod::MaxAv).unwrap();
//! assert!(desirability > 50.0);
//! ```
//!
//! ## Concorrência
//!
//! Um módulo por agente. O módulo é `Send` e pode ser avaliado na thread do
//! agente, mas nunca por dois ciclos ao mesmo tempo.

/// Módulo `config` — parâmetros de defuzzificação ([`FuzzyConfig`]).
pub mod config;

/// Módulo `core` — conjuntos, termos e variáveis linguísticas.
pub mod core;

/// Módulo `error` — taxonomia de erros ([`FuzzyError`]).
pub mod error;

/// Módulo `inference` — regras e o ciclo de decisão ([`FuzzyModule`]).
pub mod inference;

/// Módulo `persistence` — snapshot do módulo em JSON.
pub mod persistence;

pub use crate::config::FuzzyConfig;
pub use crate::core::{FuzzySet, FuzzyTerm, FuzzyVariable, SetRef, Shape, Term};
pub use crate::error::{FuzzyError, FuzzyResult};
pub use crate::inference::{DefuzzifyMethod, FuzzyModule, FuzzyRule, RuleId};
