//! # Erros do Motor Fuzzy
//!
//! Taxonomia de falhas do motor de inferência. Todas são **pré-condições
//! locais** verificadas de forma síncrona e devolvidas ao chamador imediato —
//! não há retry. Quem decide pular o tick ou abortar é a lógica do agente.
//!
//! | Categoria | Variantes |
//! |-----------|-----------|
//! | Configuração / lookup | `UnknownVariable`, `UnknownSet`, `UnknownRule`, `UnregisteredSet`, `SetInUse` |
//! | Configuração estrutural | `EmptyComposite`, `EmptyVariable`, `InvalidShape`, `InvalidConfig` |
//! | Domínio | `OutOfRange` — nunca fazemos clamp silencioso da entrada |
//! | Snapshot | `Snapshot` — referência inexistente ao reconstruir um módulo |
//!
//! Um nome de método de defuzzificação desconhecido falha no parse com
//! `InvalidConfig`, mas **não** interrompe o ciclo: vira warning e cai no
//! MaxAv (ver [`FuzzyModule::defuzzify_by_name`](crate::FuzzyModule::defuzzify_by_name)).

use crate::inference::RuleId;

/// Erros do motor fuzzy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    #[error("unknown fuzzy variable: {name}")]
    UnknownVariable { name: String },

    #[error("unknown fuzzy set '{set}' in variable '{variable}'")]
    UnknownSet { variable: String, set: String },

    #[error("unknown rule: {id}")]
    UnknownRule { id: RuleId },

    /// A regra referencia um conjunto que não pertence a nenhuma FLV registrada.
    /// `set` descreve o formato do conjunto órfão, já que ele não tem nome.
    #[error("rule references fuzzy set {set}, which no registered variable owns")]
    UnregisteredSet { set: String },

    /// Remoção recusada: regras ainda escrevem ou leem o conjunto.
    #[error("fuzzy set '{set}' in variable '{variable}' is still referenced by {rules} rule(s)")]
    SetInUse {
        variable: String,
        set: String,
        rules: usize,
    },

    #[error("{operator} requires at least one child term")]
    EmptyComposite { operator: &'static str },

    #[error("fuzzy variable '{variable}' has no sets")]
    EmptyVariable { variable: String },

    #[error("value {value} is outside the range [{min}, {max}] of variable '{variable}'")]
    OutOfRange {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid set shape: {reason}")]
    InvalidShape { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid module snapshot: {reason}")]
    Snapshot { reason: String },
}

/// Alias de conveniência para resultados do motor.
pub type FuzzyResult<T> = Result<T, FuzzyError>;
