//! # Módulo Core — Tipos Fundamentais da Lógica Fuzzy
//!
//! Este módulo agrupa os **blocos de construção** do motor de inferência:
//!
//! - [`Shape`] — função de pertinência (ombros, triângulo, singleton, normal)
//! - [`FuzzySet`] — rótulo linguístico com grau de pertinência corrente
//! - [`SetRef`] — handle compartilhado de um conjunto (FLV + regras)
//! - [`FuzzyTerm`] — as três operações comuns a todo nó de expressão
//! - [`Term`] — expressão fuzzy: folha, `AND`, `OR`, `VERY`, `FAIRLY`
//! - [`FuzzyVariable`] — variável linguística (FLV): fuzzifica e defuzzifica
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use fuzzy_decision::core::{FuzzyTerm, FuzzyVariable, Term};
//!
//! let mut distance = FuzzyVariable::new("distance");
//! let close = distance.add_left_shoulder("close", 0.0, 25.0, 150.0).unwrap();
//! let far = distance.add_right_shoulder("far", 150.0, 300.0, 1000.0).unwrap();
//!
//! distance.fuzzify(10.0).unwrap();
//! assert_eq!(close.degree_of_membership(), 1.0);
//! assert_eq!(Term::very(&far).degree_of_membership(), 0.0);
//! ```

/// Sub-módulo com [`FuzzySet`], [`Shape`] e [`SetRef`].
pub mod set;

/// Sub-módulo com o contrato [`FuzzyTerm`] e os operadores compostos.
pub mod term;

/// Sub-módulo com a variável linguística [`FuzzyVariable`].
pub mod variable;

pub use set::{FuzzySet, SetRef, Shape};
pub use term::{FuzzyTerm, Term};
pub use variable::FuzzyVariable;
