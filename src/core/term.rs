//! # Termos Fuzzy — Árvore de Expressões das Regras
//!
//! Todo nó de uma expressão fuzzy implementa [`FuzzyTerm`], com exatamente
//! três operações:
//!
//! | Operação | Folha ([`SetRef`]) | Composto ([`Term`]) |
//! |----------|--------------------|---------------------|
//! | `degree_of_membership` | valor guardado | recalculado na leitura |
//! | `update_degree_of_membership(v)` | `max(dom, v)` | repassa a cada filho |
//! | `clear_degree_of_membership` | zera | repassa a cada filho |
//!
//! ## Operadores
//!
//! | Operador | Grau | Update repassado |
//! |----------|------|------------------|
//! | `And` | `min(filhos)` | `v` |
//! | `Or` | `max(filhos)` | `v` |
//! | `Very` | `d²` | `v²` |
//! | `Fairly` | `√d` | `√v` |
//!
//! Um consequente `And(alto, urgente)` portanto entrega a força da regra a
//! **todos** os conjuntos de saída que envolve.
//!
//! ## Exemplo
//!
//! ```text
//! SE perto E munição_alta ENTÃO muito(desejável)
//!   antecedente: And[perto, munição_alta]
//!   consequente: Very(desejável)
//! ```

use super::set::SetRef;
use crate::error::{FuzzyError, FuzzyResult};

/// Capacidade comum a todo nó de uma expressão fuzzy.
pub trait FuzzyTerm {
    /// Grau de pertinência corrente, em `[0, 1]`.
    fn degree_of_membership(&self) -> f64;

    /// Propaga a força de uma regra para as folhas (OR-acumulação).
    fn update_degree_of_membership(&self, value: f64);

    /// Zera o estado de rascunho, recursivamente.
    fn clear_degree_of_membership(&self);
}

/// Expressão fuzzy: um conjunto folha ou um operador composto.
#[derive(Clone, Debug)]
pub enum Term {
    Set(SetRef),
    And(Vec<Term>),
    Or(Vec<Term>),
    Very(Box<Term>),
    Fairly(Box<Term>),
}

impl Term {
    /// `AND` sem filhos é erro de configuração.
    pub fn and(children: Vec<Term>) -> FuzzyResult<Term> {
        if children.is_empty() {
            return Err(FuzzyError::EmptyComposite { operator: "AND" });
        }
        Ok(Term::And(children))
    }

    /// `OR` sem filhos tem grau 0.
    pub fn or(children: Vec<Term>) -> Term {
        Term::Or(children)
    }

    /// `VERY(x)`: concentra o grau (`d²`).
    pub fn very(child: impl Into<Term>) -> Term {
        Term::Very(Box::new(child.into()))
    }

    /// `FAIRLY(x)`: dilata o grau (`√d`).
    pub fn fairly(child: impl Into<Term>) -> Term {
        Term::Fairly(Box::new(child.into()))
    }

    /// Nome do operador, para logs e snapshots.
    pub fn operator(&self) -> &'static str {
        match self {
            Term::Set(_) => "SET",
            Term::And(_) => "AND",
            Term::Or(_) => "OR",
            Term::Very(_) => "VERY",
            Term::Fairly(_) => "FAIRLY",
        }
    }

    /// Verifica a árvore inteira: nenhum `And` pode estar vazio.
    ///
    /// As variantes são públicas, então `Term::And(vec![])` escapa de
    /// [`Term::and`]. O [`FuzzyModule`](crate::FuzzyModule) chama isto ao
    /// registrar regras.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::EmptyComposite`] no primeiro `And` sem filhos, em
    /// qualquer profundidade.
    pub fn validate(&self) -> FuzzyResult<()> {
        match self {
            Term::Set(_) => Ok(()),
            Term::And(children) if children.is_empty() => {
                Err(FuzzyError::EmptyComposite { operator: "AND" })
            }
            Term::And(children) | Term::Or(children) => {
                children.iter().try_for_each(Term::validate)
            }
            Term::Very(child) | Term::Fairly(child) => child.validate(),
        }
    }

    /// Todas as folhas da expressão, em ordem de profundidade.
    pub fn leaf_sets(&self) -> Vec<SetRef> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves(&self, out: &mut Vec<SetRef>) {
        match self {
            Term::Set(set) => out.push(set.clone()),
            Term::And(children) | Term::Or(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
            Term::Very(child) | Term::Fairly(child) => child.collect_leaves(out),
        }
    }
}

impl FuzzyTerm for Term {
    fn degree_of_membership(&self) -> f64 {
        match self {
            Term::Set(set) => set.degree_of_membership(),
            // AND vazio nunca dispara; add_rule já o rejeita via validate()
            Term::And(children) if children.is_empty() => 0.0,
            Term::And(children) => children
                .iter()
                .map(FuzzyTerm::degree_of_membership)
                .fold(f64::INFINITY, f64::min)
                .min(1.0),
            Term::Or(children) => children
                .iter()
                .map(FuzzyTerm::degree_of_membership)
                .fold(0.0, f64::max),
            Term::Very(child) => {
                let d = child.degree_of_membership();
                d * d
            }
            Term::Fairly(child) => child.degree_of_membership().sqrt(),
        }
    }

    fn update_degree_of_membership(&self, value: f64) {
        match self {
            Term::Set(set) => set.update_degree_of_membership(value),
            Term::And(children) | Term::Or(children) => {
                for child in children {
                    child.update_degree_of_membership(value);
                }
            }
            Term::Very(child) => child.update_degree_of_membership(value * value),
            Term::Fairly(child) => child.update_degree_of_membership(value.sqrt()),
        }
    }

    fn clear_degree_of_membership(&self) {
        match self {
            Term::Set(set) => set.clear_degree_of_membership(),
            Term::And(children) | Term::Or(children) => {
                for child in children {
                    child.clear_degree_of_membership();
                }
            }
            Term::Very(child) | Term::Fairly(child) => child.clear_degree_of_membership(),
        }
    }
}

impl From<SetRef> for Term {
    fn from(set: SetRef) -> Self {
        Term::Set(set)
    }
}

impl From<&SetRef> for Term {
    fn from(set: &SetRef) -> Self {
        Term::Set(set.clone())
    }
}
