//! # FuzzyRule — Antecedente ⇒ Consequente
//!
//! Uma regra liga uma condição (antecedente) a uma ação (consequente), ambos
//! árvores de [`Term`]. As folhas são **compartilhadas** com as FLVs: avaliar
//! uma regra escreve no acumulador dos conjuntos de saída.
//!
//! ## Protocolo por Ciclo
//!
//! ```text
//! não-inicializada ──init_consequence()──▶ zerada ──evaluate()──▶ avaliada
//! ```
//!
//! `init_consequence()` precisa rodar para **todas** as regras antes que
//! **qualquer** regra avalie, porque um mesmo conjunto de saída pode ser
//! alvo de várias regras. Quem dirige o ciclo é o
//! [`FuzzyModule`](super::FuzzyModule).

use uuid::Uuid;

use crate::core::{FuzzyTerm, SetRef, Term};
use crate::error::FuzzyResult;

/// Identificador de uma [`FuzzyRule`]. Remoção de regras é por identidade.
pub type RuleId = Uuid;

/// Regra fuzzy `SE antecedente ENTÃO consequente`.
#[derive(Debug)]
pub struct FuzzyRule {
    id: RuleId,
    antecedent: Term,
    consequent: Term,
}

impl FuzzyRule {
    /// Cria a regra com um id novo. A estrutura dos termos só é verificada
    /// no registro ([`FuzzyModule::add_rule`](super::FuzzyModule::add_rule)).
    pub fn new(antecedent: impl Into<Term>, consequent: impl Into<Term>) -> Self {
        Self::with_id(Uuid::new_v4(), antecedent, consequent)
    }

    /// Recria uma regra com id conhecido (snapshots).
    pub fn with_id(id: RuleId, antecedent: impl Into<Term>, consequent: impl Into<Term>) -> Self {
        Self {
            id,
            antecedent: antecedent.into(),
            consequent: consequent.into(),
        }
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn antecedent(&self) -> &Term {
        &self.antecedent
    }

    pub fn consequent(&self) -> &Term {
        &self.consequent
    }

    /// Zera o consequente para o novo ciclo.
    pub fn init_consequence(&self) {
        self.consequent.clear_degree_of_membership();
    }

    /// Aplica o grau do antecedente ao consequente (OR-acumulação) e o retorna.
    pub fn evaluate(&self) -> f64 {
        let strength = self.antecedent.degree_of_membership();
        self.consequent.update_degree_of_membership(strength);
        strength
    }

    /// Verifica antecedente e consequente (ver [`Term::validate`]).
    ///
    /// # Erros
    ///
    /// [`FuzzyError::EmptyComposite`](crate::FuzzyError::EmptyComposite) se
    /// qualquer um dos lados contém um `AND` vazio.
    pub fn validate(&self) -> FuzzyResult<()> {
        self.antecedent.validate()?;
        self.consequent.validate()
    }

    /// Folhas do antecedente seguidas das do consequente.
    pub fn leaf_sets(&self) -> Vec<SetRef> {
        let mut leaves = self.antecedent.leaf_sets();
        leaves.extend(self.consequent.leaf_sets());
        leaves
    }
}
