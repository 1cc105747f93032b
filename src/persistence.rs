//! # Persistência — Snapshot do Módulo
//!
//! Captura e reconstrução do estado de um [`FuzzyModule`]: FLVs com seus
//! conjuntos (formato + grau corrente), regras com id e árvores de
//! expressão, e a configuração.
//!
//! ## Folhas Compartilhadas
//!
//! Em memória as regras seguram handles ([`SetRef`](crate::core::SetRef))
//! para os conjuntos das FLVs. No snapshot cada folha vira o par
//! `(variable, set)`, e na reconstrução o par é resolvido para o **mesmo**
//! handle da FLV recriada — o compartilhamento é restaurado, nunca copiado.
//!
//! ```json
//! { "op": "and", "terms": [
//!     { "op": "set", "variable": "distance", "set": "close" },
//!     { "op": "very", "term": { "op": "set", "variable": "ammo", "set": "loads" } }
//! ] }
//! ```
//!
//! ## Quando Salvar?
//!
//! Fica a critério do host (ex: checkpoint do jogo). A escrita em disco
//! **não é atômica**.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::FuzzyConfig;
use crate::core::{FuzzySet, FuzzyTerm, FuzzyVariable, SetRef, Shape, Term};
use crate::error::{FuzzyError, FuzzyResult};
use crate::inference::{FuzzyModule, FuzzyRule, RuleId};

/// Estado completo de um módulo, serializável.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    #[serde(default)]
    pub config: FuzzyConfig,
    pub variables: Vec<VariableSnapshot>,
    pub rules: Vec<RuleSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableSnapshot {
    pub name: String,
    pub sets: Vec<SetSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetSnapshot {
    pub name: String,
    pub shape: Shape,
    #[serde(default)]
    pub degree_of_membership: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSnapshot {
    pub id: RuleId,
    pub antecedent: TermSnapshot,
    pub consequent: TermSnapshot,
}

/// Árvore de expressão com folhas referenciadas por nome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum TermSnapshot {
    Set { variable: String, set: String },
    And { terms: Vec<TermSnapshot> },
    Or { terms: Vec<TermSnapshot> },
    Very { term: Box<TermSnapshot> },
    Fairly { term: Box<TermSnapshot> },
}

impl FuzzyModule {
    /// Captura o estado atual. FLVs saem ordenadas por nome.
    pub fn snapshot(&self) -> FuzzyResult<ModuleSnapshot> {
        let mut variables: Vec<VariableSnapshot> = self
            .flvs()
            .map(|(name, flv)| VariableSnapshot {
                name: name.to_string(),
                sets: flv
                    .sets()
                    .map(|(set_name, set)| SetSnapshot {
                        name: set_name.to_string(),
                        shape: set.shape(),
                        degree_of_membership: set.degree_of_membership(),
                    })
                    .collect(),
            })
            .collect();
        variables.sort_by(|a, b| a.name.cmp(&b.name));

        let rules = self
            .rules()
            .iter()
            .map(|rule| -> FuzzyResult<RuleSnapshot> {
                Ok(RuleSnapshot {
                    id: rule.id(),
                    antecedent: self.term_snapshot(rule.antecedent())?,
                    consequent: self.term_snapshot(rule.consequent())?,
                })
            })
            .collect::<FuzzyResult<Vec<_>>>()?;

        Ok(ModuleSnapshot {
            config: self.config().clone(),
            variables,
            rules,
        })
    }

    /// Reconstrói um módulo, religando as folhas das regras às FLVs.
    pub fn from_snapshot(snapshot: ModuleSnapshot) -> FuzzyResult<FuzzyModule> {
        let mut module = FuzzyModule::with_config(snapshot.config)?;

        for variable in snapshot.variables {
            let mut flv = FuzzyVariable::new(variable.name.as_str());
            for set in variable.sets {
                let handle = flv.add_set(set.name, FuzzySet::new(set.shape)?);
                handle.restore_degree(set.degree_of_membership);
            }
            module.add_flv(variable.name, flv);
        }

        let mut seen = HashSet::new();
        for rule in snapshot.rules {
            if !seen.insert(rule.id) {
                return Err(FuzzyError::Snapshot {
                    reason: format!("duplicate rule id {}", rule.id),
                });
            }
            let antecedent = module.resolve_term(&rule.antecedent)?;
            let consequent = module.resolve_term(&rule.consequent)?;
            module.add_rule(FuzzyRule::with_id(rule.id, antecedent, consequent))?;
        }

        tracing::debug!(
            flvs = module.flvs().count(),
            rules = module.rules().len(),
            "Módulo reconstruído a partir de snapshot"
        );
        Ok(module)
    }

    fn term_snapshot(&self, term: &Term) -> FuzzyResult<TermSnapshot> {
        Ok(match term {
            Term::Set(set) => {
                let (variable, name) = self.locate(set)?;
                TermSnapshot::Set {
                    variable,
                    set: name,
                }
            }
            Term::And(children) => TermSnapshot::And {
                terms: self.children_snapshot(children)?,
            },
            Term::Or(children) => TermSnapshot::Or {
                terms: self.children_snapshot(children)?,
            },
            Term::Very(child) => TermSnapshot::Very {
                term: Box::new(self.term_snapshot(child)?),
            },
            Term::Fairly(child) => TermSnapshot::Fairly {
                term: Box::new(self.term_snapshot(child)?),
            },
        })
    }

    fn children_snapshot(&self, children: &[Term]) -> FuzzyResult<Vec<TermSnapshot>> {
        children.iter().map(|c| self.term_snapshot(c)).collect()
    }

    /// Encontra `(variável, conjunto)` que contém o handle.
    fn locate(&self, set: &SetRef) -> FuzzyResult<(String, String)> {
        self.flvs()
            .find_map(|(flv_name, flv)| {
                flv.name_of(set)
                    .map(|set_name| (flv_name.to_string(), set_name.to_string()))
            })
            .ok_or_else(|| FuzzyError::Snapshot {
                reason: format!("rule references unregistered set {}", set.shape()),
            })
    }

    fn resolve_term(&self, snapshot: &TermSnapshot) -> FuzzyResult<Term> {
        Ok(match snapshot {
            TermSnapshot::Set { variable, set } => {
                let flv = self.flv(variable).ok_or_else(|| FuzzyError::Snapshot {
                    reason: format!("unknown variable '{variable}'"),
                })?;
                let handle = flv.set(set).ok_or_else(|| FuzzyError::Snapshot {
                    reason: format!("unknown set '{set}' in variable '{variable}'"),
                })?;
                Term::Set(handle.clone())
            }
            TermSnapshot::And { terms } => Term::and(self.resolve_children(terms)?)?,
            TermSnapshot::Or { terms } => Term::or(self.resolve_children(terms)?),
            TermSnapshot::Very { term } => Term::very(self.resolve_term(term)?),
            TermSnapshot::Fairly { term } => Term::fairly(self.resolve_term(term)?),
        })
    }

    fn resolve_children(&self, terms: &[TermSnapshot]) -> FuzzyResult<Vec<Term>> {
        terms.iter().map(|t| self.resolve_term(t)).collect()
    }
}

/// Serializa o módulo como JSON pretty-printed.
pub fn to_json(module: &FuzzyModule) -> FuzzyResult<String> {
    let snapshot = module.snapshot()?;
    serde_json::to_string_pretty(&snapshot).map_err(|e| FuzzyError::Snapshot {
        reason: e.to_string(),
    })
}

/// Reconstrói um módulo a partir de JSON.
pub fn from_json(json: &str) -> FuzzyResult<FuzzyModule> {
    let snapshot: ModuleSnapshot = serde_json::from_str(json).map_err(|e| FuzzyError::Snapshot {
        reason: e.to_string(),
    })?;
    FuzzyModule::from_snapshot(snapshot)
}

/// Salva o módulo em disco, criando o diretório pai se preciso.
pub fn save_module(module: &FuzzyModule, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Falha ao criar diretório {}", parent.display()))?;
    }
    let json = to_json(module).context("Falha ao serializar FuzzyModule")?;
    std::fs::write(path, json).with_context(|| format!("Falha ao escrever {}", path.display()))?;
    Ok(())
}

/// Carrega o módulo do disco, ou cria um vazio se o arquivo não existir.
pub fn load_module(path: impl AsRef<Path>) -> Result<FuzzyModule> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!("Nenhum {} encontrado, iniciando módulo vazio", path.display());
        return Ok(FuzzyModule::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler {}", path.display()))?;
    let module = from_json(&json)
        .with_context(|| format!("Falha ao desserializar {}", path.display()))?;
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::DefuzzifyMethod;

    fn sample_module() -> (FuzzyModule, RuleId) {
        let mut distance = FuzzyVariable::new("distance");
        let close = distance.add_left_shoulder("close", 0.0, 25.0, 150.0).unwrap();
        let far = distance.add_right_shoulder("far", 150.0, 300.0, 1000.0).unwrap();
        let mut desirability = FuzzyVariable::new("desirability");
        let low = desirability.add_left_shoulder("low", 0.0, 25.0, 50.0).unwrap();
        let high = desirability.add_right_shoulder("high", 50.0, 75.0, 100.0).unwrap();

        let mut module = FuzzyModule::new();
        module.add_flv("distance", distance);
        module.add_flv("desirability", desirability);
        let id = module
            .add_rule(FuzzyRule::new(Term::very(&close), &high))
            .unwrap();
        module
            .add_rule(FuzzyRule::new(
                Term::or(vec![(&far).into()]),
                Term::and(vec![(&low).into()]).unwrap(),
            ))
            .unwrap();
        (module, id)
    }

    #[test]
    fn test_json_round_trip_preserves_decisions() {
        let (module, id) = sample_module();
        module.fuzzify("distance", 100.0).unwrap();
        let json = to_json(&module).unwrap();
        let restored = from_json(&json).unwrap();

        assert_eq!(restored.rules()[0].id(), id);
        for method in [DefuzzifyMethod::MaxAv, DefuzzifyMethod::Centroid] {
            assert_eq!(
                module.defuzzify("desirability", method).unwrap(),
                restored.defuzzify("desirability", method).unwrap()
            );
        }
    }

    /// As folhas das regras apontam para os conjuntos das FLVs recriadas.
    #[test]
    fn test_restored_leaves_are_shared() {
        let (module, _) = sample_module();
        let restored = FuzzyModule::from_snapshot(module.snapshot().unwrap()).unwrap();
        let high = restored.flv("desirability").unwrap().set("high").unwrap();
        let consequent = restored.rules()[0].consequent().leaf_sets();
        assert!(consequent[0].same_set(high));
    }

    #[test]
    fn test_unknown_reference_is_error() {
        let json = r#"{
            "variables": [],
            "rules": [{
                "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "antecedent": { "op": "set", "variable": "ghost", "set": "x" },
                "consequent": { "op": "set", "variable": "ghost", "set": "y" }
            }]
        }"#;
        assert!(matches!(from_json(json), Err(FuzzyError::Snapshot { .. })));
    }

    #[test]
    fn test_snapshot_keeps_degrees() {
        let (module, _) = sample_module();
        module.fuzzify("distance", 87.5).unwrap();
        let snapshot = module.snapshot().unwrap();
        let distance = snapshot
            .variables
            .iter()
            .find(|v| v.name == "distance")
            .unwrap();
        assert!((distance.sets[0].degree_of_membership - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("fuzzy-decision-{}", uuid::Uuid::new_v4()));
        let path = dir.join("module.json");
        let (module, _) = sample_module();
        save_module(&module, &path).unwrap();
        let loaded = load_module(&path).unwrap();
        assert_eq!(loaded.rules().len(), 2);
        std::fs::remove_dir_all(&dir).unwrap();

        let empty = load_module(dir.join("missing.json")).unwrap();
        assert!(empty.rules().is_empty());
    }
}
