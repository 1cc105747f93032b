//! # FuzzyModule — Registro de FLVs e Regras
//!
//! O [`FuzzyModule`] é o estado de decisão de **um agente**: as variáveis
//! linguísticas (por nome) e a base de regras (em ordem de registro).
//!
//! ## Ciclo de Decisão
//!
//! ```text
//! fuzzify("distance", 80.0)    ─┐
//! fuzzify("ammo", 12.0)        ─┤  entradas do tick
//!                               ▼
//! defuzzify("desirability", MaxAv)
//!   ├── init_consequence() em TODAS as regras
//!   ├── evaluate() em todas as regras (ordem de registro)
//!   └── MaxAv / Centroid na FLV de saída
//! ```
//!
//! A ordem das regras não altera o resultado: a OR-acumulação é comutativa.
//!
//! ## ⚠️ Concorrência
//!
//! Um ciclo **escreve** nos conjuntos de saída compartilhados. Dois ciclos
//! simultâneos no mesmo módulo corrompem a acumulação um do outro. Agentes
//! avaliados em paralelo devem ter módulos independentes — o módulo é
//! `Send`, então pode ser movido para a thread do agente.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rules::{FuzzyRule, RuleId};
use crate::config::FuzzyConfig;
use crate::core::{FuzzyVariable, SetRef};
use crate::error::{FuzzyError, FuzzyResult};

/// Algoritmo de defuzzificação.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefuzzifyMethod {
    /// Média dos valores representativos ponderada pelos graus.
    MaxAv,
    /// Centroide amostrado da curva de saída combinada.
    Centroid,
}

impl DefuzzifyMethod {
    /// Nome canônico, o mesmo usado no JSON.
    pub fn label(&self) -> &'static str {
        match self {
            DefuzzifyMethod::MaxAv => "maxav",
            DefuzzifyMethod::Centroid => "centroid",
        }
    }
}

/// Aceita `maxav`, `max_av` e `centroid`, sem diferenciar maiúsculas.
impl FromStr for DefuzzifyMethod {
    type Err = FuzzyError;

    fn from_str(s: &str) -> FuzzyResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maxav" | "max_av" => Ok(DefuzzifyMethod::MaxAv),
            "centroid" => Ok(DefuzzifyMethod::Centroid),
            other => Err(FuzzyError::InvalidConfig {
                reason: format!("unknown defuzzification method '{other}'"),
            }),
        }
    }
}

/// Registro de FLVs e regras de um agente.
#[derive(Debug, Default)]
pub struct FuzzyModule {
    flvs: HashMap<String, FuzzyVariable>,
    rules: Vec<FuzzyRule>,
    config: FuzzyConfig,
}

impl FuzzyModule {
    /// Cria um módulo vazio com a configuração padrão.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria um módulo vazio com a configuração dada.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::InvalidConfig`] se a configuração não passa em
    /// [`FuzzyConfig::validate`].
    pub fn with_config(config: FuzzyConfig) -> FuzzyResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Configuração de defuzzificação em uso.
    pub fn config(&self) -> &FuzzyConfig {
        &self.config
    }

    /// Registra a FLV sob `name`. Em colisão a última escrita vence e a FLV
    /// anterior é devolvida.
    ///
    /// Regras que apontavam para conjuntos da FLV substituída continuam
    /// apontando para eles; remova essas regras antes de trocar a FLV.
    pub fn add_flv(&mut self, name: impl Into<String>, mut flv: FuzzyVariable) -> Option<FuzzyVariable> {
        let name = name.into();
        flv.rename(&name);
        tracing::debug!(flv = %name, sets = flv.len(), "Módulo: FLV registrada");
        self.flvs.insert(name, flv)
    }

    /// Remove a FLV e a devolve.
    ///
    /// # Erros
    ///
    /// - [`FuzzyError::UnknownVariable`] se não há FLV com esse nome
    /// - [`FuzzyError::SetInUse`] se alguma regra ainda referencia um dos
    ///   seus conjuntos (remova as regras antes)
    pub fn remove_flv(&mut self, name: &str) -> FuzzyResult<FuzzyVariable> {
        let flv = self.lookup(name)?;
        for (set_name, set) in flv.sets() {
            self.ensure_unreferenced(name, set_name, set)?;
        }
        let flv = self
            .flvs
            .remove(name)
            .ok_or_else(|| FuzzyError::UnknownVariable {
                name: name.to_string(),
            })?;
        tracing::debug!(flv = %name, "Módulo: FLV removida");
        Ok(flv)
    }

    /// Remove o conjunto `set` da FLV `variable`, recusando se alguma regra
    /// ainda o referencia.
    ///
    /// Prefira este método a `flv_mut(..).remove_set(..)`, que não enxerga
    /// as regras.
    ///
    /// # Erros
    ///
    /// - [`FuzzyError::UnknownVariable`] / [`FuzzyError::UnknownSet`]
    /// - [`FuzzyError::SetInUse`] se alguma regra referencia o conjunto
    ///
    /// # Exemplo
    ///
    /// ```rust
    /// use fuzzy_decision::{FuzzyError, FuzzyModule, FuzzyRule, FuzzyVariable};
    ///
    /// let mut ammo = FuzzyVariable::new("ammo");
    /// let low = ammo.add_triangle("low", 0.0, 0.0, 10.0).unwrap();
    /// ammo.add_right_shoulder("loads", 10.0, 30.0, 100.0).unwrap();
    ///
    /// let mut module = FuzzyModule::new();
    /// module.add_flv("ammo", ammo);
    /// let id = module.add_rule(FuzzyRule::new(&low, &low)).unwrap();
    ///
    /// assert!(matches!(
    ///     module.remove_set("ammo", "low"),
    ///     Err(FuzzyError::SetInUse { rules: 1, .. })
    /// ));
    /// module.remove_rule(id).unwrap();
    /// assert!(module.remove_set("ammo", "low").is_ok());
    /// ```
    pub fn remove_set(&mut self, variable: &str, set: &str) -> FuzzyResult<SetRef> {
        let flv = self.lookup(variable)?;
        let handle = flv.set(set).ok_or_else(|| FuzzyError::UnknownSet {
            variable: variable.to_string(),
            set: set.to_string(),
        })?;
        self.ensure_unreferenced(variable, set, handle)?;

        let removed = self
            .flvs
            .get_mut(variable)
            .ok_or_else(|| FuzzyError::UnknownVariable {
                name: variable.to_string(),
            })?
            .remove_set(set)?;
        tracing::debug!(flv = %variable, set = %set, "Módulo: conjunto removido");
        Ok(removed)
    }

    fn ensure_unreferenced(&self, variable: &str, set_name: &str, set: &SetRef) -> FuzzyResult<()> {
        let rules = self
            .rules
            .iter()
            .filter(|rule| rule.leaf_sets().iter().any(|leaf| leaf.same_set(set)))
            .count();
        if rules > 0 {
            return Err(FuzzyError::SetInUse {
                variable: variable.to_string(),
                set: set_name.to_string(),
                rules,
            });
        }
        Ok(())
    }

    /// FLV registrada sob `name`.
    pub fn flv(&self, name: &str) -> Option<&FuzzyVariable> {
        self.flvs.get(name)
    }

    /// Acesso mutável à FLV, para adicionar conjuntos depois do registro.
    pub fn flv_mut(&mut self, name: &str) -> Option<&mut FuzzyVariable> {
        self.flvs.get_mut(name)
    }

    pub fn flvs(&self) -> impl Iterator<Item = (&str, &FuzzyVariable)> {
        self.flvs.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Registra a regra ao final da sequência.
    ///
    /// Todo conjunto referenciado precisa pertencer a uma FLV já registrada;
    /// senão a regra escreveria num conjunto que nenhuma FLV defuzzifica.
    ///
    /// # Erros
    ///
    /// - [`FuzzyError::EmptyComposite`] se algum `AND` da regra, em qualquer
    ///   profundidade, não tem filhos
    /// - [`FuzzyError::UnregisteredSet`] se alguma folha não pertence a
    ///   nenhuma FLV do módulo
    pub fn add_rule(&mut self, rule: FuzzyRule) -> FuzzyResult<RuleId> {
        rule.validate()?;
        for leaf in rule.leaf_sets() {
            if !self.flvs.values().any(|flv| flv.contains(&leaf)) {
                return Err(FuzzyError::UnregisteredSet {
                    set: leaf.shape().to_string(),
                });
            }
        }
        let id = rule.id();
        tracing::debug!(rule = %id, total = self.rules.len() + 1, "Módulo: regra registrada");
        self.rules.push(rule);
        Ok(id)
    }

    /// Remove a regra por identidade. Regra ausente é erro, nunca no-op.
    pub fn remove_rule(&mut self, id: RuleId) -> FuzzyResult<FuzzyRule> {
        let index = self
            .rules
            .iter()
            .position(|r| r.id() == id)
            .ok_or(FuzzyError::UnknownRule { id })?;
        tracing::debug!(rule = %id, "Módulo: regra removida");
        Ok(self.rules.remove(index))
    }

    /// Regras em ordem de registro.
    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    /// Fuzzifica `value` na FLV `name`.
    pub fn fuzzify(&self, name: &str, value: f64) -> FuzzyResult<()> {
        self.lookup(name)?.fuzzify(value)
    }

    /// Roda o ciclo completo e defuzzifica a FLV `name`.
    pub fn defuzzify(&self, name: &str, method: DefuzzifyMethod) -> FuzzyResult<f64> {
        let flv = self.lookup(name)?;

        for rule in &self.rules {
            rule.init_consequence();
        }
        for rule in &self.rules {
            rule.evaluate();
        }

        let value = match method {
            DefuzzifyMethod::MaxAv => flv.defuzzify_max_av(self.config.max_av_threshold),
            DefuzzifyMethod::Centroid => flv.defuzzify_centroid(self.config.centroid_samples)?,
        };
        tracing::trace!(
            flv = %name,
            method = method.label(),
            rules = self.rules.len(),
            value,
            "Módulo: ciclo de decisão concluído"
        );
        Ok(value)
    }

    /// [`defuzzify`](Self::defuzzify) com o método padrão da configuração.
    pub fn defuzzify_default(&self, name: &str) -> FuzzyResult<f64> {
        self.defuzzify(name, self.config.default_method)
    }

    /// Variante com o método como texto (ex: vindo de um arquivo de balanceamento).
    ///
    /// Método desconhecido não aborta o tick: gera um warning e usa MaxAv.
    pub fn defuzzify_by_name(&self, name: &str, method: &str) -> FuzzyResult<f64> {
        let method = method.parse().unwrap_or_else(|err: FuzzyError| {
            tracing::warn!(
                flv = %name,
                method = %method,
                error = %err,
                "Método de defuzzificação desconhecido, usando MaxAv"
            );
            DefuzzifyMethod::MaxAv
        });
        self.defuzzify(name, method)
    }

    fn lookup(&self, name: &str) -> FuzzyResult<&FuzzyVariable> {
        self.flvs.get(name).ok_or_else(|| FuzzyError::UnknownVariable {
            name: name.to_string(),
        })
    }
}
