//! # FuzzyVariable — Variável Linguística (FLV)
//!
//! Uma FLV agrupa os conjuntos que descrevem **uma** grandeza numérica:
//! "distância ao alvo" = {perto, médio, longe}. Todos compartilham o mesmo
//! domínio `[min_range, max_range]`, recalculado a cada `add_set`/`remove_set`
//! como a união dos suportes dos conjuntos.
//!
//! ## Fuzzificação
//!
//! Uma única leitura crisp é pontuada contra **todos** os rótulos ao mesmo
//! tempo. Valores fora do domínio são erro — não fazemos clamp, para que
//! bugs de sensoriamento apareçam logo.
//!
//! ## Defuzzificação
//!
//! | Método | Fórmula |
//! |--------|---------|
//! | MaxAv | `Σ(rvᵢ × dᵢ) / Σ(dᵢ)` sobre conjuntos com `dᵢ > threshold` |
//! | Centroid | `Σ(xⱼ × c(xⱼ)) / Σ c(xⱼ)`, `c(x) = maxᵢ min(shapeᵢ(x), dᵢ)` |
//!
//! O Centroid amostra `xⱼ = min + j × step` para `j = 1..=samples`, com
//! `step = (max − min) / samples`. Os dois métodos apenas **leem** os graus;
//! podem ser chamados repetidamente sem reavaliar as regras.

use super::set::{FuzzySet, SetRef};
use super::term::FuzzyTerm;
use crate::error::{FuzzyError, FuzzyResult};

/// Variável linguística: conjuntos nomeados sobre um domínio comum.
#[derive(Debug)]
pub struct FuzzyVariable {
    name: String,
    sets: Vec<(String, SetRef)>,
    range: Option<(f64, f64)>,
}

impl FuzzyVariable {
    /// Cria uma FLV vazia (sem domínio até o primeiro conjunto).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: Vec::new(),
            range: None,
        }
    }

    /// Nome da FLV (o mesmo do registro no módulo).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Adiciona (ou substitui) o conjunto `name` e retorna o handle
    /// compartilhado para uso nas regras.
    pub fn add_set(&mut self, name: impl Into<String>, set: FuzzySet) -> SetRef {
        let name = name.into();
        let handle = SetRef::new(set);
        match self.sets.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = handle.clone(),
            None => self.sets.push((name, handle.clone())),
        }
        self.recompute_range();
        handle
    }

    /// Adiciona um ombro esquerdo: 1 até `peak`, cai até `right`.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::InvalidShape`] se `left <= peak <= right` não vale.
    pub fn add_left_shoulder(
        &mut self,
        name: impl Into<String>,
        left: f64,
        peak: f64,
        right: f64,
    ) -> FuzzyResult<SetRef> {
        Ok(self.add_set(name, FuzzySet::left_shoulder(left, peak, right)?))
    }

    /// Adiciona um ombro direito: sobe de `left` até `peak`, 1 depois.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::InvalidShape`] se `left <= peak <= right` não vale.
    pub fn add_right_shoulder(
        &mut self,
        name: impl Into<String>,
        left: f64,
        peak: f64,
        right: f64,
    ) -> FuzzyResult<SetRef> {
        Ok(self.add_set(name, FuzzySet::right_shoulder(left, peak, right)?))
    }

    /// Adiciona um triângulo com pico em `peak`.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::InvalidShape`] se `left <= peak <= right` não vale.
    pub fn add_triangle(
        &mut self,
        name: impl Into<String>,
        left: f64,
        peak: f64,
        right: f64,
    ) -> FuzzyResult<SetRef> {
        Ok(self.add_set(name, FuzzySet::triangle(left, peak, right)?))
    }

    /// Adiciona um singleton: 1 em todo `[left, right]`.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::InvalidShape`] se `left <= peak <= right` não vale.
    pub fn add_singleton(
        &mut self,
        name: impl Into<String>,
        left: f64,
        peak: f64,
        right: f64,
    ) -> FuzzyResult<SetRef> {
        Ok(self.add_set(name, FuzzySet::singleton(left, peak, right)?))
    }

    /// Adiciona uma gaussiana centrada em `peak`, truncada em `[left, right]`.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::InvalidShape`] se os pontos estão fora de ordem ou
    /// `std_dev <= 0`.
    pub fn add_normal(
        &mut self,
        name: impl Into<String>,
        left: f64,
        peak: f64,
        right: f64,
        std_dev: f64,
    ) -> FuzzyResult<SetRef> {
        Ok(self.add_set(name, FuzzySet::normal(left, peak, right, std_dev)?))
    }

    /// Remove o conjunto e recalcula o domínio.
    ///
    /// A FLV não conhece as regras: uma regra que ainda segura o handle
    /// continua escrevendo nele, mas o conjunto deixa de ser fuzzificado e
    /// defuzzificado, e o snapshot do módulo passa a falhar. Para FLVs já
    /// registradas use [`FuzzyModule::remove_set`](crate::FuzzyModule::remove_set),
    /// que recusa a remoção enquanto houver regras.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::UnknownSet`] se não há conjunto com esse nome.
    pub fn remove_set(&mut self, name: &str) -> FuzzyResult<SetRef> {
        let index = self
            .sets
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| FuzzyError::UnknownSet {
                variable: self.name.clone(),
                set: name.to_string(),
            })?;
        let (_, handle) = self.sets.remove(index);
        self.recompute_range();
        Ok(handle)
    }

    /// Handle do conjunto `name`, para montar regras.
    pub fn set(&self, name: &str) -> Option<&SetRef> {
        self.sets.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Conjuntos na ordem de inserção.
    pub fn sets(&self) -> impl Iterator<Item = (&str, &SetRef)> {
        self.sets.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Nome do conjunto que contém `set`, se pertencer a esta FLV.
    pub fn name_of(&self, set: &SetRef) -> Option<&str> {
        self.sets
            .iter()
            .find(|(_, s)| s.same_set(set))
            .map(|(n, _)| n.as_str())
    }

    /// `true` se o handle aponta para um conjunto desta FLV.
    pub fn contains(&self, set: &SetRef) -> bool {
        self.name_of(set).is_some()
    }

    /// Quantidade de conjuntos.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// `(min_range, max_range)`, ou `None` se a FLV não tem conjuntos.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.range
    }

    fn recompute_range(&mut self) {
        self.range = self.sets.iter().fold(None, |acc, (_, set)| {
            let shape = set.shape();
            Some(match acc {
                None => (shape.left(), shape.right()),
                Some((min, max)) => (min.min(shape.left()), max.max(shape.right())),
            })
        });
    }

    /// Fuzzifica `value` contra todos os conjuntos.
    pub fn fuzzify(&self, value: f64) -> FuzzyResult<()> {
        let (min, max) = self.range.ok_or_else(|| FuzzyError::EmptyVariable {
            variable: self.name.clone(),
        })?;
        if !(value >= min && value <= max) {
            return Err(FuzzyError::OutOfRange {
                variable: self.name.clone(),
                value,
                min,
                max,
            });
        }
        for (_, set) in &self.sets {
            set.fuzzify(value);
        }
        Ok(())
    }

    /// Média dos valores representativos ponderada pelos graus.
    pub fn defuzzify_max_av(&self, threshold: f64) -> f64 {
        let (mut weighted, mut total) = (0.0, 0.0);
        for (_, set) in &self.sets {
            let degree = set.degree_of_membership();
            if degree > threshold {
                weighted += set.representative_value() * degree;
                total += degree;
            }
        }
        if total == 0.0 {
            0.0
        } else {
            weighted / total
        }
    }

    /// Centroide da curva combinada (máximo dos formatos cortados pelos graus).
    pub fn defuzzify_centroid(&self, samples: usize) -> FuzzyResult<f64> {
        if samples == 0 {
            return Err(FuzzyError::InvalidConfig {
                reason: "centroid needs at least one sample".to_string(),
            });
        }
        let Some((min, max)) = self.range else {
            return Ok(0.0);
        };
        let step = (max - min) / samples as f64;
        let (mut moments, mut area) = (0.0, 0.0);
        for j in 1..=samples {
            let x = min + j as f64 * step;
            let clipped = self
                .sets
                .iter()
                .map(|(_, set)| set.clipped_membership(x))
                .fold(0.0, f64::max);
            moments += x * clipped;
            area += clipped;
        }
        Ok(if area == 0.0 { 0.0 } else { moments / area })
    }

    /// Conjunto de maior grau corrente (diagnóstico).
    pub fn dominant_set(&self) -> Option<(&str, f64)> {
        self.sets
            .iter()
            .map(|(n, s)| (n.as_str(), s.degree_of_membership()))
            .filter(|(_, d)| *d > 0.0)
            .fold(None, |best, cur| match best {
                Some((_, d)) if d >= cur.1 => best,
                _ => Some(cur),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    /// "Desejabilidade" clássica: indesejável / desejável / muito desejável.
    fn desirability() -> (FuzzyVariable, SetRef, SetRef, SetRef) {
        let mut flv = FuzzyVariable::new("desirability");
        let low = flv.add_left_shoulder("undesirable", 0.0, 25.0, 50.0).unwrap();
        let mid = flv.add_triangle("desirable", 25.0, 50.0, 75.0).unwrap();
        let high = flv.add_right_shoulder("very_desirable", 50.0, 75.0, 100.0).unwrap();
        (flv, low, mid, high)
    }

    #[test]
    fn test_range_follows_sets() {
        let (mut flv, ..) = desirability();
        assert_eq!(flv.range(), Some((0.0, 100.0)));
        flv.remove_set("undesirable").unwrap();
        assert_eq!(flv.range(), Some((25.0, 100.0)));
        flv.remove_set("desirable").unwrap();
        flv.remove_set("very_desirable").unwrap();
        assert_eq!(flv.range(), None);
    }

    #[test]
    fn test_remove_unknown_set() {
        let (mut flv, ..) = desirability();
        assert!(matches!(
            flv.remove_set("nope"),
            Err(FuzzyError::UnknownSet { .. })
        ));
    }

    #[test]
    fn test_add_replaces_same_name() {
        let (mut flv, ..) = desirability();
        flv.add_triangle("desirable", 30.0, 50.0, 70.0).unwrap();
        assert_eq!(flv.len(), 3);
        assert_eq!(
            flv.set("desirable").unwrap().shape(),
            crate::core::Shape::Triangle {
                left: 30.0,
                peak: 50.0,
                right: 70.0
            }
        );
    }

    #[test]
    fn test_fuzzify_scores_every_set() {
        let (flv, low, mid, high) = desirability();
        flv.fuzzify(37.5).unwrap();
        assert!((low.degree_of_membership() - 0.5).abs() < EPS);
        assert!((mid.degree_of_membership() - 0.5).abs() < EPS);
        assert_eq!(high.degree_of_membership(), 0.0);
        assert_eq!(flv.dominant_set().map(|(n, _)| n), Some("undesirable"));
    }

    #[test]
    fn test_fuzzify_out_of_range() {
        let (flv, ..) = desirability();
        let err = flv.fuzzify(120.0).unwrap_err();
        assert_eq!(
            err,
            FuzzyError::OutOfRange {
                variable: "desirability".to_string(),
                value: 120.0,
                min: 0.0,
                max: 100.0
            }
        );
        assert!(flv.fuzzify(f64::NAN).is_err());
    }

    #[test]
    fn test_fuzzify_empty_variable() {
        let flv = FuzzyVariable::new("empty");
        assert!(matches!(
            flv.fuzzify(1.0),
            Err(FuzzyError::EmptyVariable { .. })
        ));
    }

    #[test]
    fn test_max_av_all_zero() {
        let (flv, ..) = desirability();
        assert_eq!(flv.defuzzify_max_av(1e-9), 0.0);
        assert_eq!(flv.defuzzify_centroid(10).unwrap(), 0.0);
    }

    #[test]
    fn test_max_av_weighted() {
        let (flv, low, _, high) = desirability();
        low.update_degree_of_membership(0.2);
        high.update_degree_of_membership(0.6);
        // (12.5 × 0.2 + 87.5 × 0.6) / 0.8
        let expected = (12.5 * 0.2 + 87.5 * 0.6) / 0.8;
        assert!((flv.defuzzify_max_av(1e-9) - expected).abs() < EPS);
    }

    #[test]
    fn test_centroid_single_set() {
        let (flv, _, mid, _) = desirability();
        mid.update_degree_of_membership(1.0);
        // amostras 10, 20, ..., 100: triângulo simétrico em volta de 50
        let centroid = flv.defuzzify_centroid(10).unwrap();
        assert!((centroid - 50.0).abs() < EPS);
    }

    /// A curva combinada usa o máximo, não a soma, dos conjuntos.
    #[test]
    fn test_centroid_uses_pointwise_max() {
        let mut flv = FuzzyVariable::new("overlap");
        let a = flv.add_singleton("a", 0.0, 5.0, 10.0).unwrap();
        let b = flv.add_singleton("b", 0.0, 5.0, 10.0).unwrap();
        let c = flv.add_singleton("c", 5.0, 7.5, 10.0).unwrap();
        a.update_degree_of_membership(1.0);
        b.update_degree_of_membership(1.0);
        c.update_degree_of_membership(1.0);
        // c(x) = 1 em todas as amostras 1..=10, média = 5.5
        let centroid = flv.defuzzify_centroid(10).unwrap();
        assert!((centroid - 5.5).abs() < EPS);
    }

    #[test]
    fn test_centroid_zero_samples() {
        let (flv, ..) = desirability();
        assert!(flv.defuzzify_centroid(0).is_err());
    }

    /// Defuzzificar não altera os graus.
    #[test]
    fn test_defuzzify_is_repeatable() {
        let (flv, _, mid, high) = desirability();
        mid.update_degree_of_membership(0.4);
        high.update_degree_of_membership(0.9);
        let first = flv.defuzzify_centroid(20).unwrap();
        let second = flv.defuzzify_centroid(20).unwrap();
        assert_eq!(first, second);
        assert_eq!(flv.defuzzify_max_av(0.0), flv.defuzzify_max_av(0.0));
        assert_eq!(mid.degree_of_membership(), 0.4);
    }
}
