//! # FuzzySet — Conjunto Linguístico
//!
//! Um [`FuzzySet`] é um **rótulo linguístico** ("perto", "longe", "muito
//! desejável") definido por uma função de pertinência sobre o domínio
//! numérico de uma [`FuzzyVariable`](super::FuzzyVariable). É a folha da
//! árvore de expressões das regras.
//!
//! ## Formatos ([`Shape`])
//!
//! ```text
//!  LeftShoulder     RightShoulder      Triangle        Singleton       Normal
//!  ‾‾‾‾\                 /‾‾‾‾           /\              ┌┐             .-.
//!       \               /               /  \             ││            /   \
//!  L  P  R          L  P  R          L  P  R          L P R        L  P  R
//! ```
//!
//! Todos valem exatamente 1 no pico e 0 fora de `[left, right]`.
//!
//! ## Grau de Pertinência
//!
//! O campo `degree_of_membership` tem **dois papéis**: resultado da
//! fuzzificação (quando o conjunto é entrada) e acumulador das regras (quando
//! é saída). Um conjunto nunca exerce os dois papéis no mesmo ciclo.
//! Todo conjunto nasce com grau 0.
//!
//! ## Compartilhamento
//!
//! A FLV guarda o conjunto dentro de um [`SetRef`] (`Arc<RwLock<FuzzySet>>`);
//! as regras clonam o handle, nunca o conjunto. Assim várias regras podem
//! acumular no mesmo conjunto de saída.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};

use super::term::FuzzyTerm;
use crate::error::{FuzzyError, FuzzyResult};

/// Função de pertinência de um conjunto, parametrizada pelos limites.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// 1 em `[left, peak]`, rampa descendo até 0 em `right`.
    LeftShoulder { left: f64, peak: f64, right: f64 },
    /// Rampa subindo de `left` até 1 em `peak`, 1 até `right`.
    RightShoulder { left: f64, peak: f64, right: f64 },
    /// Rampa de `left` até `peak`, rampa de `peak` até `right`.
    Triangle { left: f64, peak: f64, right: f64 },
    /// 1 dentro da faixa de tolerância `[left, right]` em volta de `peak`.
    Singleton { left: f64, peak: f64, right: f64 },
    /// Gaussiana centrada em `peak`, normalizada para valer 1 no pico.
    Normal {
        left: f64,
        peak: f64,
        right: f64,
        std_dev: f64,
    },
}

impl Shape {
    /// Verifica `left <= peak <= right`, valores finitos e `std_dev > 0`.
    pub fn validate(&self) -> FuzzyResult<()> {
        let (left, peak, right) = self.points();
        if !(left.is_finite() && peak.is_finite() && right.is_finite()) {
            return Err(FuzzyError::InvalidShape {
                reason: format!("{self}: boundaries must be finite"),
            });
        }
        if left > peak || peak > right {
            return Err(FuzzyError::InvalidShape {
                reason: format!("{self}: expected left <= peak <= right"),
            });
        }
        if let Shape::Normal { std_dev, .. } = self {
            if !(std_dev.is_finite() && *std_dev > 0.0) {
                return Err(FuzzyError::InvalidShape {
                    reason: format!("{self}: std_dev must be positive"),
                });
            }
        }
        Ok(())
    }

    /// Retorna `(left, peak, right)`.
    pub fn points(&self) -> (f64, f64, f64) {
        match *self {
            Shape::LeftShoulder { left, peak, right }
            | Shape::RightShoulder { left, peak, right }
            | Shape::Triangle { left, peak, right }
            | Shape::Singleton { left, peak, right }
            | Shape::Normal {
                left, peak, right, ..
            } => (left, peak, right),
        }
    }

    /// Limite inferior do suporte.
    pub fn left(&self) -> f64 {
        self.points().0
    }

    /// Limite superior do suporte.
    pub fn right(&self) -> f64 {
        self.points().2
    }

    /// Valor crisp que representa o conjunto no MaxAv.
    ///
    /// Ombros usam o ponto médio do platô; os demais usam o pico.
    pub fn representative_value(&self) -> f64 {
        match *self {
            Shape::LeftShoulder { left, peak, .. } => (left + peak) / 2.0,
            Shape::RightShoulder { peak, right, .. } => (peak + right) / 2.0,
            Shape::Triangle { peak, .. }
            | Shape::Singleton { peak, .. }
            | Shape::Normal { peak, .. } => peak,
        }
    }

    /// Avalia a função de pertinência em `x`. Sempre em `[0, 1]`.
    ///
    /// Rampas degeneradas (`peak == left` ou `peak == right`) viram bordas
    /// verticais, sem divisão por zero.
    pub fn membership(&self, x: f64) -> f64 {
        let (left, _, right) = self.points();
        if !(x >= left && x <= right) {
            return 0.0;
        }
        let degree = match *self {
            Shape::LeftShoulder { peak, right, .. } => {
                if x <= peak {
                    1.0
                } else {
                    (right - x) / (right - peak)
                }
            }
            Shape::RightShoulder { left, peak, .. } => {
                if x >= peak {
                    1.0
                } else {
                    (x - left) / (peak - left)
                }
            }
            Shape::Triangle { left, peak, right } => {
                if x == peak {
                    1.0
                } else if x < peak {
                    (x - left) / (peak - left)
                } else {
                    (right - x) / (right - peak)
                }
            }
            Shape::Singleton { .. } => 1.0,
            Shape::Normal { peak, std_dev, .. } => {
                let z = (x - peak) / std_dev;
                (-0.5 * z * z).exp()
            }
        };
        degree.clamp(0.0, 1.0)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left, peak, right) = self.points();
        match self {
            Shape::LeftShoulder { .. } => write!(f, "left_shoulder({left}, {peak}, {right})"),
            Shape::RightShoulder { .. } => write!(f, "right_shoulder({left}, {peak}, {right})"),
            Shape::Triangle { .. } => write!(f, "triangle({left}, {peak}, {right})"),
            Shape::Singleton { .. } => write!(f, "singleton({left}, {peak}, {right})"),
            Shape::Normal { std_dev, .. } => {
                write!(f, "normal({left}, {peak}, {right}, σ={std_dev})")
            }
        }
    }
}

/// Conjunto fuzzy: um [`Shape`] mais o grau de pertinência corrente.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzySet {
    shape: Shape,
    degree_of_membership: f64,
}

impl FuzzySet {
    /// Cria o conjunto com grau 0, validando o formato.
    pub fn new(shape: Shape) -> FuzzyResult<Self> {
        shape.validate()?;
        Ok(Self {
            shape,
            degree_of_membership: 0.0,
        })
    }

    /// Ombro esquerdo: pertinência 1 até `peak`, caindo linearmente até `right`.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::InvalidShape`] se `left <= peak <= right` não vale ou
    /// algum ponto não é finito.
    pub fn left_shoulder(left: f64, peak: f64, right: f64) -> FuzzyResult<Self> {
        Self::new(Shape::LeftShoulder { left, peak, right })
    }

    /// Ombro direito: sobe de `left` até `peak` e fica em 1 até `right`.
    ///
    /// # Erros
    ///
    /// Mesmas regras de [`FuzzySet::left_shoulder`].
    pub fn right_shoulder(left: f64, peak: f64, right: f64) -> FuzzyResult<Self> {
        Self::new(Shape::RightShoulder { left, peak, right })
    }

    /// Triângulo com pertinência 1 apenas em `peak`.
    ///
    /// # Erros
    ///
    /// Mesmas regras de [`FuzzySet::left_shoulder`].
    pub fn triangle(left: f64, peak: f64, right: f64) -> FuzzyResult<Self> {
        Self::new(Shape::Triangle { left, peak, right })
    }

    /// Singleton: pertinência 1 em todo `[left, right]`.
    pub fn singleton(left: f64, peak: f64, right: f64) -> FuzzyResult<Self> {
        Self::new(Shape::Singleton { left, peak, right })
    }

    /// Gaussiana normalizada (1 em `peak`), zerada fora de `[left, right]`.
    ///
    /// # Erros
    ///
    /// [`FuzzyError::InvalidShape`] também quando `std_dev` não é positivo.
    pub fn normal(left: f64, peak: f64, right: f64, std_dev: f64) -> FuzzyResult<Self> {
        Self::new(Shape::Normal {
            left,
            peak,
            right,
            std_dev,
        })
    }

    /// Formato do conjunto (imutável depois da criação).
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn representative_value(&self) -> f64 {
        self.shape.representative_value()
    }

    pub fn degree_of_membership(&self) -> f64 {
        self.degree_of_membership
    }

    /// Avalia o formato em `x`, guarda o grau e o retorna.
    pub fn fuzzify(&mut self, x: f64) -> f64 {
        self.degree_of_membership = self.shape.membership(x);
        self.degree_of_membership
    }

    /// OR-acumula: `dom = max(dom, value)`. Nunca sobrescreve para baixo.
    pub fn update_degree_of_membership(&mut self, value: f64) {
        let value = value.clamp(0.0, 1.0);
        self.degree_of_membership = self.degree_of_membership.max(value);
    }

    pub fn clear_degree_of_membership(&mut self) {
        self.degree_of_membership = 0.0;
    }

    /// Restaura um grau salvo em snapshot.
    pub(crate) fn set_degree_of_membership(&mut self, value: f64) {
        self.degree_of_membership = value.clamp(0.0, 1.0);
    }
}

/// Handle compartilhado para um [`FuzzySet`].
///
/// A identidade do conjunto é a identidade do ponteiro: dois handles
/// apontam para o mesmo conjunto se [`same_set`](SetRef::same_set).
#[derive(Clone, Debug)]
pub struct SetRef(Arc<RwLock<FuzzySet>>);

impl SetRef {
    /// Embrulha um conjunto num handle novo, com identidade própria.
    pub fn new(set: FuzzySet) -> Self {
        Self(Arc::new(RwLock::new(set)))
    }

    pub fn same_set(&self, other: &SetRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Acesso de leitura ao conjunto.
    pub fn read(&self) -> RwLockReadGuard<'_, FuzzySet> {
        self.0.read()
    }

    pub fn shape(&self) -> Shape {
        self.0.read().shape
    }

    pub fn representative_value(&self) -> f64 {
        self.0.read().representative_value()
    }

    pub fn fuzzify(&self, x: f64) -> f64 {
        self.0.write().fuzzify(x)
    }

    pub(crate) fn restore_degree(&self, value: f64) {
        self.0.write().set_degree_of_membership(value);
    }

    /// Contribuição do conjunto ao Centroid: `min(shape(x), dom)`.
    pub(crate) fn clipped_membership(&self, x: f64) -> f64 {
        let set = self.0.read();
        set.shape.membership(x).min(set.degree_of_membership)
    }
}

impl FuzzyTerm for SetRef {
    fn degree_of_membership(&self) -> f64 {
        self.0.read().degree_of_membership
    }

    fn update_degree_of_membership(&self, value: f64) {
        self.0.write().update_degree_of_membership(value);
    }

    fn clear_degree_of_membership(&self) {
        self.0.write().clear_degree_of_membership();
    }
}

impl From<FuzzySet> for SetRef {
    fn from(set: FuzzySet) -> Self {
        SetRef::new(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_new_set_starts_at_zero() {
        let set = FuzzySet::triangle(0.0, 5.0, 10.0).unwrap();
        assert_eq!(set.degree_of_membership(), 0.0);
    }

    #[test]
    fn test_triangle_membership() {
        let shape = Shape::Triangle {
            left: 0.0,
            peak: 10.0,
            right: 30.0,
        };
        assert_eq!(shape.membership(10.0), 1.0);
        assert!((shape.membership(5.0) - 0.5).abs() < EPS);
        assert!((shape.membership(20.0) - 0.5).abs() < EPS);
        assert_eq!(shape.membership(0.0), 0.0);
        assert_eq!(shape.membership(30.0), 0.0);
        assert_eq!(shape.membership(-1.0), 0.0);
    }

    /// Pico colado na borda esquerda (ex: "munição baixa" = triângulo(0, 0, 10)).
    #[test]
    fn test_degenerate_triangle_has_no_nan() {
        let shape = Shape::Triangle {
            left: 0.0,
            peak: 0.0,
            right: 10.0,
        };
        assert_eq!(shape.membership(0.0), 1.0);
        assert!((shape.membership(5.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_shoulders() {
        let left = Shape::LeftShoulder {
            left: 0.0,
            peak: 25.0,
            right: 150.0,
        };
        assert_eq!(left.membership(10.0), 1.0);
        assert!((left.membership(87.5) - 0.5).abs() < EPS);
        assert_eq!(left.membership(150.0), 0.0);
        assert!((left.representative_value() - 12.5).abs() < EPS);

        let right = Shape::RightShoulder {
            left: 150.0,
            peak: 300.0,
            right: 1000.0,
        };
        assert_eq!(right.membership(100.0), 0.0);
        assert!((right.membership(225.0) - 0.5).abs() < EPS);
        assert_eq!(right.membership(900.0), 1.0);
        assert!((right.representative_value() - 650.0).abs() < EPS);
    }

    #[test]
    fn test_singleton_band() {
        let shape = Shape::Singleton {
            left: 9.0,
            peak: 10.0,
            right: 11.0,
        };
        assert_eq!(shape.membership(9.5), 1.0);
        assert_eq!(shape.membership(11.5), 0.0);
        assert_eq!(shape.representative_value(), 10.0);
    }

    #[test]
    fn test_normal_peaks_at_one() {
        let shape = Shape::Normal {
            left: 0.0,
            peak: 50.0,
            right: 100.0,
            std_dev: 10.0,
        };
        assert_eq!(shape.membership(50.0), 1.0);
        let one_sigma = shape.membership(60.0);
        assert!((one_sigma - (-0.5f64).exp()).abs() < EPS);
        assert_eq!(shape.membership(101.0), 0.0);
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(FuzzySet::triangle(10.0, 5.0, 20.0).is_err());
        assert!(FuzzySet::left_shoulder(0.0, f64::NAN, 1.0).is_err());
        assert!(FuzzySet::normal(0.0, 1.0, 2.0, 0.0).is_err());
    }

    /// Atualizações múltiplas combinam por máximo (OR).
    #[test]
    fn test_update_accumulates_max() {
        let mut set = FuzzySet::triangle(0.0, 5.0, 10.0).unwrap();
        set.update_degree_of_membership(0.4);
        set.update_degree_of_membership(0.2);
        assert_eq!(set.degree_of_membership(), 0.4);
        set.update_degree_of_membership(0.7);
        assert_eq!(set.degree_of_membership(), 0.7);
        set.clear_degree_of_membership();
        assert_eq!(set.degree_of_membership(), 0.0);
    }

    #[test]
    fn test_fuzzify_at_peak_is_one() {
        let mut set = FuzzySet::triangle(25.0, 150.0, 300.0).unwrap();
        assert_eq!(set.fuzzify(150.0), 1.0);
        assert_eq!(set.degree_of_membership(), 1.0);
    }

    #[test]
    fn test_set_ref_identity() {
        let a = SetRef::new(FuzzySet::triangle(0.0, 1.0, 2.0).unwrap());
        let b = a.clone();
        let c = SetRef::new(FuzzySet::triangle(0.0, 1.0, 2.0).unwrap());
        assert!(a.same_set(&b));
        assert!(!a.same_set(&c));
        b.fuzzify(1.0);
        assert_eq!(a.read().degree_of_membership(), 1.0);
    }
}
