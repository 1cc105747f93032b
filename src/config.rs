//! # Configuração do Motor
//!
//! Parâmetros numéricos da defuzzificação. Cada agente pode carregar sua
//! própria [`FuzzyConfig`] (por exemplo de um JSON de balanceamento do jogo);
//! campos ausentes assumem os valores padrão.
//!
//! ```json
//! { "centroid_samples": 20, "default_method": "centroid" }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, FuzzyResult};
use crate::inference::DefuzzifyMethod;

/// Número padrão de amostras usadas pelo Centroid.
pub const DEFAULT_CENTROID_SAMPLES: usize = 10;

/// Grau mínimo para um conjunto contribuir no MaxAv.
pub const DEFAULT_MAX_AV_THRESHOLD: f64 = 1e-9;

/// Configuração de um [`FuzzyModule`](crate::FuzzyModule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Amostras distribuídas sobre `[min_range, max_range]` no Centroid.
    pub centroid_samples: usize,
    /// Conjuntos com grau `<=` a este valor não entram na média do MaxAv.
    pub max_av_threshold: f64,
    /// Método usado por [`FuzzyModule::defuzzify_default`](crate::FuzzyModule::defuzzify_default).
    pub default_method: DefuzzifyMethod,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            centroid_samples: DEFAULT_CENTROID_SAMPLES,
            max_av_threshold: DEFAULT_MAX_AV_THRESHOLD,
            default_method: DefuzzifyMethod::MaxAv,
        }
    }
}

impl FuzzyConfig {
    /// Carrega a configuração de um JSON, validando os valores.
    pub fn from_json(json: &str) -> FuzzyResult<Self> {
        let config: FuzzyConfig =
            serde_json::from_str(json).map_err(|e| FuzzyError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejeita `centroid_samples == 0` e thresholds negativos ou NaN.
    pub fn validate(&self) -> FuzzyResult<()> {
        if self.centroid_samples == 0 {
            return Err(FuzzyError::InvalidConfig {
                reason: "centroid_samples must be greater than zero".to_string(),
            });
        }
        if !(self.max_av_threshold >= 0.0) {
            return Err(FuzzyError::InvalidConfig {
                reason: format!("max_av_threshold must be >= 0, got {}", self.max_av_threshold),
            });
        }
        Ok(())
    }
}
