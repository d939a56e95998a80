use serde::{Deserialize, Serialize};

/// A named orthogonalizable factor. Order matters: index 0 is always the
/// protected base in the orthogonalization pipeline (spec.md §4.4/§4.5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactorKind {
    MomentumCore,
    Technical,
    Volume,
    Quality,
}

/// Raw (pre-orthogonalization) per-symbol factor inputs for one tick.
///
/// `social` is intentionally excluded from the orthogonalizable set: it
/// never enters Gram-Schmidt and never enters the internal score (spec.md
/// §4.5 step 2).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactorBundle {
    pub momentum_core: f64,
    pub technical: f64,
    pub volume: f64,
    pub quality: f64,
    pub social: f64,
    pub brand: f64,
}

impl FactorBundle {
    /// The protected-base-first ordered vector Gram-Schmidt consumes:
    /// `[momentum_core, technical, volume, quality]`.
    pub fn orthogonalizable_vector(&self) -> [f64; 4] {
        [self.momentum_core, self.technical, self.volume, self.quality]
    }

    pub fn from_orthogonalizable_vector(mut self, v: [f64; 4]) -> Self {
        self.momentum_core = v[0];
        self.technical = v[1];
        self.volume = v[2];
        self.quality = v[3];
        self
    }
}

/// Residualized factor vector produced by the orthogonalizer (C5), in the
/// same `[momentum_core, technical, volume, quality]` order as the input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResidualFactors {
    pub momentum_core: f64,
    pub technical_resid: f64,
    pub volume_resid: f64,
    pub quality_resid: f64,
}

impl ResidualFactors {
    pub fn from_vector(v: [f64; 4]) -> Self {
        Self {
            momentum_core: v[0],
            technical_resid: v[1],
            volume_resid: v[2],
            quality_resid: v[3],
        }
    }

    pub fn as_vector(&self) -> [f64; 4] {
        [
            self.momentum_core,
            self.technical_resid,
            self.volume_resid,
            self.quality_resid,
        ]
    }
}
