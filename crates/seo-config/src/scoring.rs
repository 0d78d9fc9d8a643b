use crate::env::{EnvConfigLoader, EnvError};

/// The five weights the scorer combines per-dimension scores with. Must sum
/// to 1.0 — a mismatched set is a configuration error, not something the
/// loader silently renormalizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub technical: f64,
    pub content: f64,
    pub authority: f64,
    pub linking: f64,
    pub ai_visibility: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            technical: 0.35,
            content: 0.30,
            authority: 0.20,
            linking: 0.10,
            ai_visibility: 0.05,
        }
    }
}

impl ScoreWeights {
    pub fn from_env() -> Result<Self, EnvError> {
        let defaults = Self::default();
        let loader = EnvConfigLoader::new()
            .with_prefix("SCORE_")
            .default("technical_weight", defaults.technical.to_string())
            .default("content_weight", defaults.content.to_string())
            .default("authority_weight", defaults.authority.to_string())
            .default("linking_weight", defaults.linking.to_string())
            .default("ai_visibility_weight", defaults.ai_visibility.to_string());

        let weights = Self {
            technical: loader.get_f64("technical_weight")?,
            content: loader.get_f64("content_weight")?,
            authority: loader.get_f64("authority_weight")?,
            linking: loader.get_f64("linking_weight")?,
            ai_visibility: loader.get_f64("ai_visibility_weight")?,
        };
        weights.validate()?;
        Ok(weights)
    }

    fn validate(&self) -> Result<(), EnvError> {
        let sum = self.technical + self.content + self.authority + self.linking + self.ai_visibility;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(EnvError::InvalidValue {
                var: "SCORE_*_WEIGHT".to_string(),
                reason: format!("weights must sum to 1.0, got {sum}"),
            });
        }
        Ok(())
    }

    pub fn overall(&self, technical: f64, content: f64, authority: f64, linking: f64, ai_visibility: f64) -> f64 {
        self.technical * technical
            + self.content * content
            + self.authority * authority
            + self.linking * linking
            + self.ai_visibility * ai_visibility
    }
}
