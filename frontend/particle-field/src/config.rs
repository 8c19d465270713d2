use serde::Deserialize;
use std::fmt;

/// Upper bound on the particle count. Links are found with an all-pairs scan every
/// frame, so the per-frame cost grows with the square of this number.
pub const MAX_PARTICLES: usize = 2_000;

pub const DEFAULT_PARTICLE_COUNT: usize = 50;
pub const DEFAULT_CONNECTION_DISTANCE: f32 = 150.0;
pub const DEFAULT_MAX_LINK_OPACITY: f32 = 0.1;
pub const DEFAULT_COLOR: [u8; 3] = [0, 212, 255];

/// Tunables of the particle field, as handed over by the page.
///
/// Any key missing from the JSON keeps its default, so `{}` is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub connection_distance: f32,
    /// Stroke opacity of a link between two coincident particles.
    pub max_link_opacity: f32,
    pub color: [u8; 3],
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            connection_distance: DEFAULT_CONNECTION_DISTANCE,
            max_link_opacity: DEFAULT_MAX_LINK_OPACITY,
            color: DEFAULT_COLOR,
        }
    }
}

impl FieldConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count > MAX_PARTICLES {
            return Err(ConfigError::TooManyParticles(self.particle_count));
        }
        if !self.connection_distance.is_finite() || self.connection_distance <= 0.0 {
            return Err(ConfigError::InvalidConnectionDistance(
                self.connection_distance,
            ));
        }
        if !(0.0..=1.0).contains(&self.max_link_opacity) {
            return Err(ConfigError::InvalidLinkOpacity(self.max_link_opacity));
        }
        Ok(())
    }

    /// Colour packed as `0xRRGGBB`.
    pub fn packed_color(&self) -> u32 {
        let [r, g, b] = self.color;
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }
}

/// Reasons a [`FieldConfig`] is rejected.
#[derive(Debug)]
pub enum ConfigError {
    /// The config text is not valid JSON for a field config.
    Json(serde_json::Error),
    TooManyParticles(usize),
    InvalidConnectionDistance(f32),
    InvalidLinkOpacity(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Failed to parse field config: {}", e),
            ConfigError::TooManyParticles(count) => write!(
                f,
                "Particle count {} exceeds the maximum of {}",
                count, MAX_PARTICLES
            ),
            ConfigError::InvalidConnectionDistance(distance) => write!(
                f,
                "Connection distance must be a positive finite number, got {}",
                distance
            ),
            ConfigError::InvalidLinkOpacity(opacity) => write!(
                f,
                "Link opacity must lie in [0, 1], got {}",
                opacity
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
