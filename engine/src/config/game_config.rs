use serde::{Deserialize, Serialize};

use super::Validate;
use crate::error::{ensure_non_negative, ensure_positive};
use crate::event::GrowthPolicy;
use crate::math::Vector3;
use crate::scheduler::{DEFAULT_LOGIC_FREQUENCY_HZ, DEFAULT_RENDER_FREQUENCY_HZ};
use crate::world::{SnakeParams, Terrain};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TerrainConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
        }
    }
}

impl Validate for TerrainConfig {
    fn validate(&self) -> Result<(), String> {
        Terrain::new(self.width, self.height).map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FoodConfig {
    pub radius: f64,
    pub padding: f64,
    pub initial_position: Vector3,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            radius: 0.25,
            padding: 2.0,
            initial_position: Vector3::new(3.0, 0.25, -3.0),
        }
    }
}

impl Validate for FoodConfig {
    fn validate(&self) -> Result<(), String> {
        ensure_positive("food radius", self.radius).map_err(|e| e.to_string())?;
        ensure_non_negative("food padding", self.padding).map_err(|e| e.to_string())?;
        if !self.initial_position.is_finite() {
            return Err("food initial_position must be finite".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoopConfig {
    pub logic_frequency_hz: f64,
    pub render_frequency_hz: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            logic_frequency_hz: DEFAULT_LOGIC_FREQUENCY_HZ,
            render_frequency_hz: DEFAULT_RENDER_FREQUENCY_HZ,
        }
    }
}

impl Validate for LoopConfig {
    fn validate(&self) -> Result<(), String> {
        ensure_positive("logic_frequency_hz", self.logic_frequency_hz).map_err(|e| e.to_string())?;
        ensure_positive("render_frequency_hz", self.render_frequency_hz).map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub terrain: TerrainConfig,
    pub snake: SnakeParams,
    pub food: FoodConfig,
    pub growth: GrowthPolicy,
    pub loops: LoopConfig,
    pub reset_speed_on_reset: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainConfig::default(),
            snake: SnakeParams {
                position: Vector3::new(0.0, 0.25, 0.0),
                init_length: 5,
                ..SnakeParams::default()
            },
            food: FoodConfig::default(),
            growth: GrowthPolicy::default(),
            loops: LoopConfig::default(),
            reset_speed_on_reset: true,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        self.terrain.validate()?;
        self.snake.validate().map_err(|e| e.to_string())?;
        self.food.validate()?;
        self.loops.validate()?;

        if self.growth.factor.is_nan() || self.growth.factor < 1.0 {
            return Err(format!("growth factor must be at least 1, got {}", self.growth.factor));
        }
        if let Some(max_speed) = self.growth.max_speed
            && (max_speed.is_nan() || max_speed < self.snake.speed)
        {
            return Err(format!(
                "growth max_speed {} is below the initial speed {}",
                max_speed, self.snake.speed
            ));
        }

        let terrain = Terrain::new(self.terrain.width, self.terrain.height).map_err(|e| e.to_string())?;
        terrain
            .padded_ranges(self.food.padding)
            .map_err(|e| format!("food padding {} leaves no room on the terrain: {}", self.food.padding, e))?;
        Ok(())
    }
}
