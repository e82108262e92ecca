// 该文件是 Wuding （屋顶） 项目的一部分。
// src/solar/suitability.rs - 屋顶适宜度评分
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BASE_SCORE: i32 = 5;
const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 10;
const DEFAULT_TILT_ANGLE: f64 = 30.0;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseRoofError {
  #[error("未知的屋顶朝向: {0}")]
  Orientation(String),
  #[error("未知的遮挡程度: {0}")]
  Shading(String),
  #[error("未知的屋顶状况: {0}")]
  Condition(String),
}

/// 屋顶朝向，按优先级互斥
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
  South,
  EastWest,
  #[default]
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShadingLevel {
  Low,
  #[default]
  Medium,
  High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoofCondition {
  Poor,
  Fair,
  #[default]
  Good,
  Excellent,
}

impl FromStr for Orientation {
  type Err = ParseRoofError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "south" | "s" => Ok(Orientation::South),
      "east-west" | "east_west" | "east" | "west" | "ew" => Ok(Orientation::EastWest),
      "other" | "north" | "none" => Ok(Orientation::Other),
      _ => Err(ParseRoofError::Orientation(s.to_string())),
    }
  }
}

impl FromStr for ShadingLevel {
  type Err = ParseRoofError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "low" => Ok(ShadingLevel::Low),
      "medium" => Ok(ShadingLevel::Medium),
      "high" => Ok(ShadingLevel::High),
      _ => Err(ParseRoofError::Shading(s.to_string())),
    }
  }
}

impl FromStr for RoofCondition {
  type Err = ParseRoofError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "poor" => Ok(RoofCondition::Poor),
      "fair" => Ok(RoofCondition::Fair),
      "good" => Ok(RoofCondition::Good),
      "excellent" => Ok(RoofCondition::Excellent),
      _ => Err(ParseRoofError::Condition(s.to_string())),
    }
  }
}

impl fmt::Display for Orientation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Orientation::South => "south",
      Orientation::EastWest => "east-west",
      Orientation::Other => "other",
    })
  }
}

impl fmt::Display for ShadingLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      ShadingLevel::Low => "low",
      ShadingLevel::Medium => "medium",
      ShadingLevel::High => "high",
    })
  }
}

impl fmt::Display for RoofCondition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      RoofCondition::Poor => "poor",
      RoofCondition::Fair => "fair",
      RoofCondition::Good => "good",
      RoofCondition::Excellent => "excellent",
    })
  }
}

/// 单次评估的屋顶描述
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofInput {
  /// 可用面积（平方英尺）
  pub usable_area_sqft: f64,
  pub orientation: Orientation,
  pub shading: ShadingLevel,
  pub condition: RoofCondition,
  /// 屋顶倾角（度）
  pub tilt_angle: f64,
}

impl Default for RoofInput {
  fn default() -> Self {
    Self {
      usable_area_sqft: 0.0,
      orientation: Orientation::default(),
      shading: ShadingLevel::default(),
      condition: RoofCondition::default(),
      tilt_angle: DEFAULT_TILT_ANGLE,
    }
  }
}

impl RoofInput {
  pub fn with_area(mut self, usable_area_sqft: f64) -> Self {
    self.usable_area_sqft = usable_area_sqft;
    self
  }
}

/// 1 到 10 的适宜度评分
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SuitabilityScore(u8);

impl SuitabilityScore {
  pub fn value(self) -> u8 {
    self.0
  }

  fn clamped(score: i32) -> Self {
    SuitabilityScore(score.clamp(MIN_SCORE, MAX_SCORE) as u8)
  }
}

impl fmt::Display for SuitabilityScore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/10", self.0)
  }
}

fn orientation_adjustment(orientation: Orientation) -> i32 {
  match orientation {
    Orientation::South => 2,
    Orientation::EastWest => 1,
    Orientation::Other => 0,
  }
}

fn shading_adjustment(shading: ShadingLevel) -> i32 {
  match shading {
    ShadingLevel::Low => 2,
    ShadingLevel::Medium => 0,
    ShadingLevel::High => -2,
  }
}

fn condition_adjustment(condition: RoofCondition) -> i32 {
  match condition {
    RoofCondition::Excellent => 1,
    RoofCondition::Good => 0,
    RoofCondition::Fair => -1,
    RoofCondition::Poor => -2,
  }
}

// (15, 25) 与 (45, 60) 区间不加不减
fn tilt_adjustment(tilt_angle: f64) -> i32 {
  if (25.0..=45.0).contains(&tilt_angle) {
    1
  } else if tilt_angle < 15.0 || tilt_angle > 60.0 {
    -1
  } else {
    0
  }
}

/// 加法启发式评分，基础分 5，最终限制在 [1, 10]
pub fn assess_roof_suitability(roof: &RoofInput) -> SuitabilityScore {
  let score = BASE_SCORE
    + orientation_adjustment(roof.orientation)
    + shading_adjustment(roof.shading)
    + condition_adjustment(roof.condition)
    + tilt_adjustment(roof.tilt_angle);
  SuitabilityScore::clamped(score)
}
