// 该文件是 Wuding （屋顶） 项目的一部分。
// src/config.rs - 分析参数配置
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

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
  analysis::RoiParams,
  segment::DEFAULT_PIXEL_AREA_M2,
  solar::{RoofInput, SolarCalculator},
};

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("配置解析错误: {0}")]
  ParseError(#[from] serde_json::Error),
  #[error("配置项 {0} 无效: {1}")]
  Invalid(&'static str, f64),
  #[error("屋顶倾角无效: {0}（须在 0 到 90 度之间）")]
  InvalidTilt(f64),
}

/// 一次分析所需的全部参数，可由 JSON 文件加载，缺省字段取默认值
///
/// ```json
/// {
///   "pixel_area_m2": 0.25,
///   "roi": { "panel_efficiency": 0.18, "price_per_watt": 45 },
///   "calculator": { "peak_sun_hours": 5.0, "electricity_rate": 0.12 },
///   "roof": { "orientation": "south", "shading": "low", "tilt_angle": 30 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
  /// 每像素面积（平方米）
  pub pixel_area_m2: f64,
  pub roi: RoiParams,
  pub calculator: SolarCalculator,
  /// 屋顶属性；可用面积由分割结果填充
  pub roof: RoofInput,
}

impl Default for AnalysisConfig {
  fn default() -> Self {
    Self {
      pixel_area_m2: DEFAULT_PIXEL_AREA_M2,
      roi: RoiParams::default(),
      calculator: SolarCalculator::default(),
      roof: RoofInput::default(),
    }
  }
}

impl AnalysisConfig {
  pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    info!("读取配置文件: {}", path.display());
    let text = std::fs::read_to_string(path)?;
    let config: AnalysisConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    let checks = [
      ("pixel_area_m2", self.pixel_area_m2),
      ("roi.panel_efficiency", self.roi.panel_efficiency),
      ("roi.price_per_watt", self.roi.price_per_watt),
      ("calculator.peak_sun_hours", self.calculator.peak_sun_hours),
      ("calculator.electricity_rate", self.calculator.electricity_rate),
    ];
    for (name, value) in checks {
      if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid(name, value));
      }
    }

    let tilt = self.roof.tilt_angle;
    if !(0.0..=90.0).contains(&tilt) {
      return Err(ConfigError::InvalidTilt(tilt));
    }
    Ok(())
  }
}
