// 该文件是 Wuding （屋顶） 项目的一部分。
// src/args.rs - 命令行参数配置
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

use std::path::PathBuf;

use clap::Args;

use crate::{
  config::{AnalysisConfig, ConfigError},
  solar::{Orientation, RoofCondition, ShadingLevel},
};

/// 估算参数；命令行给出的值覆盖配置文件
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
  /// JSON 配置文件路径
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// 每像素面积（平方米）
  #[arg(long, value_name = "M2")]
  pub pixel_area: Option<f64>,

  /// 组件效率 (0.0 - 1.0)
  #[arg(long, value_name = "RATIO")]
  pub panel_efficiency: Option<f64>,

  /// 每瓦价格
  #[arg(long, value_name = "PRICE")]
  pub price_per_watt: Option<f64>,

  /// 日均峰值日照小时数
  #[arg(long, value_name = "HOURS")]
  pub peak_sun_hours: Option<f64>,

  /// 电价（美元/千瓦时）
  #[arg(long, value_name = "RATE")]
  pub electricity_rate: Option<f64>,

  /// 屋顶朝向: south, east-west, other
  #[arg(long, value_name = "ORIENTATION")]
  pub orientation: Option<Orientation>,

  /// 遮挡程度: low, medium, high
  #[arg(long, value_name = "LEVEL")]
  pub shading: Option<ShadingLevel>,

  /// 屋顶状况: poor, fair, good, excellent
  #[arg(long, value_name = "CONDITION")]
  pub condition: Option<RoofCondition>,

  /// 屋顶倾角（度）
  #[arg(long, value_name = "DEGREES")]
  pub tilt_angle: Option<f64>,
}

impl AnalysisArgs {
  /// 读取配置文件（若有），再应用命令行覆盖项并校验
  pub fn load_config(&self) -> Result<AnalysisConfig, ConfigError> {
    let mut config = match &self.config {
      Some(path) => AnalysisConfig::from_json_file(path)?,
      None => AnalysisConfig::default(),
    };

    if let Some(pixel_area) = self.pixel_area {
      config.pixel_area_m2 = pixel_area;
    }
    if let Some(efficiency) = self.panel_efficiency {
      config.roi.panel_efficiency = efficiency;
    }
    if let Some(price) = self.price_per_watt {
      config.roi.price_per_watt = price;
    }
    if let Some(hours) = self.peak_sun_hours {
      config.calculator.peak_sun_hours = hours;
    }
    if let Some(rate) = self.electricity_rate {
      config.calculator.electricity_rate = rate;
    }
    if let Some(orientation) = self.orientation {
      config.roof.orientation = orientation;
    }
    if let Some(shading) = self.shading {
      config.roof.shading = shading;
    }
    if let Some(condition) = self.condition {
      config.roof.condition = condition;
    }
    if let Some(tilt) = self.tilt_angle {
      config.roof.tilt_angle = tilt;
    }

    config.validate()?;
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::Parser;

  #[derive(Parser)]
  struct Cli {
    #[command(flatten)]
    analysis: AnalysisArgs,
  }

  #[test]
  fn overrides_apply_on_defaults() {
    let cli = Cli::parse_from([
      "wuding",
      "--pixel-area",
      "1.0",
      "--orientation",
      "east-west",
      "--electricity-rate",
      "0.2",
    ]);
    let config = cli.analysis.load_config().unwrap();
    assert_eq!(config.pixel_area_m2, 1.0);
    assert_eq!(config.roof.orientation, Orientation::EastWest);
    assert_eq!(config.calculator.electricity_rate, 0.2);
    assert_eq!(config.calculator.peak_sun_hours, 5.0);
  }

  #[test]
  fn invalid_override_is_rejected() {
    let args = AnalysisArgs {
      price_per_watt: Some(f64::NAN),
      ..AnalysisArgs::default()
    };
    assert!(args.load_config().is_err());
  }

  #[test]
  fn nan_tilt_is_rejected() {
    let cli = Cli::parse_from(["wuding", "--tilt-angle", "NaN"]);
    assert!(matches!(
      cli.analysis.load_config(),
      Err(ConfigError::InvalidTilt(_))
    ));
  }

  #[test]
  fn unknown_orientation_fails_to_parse() {
    assert!(Cli::try_parse_from(["wuding", "--orientation", "up"]).is_err());
  }
}
