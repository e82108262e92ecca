// 该文件是 Wuding （屋顶） 项目的一部分。
// src/analysis.rs - 面积到投资回报的快速估算
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

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DERATE_FACTOR: f64 = 0.85;
const ANNUAL_YIELD_PER_KW: f64 = 1200.0;
const LIFETIME_YEARS: f64 = 25.0;

pub const DEFAULT_PANEL_EFFICIENCY: f64 = 0.18;
pub const DEFAULT_PRICE_PER_WATT: f64 = 45.0;

#[derive(Error, Debug, PartialEq)]
pub enum AnalysisError {
  #[error("面积无效: {0}（必须为有限的非负数）")]
  InvalidArea(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiParams {
  pub panel_efficiency: f64,
  pub price_per_watt: f64,
}

impl Default for RoiParams {
  fn default() -> Self {
    Self {
      panel_efficiency: DEFAULT_PANEL_EFFICIENCY,
      price_per_watt: DEFAULT_PRICE_PER_WATT,
    }
  }
}

/// 25 年不折现的成本、节省与净收益，均保留两位小数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiEstimate {
  pub cost: f64,
  pub savings: f64,
  pub roi: f64,
}

fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}

/// 由面积（平方米）估算成本、寿命期节省和净收益
pub fn estimate_roi(area_m2: f64, params: &RoiParams) -> Result<RoiEstimate, AnalysisError> {
  if !area_m2.is_finite() || area_m2 < 0.0 {
    return Err(AnalysisError::InvalidArea(area_m2));
  }

  let kw_possible = area_m2 * params.panel_efficiency * DERATE_FACTOR;
  let cost = kw_possible * 1000.0 * params.price_per_watt;
  let savings = kw_possible * ANNUAL_YIELD_PER_KW * LIFETIME_YEARS;

  Ok(RoiEstimate {
    cost: round2(cost),
    savings: round2(savings),
    roi: round2(savings - cost),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  #[test]
  fn hundred_square_metres_with_defaults() {
    let estimate = estimate_roi(100.0, &RoiParams::default()).unwrap();
    assert_relative_eq!(estimate.cost, 688_500.0, epsilon = 1e-6);
    assert_relative_eq!(estimate.savings, 459_000.0, epsilon = 1e-6);
    assert_relative_eq!(estimate.roi, -229_500.0, epsilon = 1e-6);
  }

  #[test]
  fn zero_area_yields_zeros() {
    let estimate = estimate_roi(0.0, &RoiParams::default()).unwrap();
    assert_eq!(estimate.cost, 0.0);
    assert_eq!(estimate.savings, 0.0);
    assert_eq!(estimate.roi, 0.0);
  }

  #[test]
  fn rejects_negative_and_non_finite_area() {
    assert_eq!(
      estimate_roi(-1.0, &RoiParams::default()),
      Err(AnalysisError::InvalidArea(-1.0))
    );
    assert!(estimate_roi(f64::NAN, &RoiParams::default()).is_err());
    assert!(estimate_roi(f64::INFINITY, &RoiParams::default()).is_err());
  }

  #[test]
  fn results_are_rounded_to_cents() {
    let params = RoiParams {
      panel_efficiency: 0.2,
      price_per_watt: 1.0,
    };
    // kw = 1.234 * 0.2 * 0.85 = 0.20978
    let estimate = estimate_roi(1.234, &params).unwrap();
    assert_relative_eq!(estimate.cost, 209.78, epsilon = 1e-9);
    assert_relative_eq!(estimate.savings, 6293.4, epsilon = 1e-9);
    assert_relative_eq!(estimate.roi, 6083.62, epsilon = 1e-9);
  }
}
