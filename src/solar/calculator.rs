// 该文件是 Wuding （屋顶） 项目的一部分。
// src/solar/calculator.rs - 光伏系统规模与收益计算
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
use tracing::debug;

use super::{
  ELECTRICITY_RATE_DEFAULT, INSTALLATION_COST_PER_WATT, PEAK_SUN_HOURS_DEFAULT,
  STANDARD_PANEL_AREA, STANDARD_PANEL_WATTAGE, SYSTEM_EFFICIENCY,
};

/// 屋顶可容纳的组件数量，面积单位为平方英尺
///
/// 负数或 NaN 面积按 0 处理。
pub fn panel_count(usable_area_sqft: f64) -> u64 {
  if usable_area_sqft.is_nan() || usable_area_sqft <= 0.0 {
    return 0;
  }
  (usable_area_sqft / STANDARD_PANEL_AREA).floor() as u64
}

/// 系统容量（kW）
pub fn system_size(panel_count: u64) -> f64 {
  panel_count as f64 * STANDARD_PANEL_WATTAGE / 1000.0
}

/// 年发电量（kWh）
pub fn annual_production(system_size_kw: f64, peak_sun_hours: f64) -> f64 {
  let daily_production = system_size_kw * peak_sun_hours * SYSTEM_EFFICIENCY;
  daily_production * 365.0
}

/// 安装总成本
pub fn installation_cost(system_size_kw: f64) -> f64 {
  system_size_kw * 1000.0 * INSTALLATION_COST_PER_WATT
}

/// 每年节省的电费
pub fn annual_savings(annual_production_kwh: f64, electricity_rate: f64) -> f64 {
  annual_production_kwh * electricity_rate
}

/// 简单回收期（年），节省为非正数时返回正无穷
pub fn payback_period(installation_cost: f64, annual_savings: f64) -> f64 {
  if annual_savings <= 0.0 {
    return f64::INFINITY;
  }
  installation_cost / annual_savings
}

/// 投资回报率（%），成本为非正数时返回 0
pub fn roi(annual_savings: f64, installation_cost: f64) -> f64 {
  if installation_cost <= 0.0 {
    return 0.0;
  }
  annual_savings / installation_cost * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemSizing {
  pub panel_count: u64,
  pub system_size_kw: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialEstimate {
  pub installation_cost: f64,
  pub annual_production_kwh: f64,
  pub annual_savings: f64,
  /// 节省为非正数时为正无穷，序列化为 null
  pub payback_years: f64,
  pub roi_percent: f64,
}

/// 带可配置日照与电价的计算器
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarCalculator {
  pub peak_sun_hours: f64,
  pub electricity_rate: f64,
}

impl Default for SolarCalculator {
  fn default() -> Self {
    Self {
      peak_sun_hours: PEAK_SUN_HOURS_DEFAULT,
      electricity_rate: ELECTRICITY_RATE_DEFAULT,
    }
  }
}

impl SolarCalculator {
  pub fn with_peak_sun_hours(mut self, peak_sun_hours: f64) -> Self {
    self.peak_sun_hours = peak_sun_hours;
    self
  }

  pub fn with_electricity_rate(mut self, electricity_rate: f64) -> Self {
    self.electricity_rate = electricity_rate;
    self
  }

  pub fn size_system(&self, usable_area_sqft: f64) -> SystemSizing {
    let panel_count = panel_count(usable_area_sqft);
    let system_size_kw = system_size(panel_count);
    debug!(
      "可用面积 {:.2} 平方英尺, 组件 {} 块, 容量 {:.2} kW",
      usable_area_sqft, panel_count, system_size_kw
    );
    SystemSizing {
      panel_count,
      system_size_kw,
    }
  }

  pub fn estimate(&self, sizing: &SystemSizing) -> FinancialEstimate {
    let annual_production_kwh = annual_production(sizing.system_size_kw, self.peak_sun_hours);
    let installation_cost = installation_cost(sizing.system_size_kw);
    let annual_savings = annual_savings(annual_production_kwh, self.electricity_rate);

    FinancialEstimate {
      installation_cost,
      annual_production_kwh,
      annual_savings,
      payback_years: payback_period(installation_cost, annual_savings),
      roi_percent: roi(annual_savings, installation_cost),
    }
  }
}
