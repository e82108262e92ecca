// 该文件是 Wuding （屋顶） 项目的一部分。
// src/solar/reference.rs - 静态参考数据
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

use serde::Serialize;

// 电网平均排放，磅 CO2 / kWh
const GRID_CO2_LBS_PER_KWH: f64 = 0.85;

const MAINTENANCE_SCHEDULE: [&str; 6] = [
  "Annual system inspection",
  "Panel cleaning (2-4 times per year)",
  "Inverter monitoring and maintenance",
  "Electrical connection checks",
  "Performance monitoring",
  "Warranty compliance checks",
];

const INSTALLATION_REQUIREMENTS: [&str; 6] = [
  "Structural engineering assessment",
  "Electrical permit and inspection",
  "Utility interconnection agreement",
  "Local building permits",
  "HOA approval (if applicable)",
  "Professional installation by certified technicians",
];

const FEDERAL_TAX_CREDIT: TaxCredit = TaxCredit {
  percentage: 30,
  description: "Federal Solar Investment Tax Credit (ITC)",
  valid_through: "2032 (then steps down)",
  note: "Consult tax professional for eligibility",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxCredit {
  pub percentage: u8,
  pub description: &'static str,
  pub valid_through: &'static str,
  pub note: &'static str,
}

pub fn maintenance_schedule() -> &'static [&'static str] {
  &MAINTENANCE_SCHEDULE
}

pub fn installation_requirements() -> &'static [&'static str] {
  &INSTALLATION_REQUIREMENTS
}

/// 每年减少的 CO2 排放（磅）
pub fn estimate_carbon_offset(annual_production_kwh: f64) -> f64 {
  annual_production_kwh * GRID_CO2_LBS_PER_KWH
}

pub fn federal_tax_credit() -> TaxCredit {
  FEDERAL_TAX_CREDIT
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  #[test]
  fn carbon_offset_is_linear() {
    assert_relative_eq!(estimate_carbon_offset(1000.0), 850.0, epsilon = 1e-9);
    assert_eq!(estimate_carbon_offset(0.0), 0.0);
  }

  #[test]
  fn reference_lists_have_six_entries() {
    assert_eq!(maintenance_schedule().len(), 6);
    assert_eq!(installation_requirements().len(), 6);
    assert_eq!(maintenance_schedule()[0], "Annual system inspection");
    assert_eq!(
      installation_requirements()[5],
      "Professional installation by certified technicians"
    );
  }

  #[test]
  fn tax_credit_is_thirty_percent() {
    let credit = federal_tax_credit();
    assert_eq!(credit.percentage, 30);
    assert_eq!(credit.valid_through, "2032 (then steps down)");
  }
}
