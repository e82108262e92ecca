// 该文件是 Wuding （屋顶） 项目的一部分。
// src/solar.rs - 光伏计算
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

//! # 光伏行业常用计算
//!
//! 组件数量、系统容量、年发电量、安装成本、节省电费、回收期、投资回报率，
//! 以及屋顶适宜度评分和若干静态参考数据。所有函数均为纯函数。

/// 单块组件额定功率（W）
pub const STANDARD_PANEL_WATTAGE: f64 = 300.0;
/// 单块组件占地面积（平方英尺）
pub const STANDARD_PANEL_AREA: f64 = 17.5;
/// 安装成本（$/W）
pub const INSTALLATION_COST_PER_WATT: f64 = 3.0;
/// 系统综合效率
pub const SYSTEM_EFFICIENCY: f64 = 0.85;
/// 默认峰值日照小时数
pub const PEAK_SUN_HOURS_DEFAULT: f64 = 5.0;
/// 默认电价（$/kWh）
pub const ELECTRICITY_RATE_DEFAULT: f64 = 0.12;

/// 每平方米对应的平方英尺
pub const SQFT_PER_M2: f64 = 10.7639;

mod calculator;
mod reference;
mod suitability;

pub use self::calculator::{
  FinancialEstimate, SolarCalculator, SystemSizing, annual_production, annual_savings,
  installation_cost, panel_count, payback_period, roi, system_size,
};
pub use self::reference::{
  TaxCredit, estimate_carbon_offset, federal_tax_credit, installation_requirements,
  maintenance_schedule,
};
pub use self::suitability::{
  Orientation, ParseRoofError, RoofCondition, RoofInput, ShadingLevel, SuitabilityScore,
  assess_roof_suitability,
};
