// 该文件是 Wuding （屋顶） 项目的一部分。
// src/bin/solar_estimate.rs - 按面积与屋顶属性估算光伏系统
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

use anyhow::Result;
use clap::Parser;
use tracing::info;

use wuding::{
  analysis::estimate_roi,
  args::AnalysisArgs,
  solar::{
    SQFT_PER_M2, assess_roof_suitability, estimate_carbon_offset, federal_tax_credit,
    installation_requirements, maintenance_schedule,
  },
};

/// 不经过分割，直接由屋顶面积估算光伏系统
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 可用屋顶面积（平方英尺）
  #[arg(long, value_name = "SQFT")]
  pub area_sqft: f64,
  /// 以 JSON 输出
  #[arg(long)]
  pub json: bool,
  #[command(flatten)]
  pub analysis: AnalysisArgs,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();
  let config = args.analysis.load_config()?;

  let roof = config.roof.with_area(args.area_sqft);
  info!("屋顶参数: {:?}", roof);

  let area_m2 = args.area_sqft / SQFT_PER_M2;
  let roi = estimate_roi(area_m2, &config.roi)?;
  let sizing = config.calculator.size_system(roof.usable_area_sqft);
  let financial = config.calculator.estimate(&sizing);
  let suitability = assess_roof_suitability(&roof);
  let carbon_offset = estimate_carbon_offset(financial.annual_production_kwh);
  let tax_credit = federal_tax_credit();

  if args.json {
    let value = serde_json::json!({
      "roof": roof,
      "area_m2": area_m2,
      "roi": roi,
      "sizing": sizing,
      "financial": financial,
      "suitability": suitability,
      "carbon_offset_lbs_per_year": carbon_offset,
      "tax_credit": tax_credit,
      "maintenance_schedule": maintenance_schedule(),
      "installation_requirements": installation_requirements(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    return Ok(());
  }

  println!("屋顶面积: {:.2} 平方英尺 ({:.2} 平方米)", args.area_sqft, area_m2);
  println!(
    "组件数量: {}, 系统容量: {:.2} kW",
    sizing.panel_count, sizing.system_size_kw
  );
  println!("年发电量: {:.1} kWh", financial.annual_production_kwh);
  println!(
    "安装成本 ($): {:.2}, 年节省 ($): {:.2}",
    financial.installation_cost, financial.annual_savings
  );
  if financial.payback_years.is_finite() {
    println!("回收期: {:.1} 年", financial.payback_years);
  } else {
    println!("回收期: 无法回收");
  }
  println!("年化回报率: {:.2}%", financial.roi_percent);
  println!(
    "寿命期成本: {:.2}, 寿命期节省: {:.2}, 净收益: {:.2}",
    roi.cost, roi.savings, roi.roi
  );
  println!("屋顶适宜度: {}", suitability);
  println!("年减排 CO2: {:.1} 磅", carbon_offset);
  println!(
    "{}: {}% ({}; {})",
    tax_credit.description, tax_credit.percentage, tax_credit.valid_through, tax_credit.note
  );
  println!("维护计划:");
  for item in maintenance_schedule() {
    println!("  - {}", item);
  }
  println!("安装要求:");
  for item in installation_requirements() {
    println!("  - {}", item);
  }

  Ok(())
}
