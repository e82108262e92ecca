// 该文件是 Wuding （屋顶） 项目的一部分。
// src/report.rs - 屋顶分析报告
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

use image::RgbImage;
use serde::Serialize;
use tracing::debug;

use crate::{
  analysis::{AnalysisError, RoiEstimate, estimate_roi},
  config::AnalysisConfig,
  frame::{Frame, PointPrompt},
  segment::Segmented,
  solar::{
    FinancialEstimate, RoofInput, SQFT_PER_M2, SuitabilityScore, SystemSizing, TaxCredit,
    assess_roof_suitability, estimate_carbon_offset, federal_tax_credit,
    installation_requirements, maintenance_schedule,
  },
};

/// 单张图像的全部估算结果
#[derive(Debug, Clone, Serialize)]
pub struct RooftopReport {
  pub source: String,
  pub frame_index: u64,
  pub image_width: u32,
  pub image_height: u32,
  pub prompt: PointPrompt,
  pub mask_area_pixels: u64,
  pub area_m2: f64,
  pub area_sqft: f64,
  pub roi: RoiEstimate,
  pub roof: RoofInput,
  pub sizing: SystemSizing,
  pub financial: FinancialEstimate,
  pub suitability: SuitabilityScore,
  pub carbon_offset_lbs_per_year: f64,
  pub tax_credit: TaxCredit,
  pub maintenance_schedule: &'static [&'static str],
  pub installation_requirements: &'static [&'static str],
}

/// 渲染阶段使用的完整结果：报告与掩码图像
#[derive(Debug, Clone)]
pub struct RooftopAnalysis {
  pub report: RooftopReport,
  pub masked: RgbImage,
}

impl RooftopAnalysis {
  pub fn is_empty(&self) -> bool {
    self.report.mask_area_pixels == 0
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RooftopAnalyzer {
  config: AnalysisConfig,
}

impl RooftopAnalyzer {
  pub fn new(config: AnalysisConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &AnalysisConfig {
    &self.config
  }

  pub fn report(&self, segmented: &Segmented) -> Result<RooftopReport, AnalysisError> {
    let area_m2 = segmented.mask_area_pixels as f64 * self.config.pixel_area_m2;
    let area_sqft = area_m2 * SQFT_PER_M2;
    let roi = estimate_roi(area_m2, &self.config.roi)?;

    let roof = self.config.roof.with_area(area_sqft);
    let calculator = &self.config.calculator;
    let sizing = calculator.size_system(roof.usable_area_sqft);
    let financial = calculator.estimate(&sizing);
    let suitability = assess_roof_suitability(&roof);
    debug!("屋顶适宜度: {}", suitability);

    let frame = &segmented.frame;
    Ok(RooftopReport {
      source: frame.name.clone(),
      frame_index: frame.index,
      image_width: frame.width(),
      image_height: frame.height(),
      prompt: segmented.point,
      mask_area_pixels: segmented.mask_area_pixels,
      area_m2,
      area_sqft,
      roi,
      roof,
      sizing,
      financial,
      suitability,
      carbon_offset_lbs_per_year: estimate_carbon_offset(financial.annual_production_kwh),
      tax_credit: federal_tax_credit(),
      maintenance_schedule: maintenance_schedule(),
      installation_requirements: installation_requirements(),
    })
  }

  /// 生成报告并拆出原始帧，供渲染阶段使用
  pub fn analyze(&self, segmented: Segmented) -> Result<(Frame, RooftopAnalysis), AnalysisError> {
    let report = self.report(&segmented)?;
    let Segmented { frame, masked, .. } = segmented;
    Ok((frame, RooftopAnalysis { report, masked }))
  }
}

fn format_years(years: f64) -> String {
  if years.is_finite() {
    format!("{:.1} 年", years)
  } else {
    "无法回收".to_string()
  }
}

impl RooftopReport {
  /// 控制台摘要
  pub fn summary_lines(&self) -> Vec<String> {
    vec![
      format!("图像: {} ({}x{})", self.source, self.image_width, self.image_height),
      format!("屋顶像素: {}", self.mask_area_pixels),
      format!("估算面积 (m²): {:.2}", self.area_m2),
      format!("安装成本: {:.2}", self.roi.cost),
      format!("寿命期节省: {:.2}", self.roi.savings),
      format!("净收益: {:.2}", self.roi.roi),
      format!(
        "组件数量: {}, 系统容量: {:.2} kW",
        self.sizing.panel_count, self.sizing.system_size_kw
      ),
      format!("年发电量: {:.1} kWh", self.financial.annual_production_kwh),
      format!(
        "安装成本 ($): {:.2}, 年节省 ($): {:.2}",
        self.financial.installation_cost, self.financial.annual_savings
      ),
      format!(
        "回收期: {}, 年化回报率: {:.2}%",
        format_years(self.financial.payback_years),
        self.financial.roi_percent
      ),
      format!("屋顶适宜度: {}", self.suitability),
      format!("年减排 CO2: {:.1} 磅", self.carbon_offset_lbs_per_year),
      format!(
        "{}: {}% ({})",
        self.tax_credit.description, self.tax_credit.percentage, self.tax_credit.valid_through
      ),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::frame::Mask;
  use approx::assert_relative_eq;

  fn segmented(pixels_wide: u32) -> Segmented {
    let image = RgbImage::new(20, 20);
    let mask = Mask::from_fn(20, 20, |x, _| x < pixels_wide);
    let masked = mask.apply(&image).unwrap();
    let mask_area_pixels = mask.count();
    Segmented {
      frame: Frame::new(image, 0, "roof.png"),
      point: PointPrompt::center_of(20, 20),
      mask,
      masked,
      mask_area_pixels,
      score: 1.0,
    }
  }

  #[test]
  fn area_uses_pixel_constant() {
    // 20 x 20 = 400 像素, 100 平方米
    let (_, analysis) = RooftopAnalyzer::default().analyze(segmented(20)).unwrap();
    let report = &analysis.report;
    assert_eq!(report.mask_area_pixels, 400);
    assert_relative_eq!(report.area_m2, 100.0);
    assert_relative_eq!(report.roi.cost, 688_500.0, epsilon = 1e-6);
    assert_relative_eq!(report.roi.roi, -229_500.0, epsilon = 1e-6);
    assert_relative_eq!(report.area_sqft, 1076.39, epsilon = 1e-9);
    assert_eq!(report.sizing.panel_count, 61);
    assert_relative_eq!(
      report.carbon_offset_lbs_per_year,
      report.financial.annual_production_kwh * 0.85,
      epsilon = 1e-9
    );
  }

  #[test]
  fn empty_mask_reports_infinite_payback() {
    let (frame, analysis) = RooftopAnalyzer::default().analyze(segmented(0)).unwrap();
    assert_eq!(frame.name, "roof.png");
    assert!(analysis.is_empty());
    assert_eq!(analysis.report.financial.payback_years, f64::INFINITY);
    assert_eq!(analysis.report.financial.roi_percent, 0.0);
    assert!(analysis.report.summary_lines().iter().any(|l| l.contains("无法回收")));
  }

  #[test]
  fn report_serializes_to_json() {
    let report = RooftopAnalyzer::default().report(&segmented(0)).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["source"], "roof.png");
    assert_eq!(value["suitability"], 6);
    assert!(value["financial"]["payback_years"].is_null());
    assert_eq!(value["roof"]["orientation"], "other");
    assert_eq!(value["maintenance_schedule"].as_array().unwrap().len(), 6);
  }
}
