// 该文件是 Wuding （屋顶） 项目的一部分。
// src/output/report_file.rs - 保存 JSON 报告
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

use std::{fs::File, io::BufWriter, path::Path};

use thiserror::Error;
use tracing::info;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  frame::Frame,
  output::Render,
  report::{RooftopAnalysis, RooftopReport},
  url_path,
};

#[derive(Error, Debug)]
pub enum ReportFileError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("JSON 错误: {0}")]
  JsonError(#[from] serde_json::Error),
  #[error("URI 方案不匹配")]
  SchemeMismatch,
}

pub struct ReportFileOutput {
  path: String,
}

impl FromUrlWithScheme for ReportFileOutput {
  const SCHEME: &'static str = "report";
}

impl FromUrl for ReportFileOutput {
  type Error = ReportFileError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(ReportFileError::SchemeMismatch);
    }
    Ok(ReportFileOutput {
      path: url_path(uri),
    })
  }
}

/// 以缩进格式写出报告，必要时创建父目录
fn write_report(path: &Path, report: &RooftopReport) -> Result<(), ReportFileError> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)?;
  }
  let writer = BufWriter::new(File::create(path)?);
  serde_json::to_writer_pretty(writer, report)?;
  Ok(())
}

impl Render<Frame, RooftopAnalysis> for ReportFileOutput {
  type Error = ReportFileError;

  fn render_result(&self, _frame: &Frame, result: &RooftopAnalysis) -> Result<(), Self::Error> {
    write_report(Path::new(&self.path), &result.report)?;
    info!("保存报告到文件: {}", self.path);
    Ok(())
  }
}
