// 该文件是 Wuding （屋顶） 项目的一部分。
// src/output/console.rs - 控制台摘要输出
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

use std::convert::Infallible;

use thiserror::Error;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme, frame::Frame, output::Render, report::RooftopAnalysis,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput;

impl FromUrlWithScheme for ConsoleOutput {
  const SCHEME: &'static str = "console";
}

#[derive(Error, Debug)]
pub enum ConsoleOutputError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

impl FromUrl for ConsoleOutput {
  type Error = ConsoleOutputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(ConsoleOutputError::SchemeMismatch(url.scheme().to_string()));
    }
    Ok(ConsoleOutput)
  }
}

impl Render<Frame, RooftopAnalysis> for ConsoleOutput {
  type Error = Infallible;

  fn render_result(&self, _frame: &Frame, result: &RooftopAnalysis) -> Result<(), Self::Error> {
    println!();
    for line in result.report.summary_lines() {
      println!("{}", line);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_only_console_scheme() {
    assert!(ConsoleOutput::from_url(&Url::parse("console:").unwrap()).is_ok());
    assert!(matches!(
      ConsoleOutput::from_url(&Url::parse("report:///out.json").unwrap()),
      Err(ConsoleOutputError::SchemeMismatch(scheme)) if scheme == "report"
    ));
  }
}
