// 该文件是 Wuding （屋顶） 项目的一部分。
// src/bin/rooftop_oneshot.rs - 单张图像屋顶估算
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
use url::Url;

use wuding::{
  FromUrl,
  args::AnalysisArgs,
  input::InputWrapper,
  model::ModelWrapper,
  output::OutputWrapper,
  report::RooftopAnalyzer,
  segment::Segmenter,
  task::{OneShotTask, RooftopPipeline, Task},
};

/// 单张图像屋顶分割与光伏估算
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 分割模型，例如 region://?tolerance=40 或 mask:///path/mask.png
  #[arg(long, value_name = "MODEL", default_value = "region://")]
  pub model: Url,
  /// 输入图像，例如 image:///path/roof.jpg
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,
  /// 输出，可重复，例如 image:///out.png?marker、report:///out.json、console:
  #[arg(long, value_name = "OUTPUT", default_value = "console:")]
  pub output: Vec<Url>,
  #[command(flatten)]
  pub analysis: AnalysisArgs,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("模型: {}", args.model);
  info!("输入来源: {}", args.input);
  for output in &args.output {
    info!("输出路径: {}", output);
  }

  let config = args.analysis.load_config()?;
  let model = ModelWrapper::from_url(&args.model)?;
  let input = InputWrapper::from_url(&args.input)?;
  let output = args
    .output
    .iter()
    .map(OutputWrapper::from_url)
    .collect::<Result<Vec<_>, _>>()?;

  let segmenter = Segmenter::new(model).with_pixel_area(config.pixel_area_m2);
  let pipeline = RooftopPipeline::new(segmenter, RooftopAnalyzer::new(config));

  OneShotTask.run_task(input, pipeline, output)?;

  Ok(())
}
