// 该文件是 Wuding （屋顶） 项目的一部分。
// src/task.rs - 分析任务
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

use std::{sync::mpsc, time::Duration};

use tracing::{info, warn};

use crate::{
  frame::Frame,
  model::{Model, Prompted, SegmentResult},
  output::Render,
  report::{RooftopAnalysis, RooftopAnalyzer},
  segment::Segmenter,
};

/// 分割与估算串联而成的处理流程
pub struct RooftopPipeline<M> {
  segmenter: Segmenter<M>,
  analyzer: RooftopAnalyzer,
}

impl<M, ME> RooftopPipeline<M>
where
  M: Model<Input = Prompted, Output = SegmentResult, Error = ME>,
  ME: std::error::Error + Sync + Send + 'static,
{
  pub fn new(segmenter: Segmenter<M>, analyzer: RooftopAnalyzer) -> Self {
    Self {
      segmenter,
      analyzer,
    }
  }

  pub fn process(&self, frame: Frame) -> anyhow::Result<(Frame, RooftopAnalysis)> {
    let now = std::time::Instant::now();
    let segmented = self.segmenter.segment(frame)?;
    let elapsed = now.elapsed();
    info!("分割完成，耗时: {:.2?}", elapsed);
    Ok(self.analyzer.analyze(segmented)?)
  }
}

pub trait Task<I, P, O>: Sized {
  type Error;
  fn run_task(self, input: I, pipeline: P, output: O) -> Result<(), Self::Error>;
}

pub struct OneShotTask;

impl<
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = Frame>,
  M: Model<Input = Prompted, Output = SegmentResult, Error = ME>,
  O: Render<Frame, RooftopAnalysis, Error = RE>,
> Task<I, RooftopPipeline<M>, O> for OneShotTask
{
  type Error = anyhow::Error;

  fn run_task(
    self,
    mut input: I,
    pipeline: RooftopPipeline<M>,
    output: O,
  ) -> Result<(), Self::Error> {
    info!("开始任务...");
    let frame = input.next().ok_or_else(|| anyhow::anyhow!("没有输入帧"))?;
    info!("输入帧获取成功，开始分割...");
    let (frame, analysis) = pipeline.process(frame)?;
    output.render_result(&frame, &analysis)?;
    info!("渲染完成");

    Ok(())
  }
}

#[derive(Default, Debug)]
pub struct BatchTask {
  frame_number: Option<usize>,
  handle_interrupt: bool,
}

impl BatchTask {
  pub fn with_frame_number(mut self, frame_number: Option<usize>) -> Self {
    self.frame_number = frame_number;
    self
  }

  /// 安装 Ctrl-C 处理器，收到信号后处理完当前帧即退出
  pub fn with_interrupt(mut self, handle_interrupt: bool) -> Self {
    self.handle_interrupt = handle_interrupt;
    self
  }

  fn interrupt_channel(&self) -> anyhow::Result<Option<mpsc::Receiver<()>>> {
    if !self.handle_interrupt {
      return Ok(None);
    }

    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
      info!("收到中断信号，准备退出...");
      let _ = tx.send(());
      std::thread::spawn(|| {
        std::thread::sleep(Duration::from_secs(30));
        warn!("强制退出程序");
        std::process::exit(1);
      });
    })?;
    Ok(Some(rx))
  }
}

impl<
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = Frame>,
  M: Model<Input = Prompted, Output = SegmentResult, Error = ME>,
  O: Render<Frame, RooftopAnalysis, Error = RE>,
> Task<I, RooftopPipeline<M>, O> for BatchTask
{
  type Error = anyhow::Error;

  fn run_task(
    self,
    input: I,
    pipeline: RooftopPipeline<M>,
    output: O,
  ) -> Result<(), Self::Error> {
    info!("开始批量任务...");
    let interrupt = self.interrupt_channel()?;

    let mut frame_count = 0usize;
    let mut total_area_m2 = 0.0;
    for frame in input {
      frame_count += 1;
      info!("处理第 {} 帧图像: {}", frame_count, frame.name);
      let (frame, analysis) = pipeline.process(frame)?;
      total_area_m2 += analysis.report.area_m2;
      output.render_result(&frame, &analysis)?;

      if self.frame_number.map(|n| frame_count >= n).unwrap_or(false) {
        info!("达到指定帧数 {}, 退出任务循环", frame_count);
        break;
      }
      if interrupt.as_ref().is_some_and(|rx| rx.try_recv().is_ok()) {
        warn!("中断信号接收，退出任务循环");
        break;
      }
    }

    info!(
      "任务完成: 共 {} 帧, 屋顶总面积约 {:.2} 平方米",
      frame_count, total_area_m2
    );
    Ok(())
  }
}
