// 该文件是 Wuding （屋顶） 项目的一部分。
// src/output/directory_record.rs - 目录记录输出
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

use std::{cell::Cell, path::PathBuf};

use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
  FromUrl, FromUrlWithScheme,
  frame::Frame,
  output::Render,
  report::RooftopAnalysis,
  url_path,
};

#[derive(Error, Debug)]
pub enum DirectoryRecordOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("JSON 错误: {0}")]
  JsonError(#[from] serde_json::Error),
}

/// 按日期分目录保存每帧的掩码图像和 JSON 报告
///
/// `folder:///records?always` 时空掩码也会保存。
pub struct DirectoryRecordOutput {
  directory: PathBuf,
  frame_counter: Cell<u16>,
  always: bool,
}

impl FromUrlWithScheme for DirectoryRecordOutput {
  const SCHEME: &'static str = "folder";
}

impl FromUrl for DirectoryRecordOutput {
  type Error = DirectoryRecordOutputError;

  fn from_url(uri: &url::Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(DirectoryRecordOutputError::SchemeMismatch);
    }

    let always = uri.query_pairs().any(|(k, _)| k == "always");

    Ok(DirectoryRecordOutput {
      directory: PathBuf::from(url_path(uri)),
      frame_counter: Cell::new(0),
      always,
    })
  }
}

impl DirectoryRecordOutput {
  fn frame_id(&self) -> u16 {
    let id = self.frame_counter.get().wrapping_add(1);
    self.frame_counter.set(id);
    id
  }

  fn frame_stem(&self, now: DateTime<Utc>) -> Result<PathBuf, std::io::Error> {
    let directory = self
      .directory
      .join(now.year().to_string())
      .join(format!("{:02}", now.month()))
      .join(format!("{:02}", now.day()));
    std::fs::create_dir_all(&directory)?;

    Ok(directory.join(format!(
      "{}-{:04X}",
      now.format("%H-%M-%S"),
      self.frame_id()
    )))
  }
}

impl Render<Frame, RooftopAnalysis> for DirectoryRecordOutput {
  type Error = DirectoryRecordOutputError;

  fn render_result(&self, frame: &Frame, result: &RooftopAnalysis) -> Result<(), Self::Error> {
    if !self.always && result.is_empty() {
      debug!("帧 {} 掩码为空, 跳过记录", frame.index);
      return Ok(());
    }

    let stem = self.frame_stem(Utc::now())?;
    let image_path = stem.with_extension("png");
    result.masked.save(&image_path)?;

    let report_path = stem.with_extension("json");
    let text = serde_json::to_string_pretty(&result.report)?;
    std::fs::write(&report_path, text)?;

    info!("记录帧 {} 到 {}", frame.index, stem.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    frame::{Mask, PointPrompt},
    report::RooftopAnalyzer,
    segment::Segmented,
  };
  use image::RgbImage;

  fn analysis(mask: Mask) -> (Frame, RooftopAnalysis) {
    let image = RgbImage::new(mask.width(), mask.height());
    let segmented = Segmented {
      point: PointPrompt::center_of(mask.width(), mask.height()),
      masked: mask.apply(&image).unwrap(),
      mask_area_pixels: mask.count(),
      mask,
      score: 1.0,
      frame: Frame::new(image, 0, "roof.png"),
    };
    RooftopAnalyzer::default().analyze(segmented).unwrap()
  }

  fn count_files(directory: &std::path::Path) -> usize {
    let mut count = 0;
    for entry in std::fs::read_dir(directory).unwrap() {
      let path = entry.unwrap().path();
      if path.is_dir() {
        count += count_files(&path);
      } else {
        count += 1;
      }
    }
    count
  }

  #[test]
  fn records_image_and_report_in_dated_tree() {
    let scratch = tempfile::tempdir().unwrap();
    let directory = scratch.path().join("records");
    let url = url::Url::parse(&format!("folder://{}", directory.display())).unwrap();
    let output = DirectoryRecordOutput::from_url(&url).unwrap();

    let (frame, empty) = analysis(Mask::empty(4, 4));
    output.render_result(&frame, &empty).unwrap();
    assert!(!directory.exists());

    let (frame, full) = analysis(Mask::from_fn(4, 4, |_, _| true));
    output.render_result(&frame, &full).unwrap();
    assert_eq!(count_files(&directory), 2);
  }

  #[test]
  fn always_keeps_empty_frames() {
    let scratch = tempfile::tempdir().unwrap();
    let directory = scratch.path().join("records");
    let url = url::Url::parse(&format!("folder://{}?always", directory.display())).unwrap();
    let output = DirectoryRecordOutput::from_url(&url).unwrap();

    let (frame, empty) = analysis(Mask::empty(4, 4));
    output.render_result(&frame, &empty).unwrap();
    assert_eq!(count_files(&directory), 2);
  }

  #[test]
  fn existing_files_in_record_directory_are_kept() {
    let scratch = tempfile::tempdir().unwrap();
    let directory = scratch.path().join("records");
    std::fs::create_dir_all(&directory).unwrap();
    std::fs::write(directory.join("leftover"), b"previous run").unwrap();
    let url = url::Url::parse(&format!("folder://{}", directory.display())).unwrap();
    let output = DirectoryRecordOutput::from_url(&url).unwrap();

    let (frame, empty) = analysis(Mask::empty(4, 4));
    output.render_result(&frame, &empty).unwrap();
    assert_eq!(count_files(&directory), 1);

    let (frame, full) = analysis(Mask::from_fn(4, 4, |_, _| true));
    output.render_result(&frame, &full).unwrap();
    assert_eq!(count_files(&directory), 3);
    assert!(directory.join("leftover").exists());
  }
}
