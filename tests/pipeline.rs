// 该文件是 Wuding （屋顶） 项目的一部分。
// tests/pipeline.rs - 端到端流程测试
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

use std::path::Path;

use approx::assert_relative_eq;
use image::{Rgb, RgbImage};
use url::Url;

use wuding::{
  FromUrl,
  input::InputWrapper,
  model::ModelWrapper,
  output::OutputWrapper,
  report::RooftopAnalyzer,
  segment::Segmenter,
  task::{BatchTask, OneShotTask, RooftopPipeline, Task},
};

/// 20x20 黑色背景，中央 10x10 灰色“屋顶”
fn synthetic_roof() -> RgbImage {
  RgbImage::from_fn(20, 20, |x, y| {
    if (5..15).contains(&x) && (5..15).contains(&y) {
      Rgb([200, 200, 200])
    } else {
      Rgb([0, 0, 0])
    }
  })
}

fn url(scheme: &str, path: &Path) -> Url {
  Url::parse(&format!("{}://{}", scheme, path.display())).unwrap()
}

fn pipeline() -> RooftopPipeline<ModelWrapper> {
  let model = ModelWrapper::from_url(&Url::parse("region://?tolerance=40").unwrap()).unwrap();
  RooftopPipeline::new(Segmenter::new(model), RooftopAnalyzer::default())
}

fn count_reports(directory: &Path) -> usize {
  let mut count = 0;
  for entry in std::fs::read_dir(directory).unwrap() {
    let path = entry.unwrap().path();
    if path.is_dir() {
      count += count_reports(&path);
    } else if path.extension().is_some_and(|ext| ext == "json") {
      count += 1;
    }
  }
  count
}

#[test]
fn oneshot_writes_report_and_masked_image() {
  let scratch = tempfile::tempdir().unwrap();
  let directory = scratch.path();
  let source = directory.join("roof.png");
  synthetic_roof().save(&source).unwrap();
  let report_path = directory.join("out/report.json");
  let image_path = directory.join("out/masked.png");

  let marked = Url::parse(&format!("image://{}?marker", image_path.display())).unwrap();

  let input = InputWrapper::from_url(&url("image", &source)).unwrap();
  let output = vec![
    OutputWrapper::from_url(&url("report", &report_path)).unwrap(),
    OutputWrapper::from_url(&marked).unwrap(),
  ];
  OneShotTask.run_task(input, pipeline(), output).unwrap();

  let text = std::fs::read_to_string(&report_path).unwrap();
  let report: serde_json::Value = serde_json::from_str(&text).unwrap();
  assert_eq!(report["source"], "roof.png");
  assert_eq!(report["mask_area_pixels"], 100);
  assert_relative_eq!(report["area_m2"].as_f64().unwrap(), 25.0);
  assert_relative_eq!(report["roi"]["cost"].as_f64().unwrap(), 172_125.0, epsilon = 1e-6);
  assert_eq!(report["sizing"]["panel_count"], 15);

  let masked = image::open(&image_path).unwrap().to_rgb8();
  assert_eq!(masked.dimensions(), (20, 20));
  assert_eq!(*masked.get_pixel(0, 0), Rgb([0, 0, 0]));
  assert_eq!(*masked.get_pixel(7, 12), Rgb([200, 200, 200]));
}

#[test]
fn batch_records_limited_frames() {
  let scratch = tempfile::tempdir().unwrap();
  let directory = scratch.path();
  let images = directory.join("images");
  std::fs::create_dir_all(&images).unwrap();
  for name in ["a.png", "b.png", "c.png"] {
    synthetic_roof().save(images.join(name)).unwrap();
  }
  std::fs::write(images.join("notes.txt"), "not an image").unwrap();
  let records = directory.join("records");

  let input = InputWrapper::from_url(&url("folder", &images)).unwrap();
  let output = vec![OutputWrapper::from_url(&url("folder", &records)).unwrap()];
  BatchTask::default()
    .with_frame_number(Some(2))
    .run_task(input, pipeline(), output)
    .unwrap();

  assert_eq!(count_reports(&records), 2);
}

#[test]
fn unknown_schemes_are_rejected() {
  assert!(InputWrapper::from_url(&Url::parse("rtsp://camera/stream").unwrap()).is_err());
  assert!(ModelWrapper::from_url(&Url::parse("onnx:///model.onnx").unwrap()).is_err());
}
