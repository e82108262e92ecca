// 该文件是 Wuding （屋顶） 项目的一部分。
// src/model/region_grow.rs - 基于颜色相似度的区域生长分割
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

//! # 区域生长分割
//!
//! 从提示点开始做四连通洪泛填充，颜色与种子像素的 RGB 欧氏距离不超过
//! `tolerance` 的像素被并入前景。不需要任何模型权重，可作为预训练分割
//! 网络的替代基线。
//!
//! ```no_run
//! use wuding::{FromUrl, model::RegionGrow};
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = RegionGrow::from_url(&Url::parse("region://?tolerance=32")?)?;
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;

use image::Rgb;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  frame::Mask,
  model::{Model, Prompted, SegmentResult},
};

const DEFAULT_TOLERANCE: f64 = 40.0;

#[derive(Error, Debug)]
pub enum RegionGrowError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("参数 {0} 无效: {1}")]
  InvalidParameter(String, String),
  #[error("输入图像为空")]
  EmptyImage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionGrow {
  tolerance: f64,
}

impl Default for RegionGrow {
  fn default() -> Self {
    Self {
      tolerance: DEFAULT_TOLERANCE,
    }
  }
}

impl FromUrlWithScheme for RegionGrow {
  const SCHEME: &'static str = "region";
}

impl FromUrl for RegionGrow {
  type Error = RegionGrowError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(RegionGrowError::SchemeMismatch(format!(
        "期望 '{}', 实际 '{}'",
        Self::SCHEME,
        url.scheme()
      )));
    }

    let mut model = RegionGrow::default();
    for (k, v) in url.query_pairs() {
      if k == "tolerance" {
        let tolerance = v
          .parse::<f64>()
          .ok()
          .filter(|t| t.is_finite() && *t >= 0.0)
          .ok_or_else(|| RegionGrowError::InvalidParameter(k.to_string(), v.to_string()))?;
        model = model.tolerance(tolerance);
      }
    }

    info!("区域生长分割, 容差: {}", model.tolerance);
    Ok(model)
  }
}

impl RegionGrow {
  pub fn tolerance(mut self, tolerance: f64) -> Self {
    self.tolerance = tolerance;
    self
  }

  fn similar(&self, seed: &Rgb<u8>, pixel: &Rgb<u8>) -> bool {
    let distance_sq: f64 = seed
      .0
      .iter()
      .zip(pixel.0.iter())
      .map(|(&a, &b)| {
        let d = a as f64 - b as f64;
        d * d
      })
      .sum();
    distance_sq <= self.tolerance * self.tolerance
  }
}

impl Model for RegionGrow {
  type Input = Prompted;
  type Output = SegmentResult;
  type Error = RegionGrowError;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
    let image = &input.frame.image;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
      return Err(RegionGrowError::EmptyImage);
    }

    let sx = input.point.x.min(width - 1);
    let sy = input.point.y.min(height - 1);
    let seed = *image.get_pixel(sx, sy);
    debug!("种子点 ({}, {}), 颜色 {:?}", sx, sy, seed.0);

    let mut mask = Mask::empty(width, height);
    let mut queue = VecDeque::new();
    mask.set(sx, sy, true);
    queue.push_back((sx, sy));

    while let Some((x, y)) = queue.pop_front() {
      let neighbours = [
        (x.checked_sub(1), Some(y)),
        (x.checked_add(1).filter(|&nx| nx < width), Some(y)),
        (Some(x), y.checked_sub(1)),
        (Some(x), y.checked_add(1).filter(|&ny| ny < height)),
      ];
      for (nx, ny) in neighbours {
        let (Some(nx), Some(ny)) = (nx, ny) else {
          continue;
        };
        if mask.get(nx, ny) || !self.similar(&seed, image.get_pixel(nx, ny)) {
          continue;
        }
        mask.set(nx, ny, true);
        queue.push_back((nx, ny));
      }
    }

    debug!("区域生长完成, 前景像素: {}", mask.count());
    Ok(SegmentResult { mask, score: 1.0 })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::frame::{Frame, PointPrompt};
  use image::RgbImage;

  fn roof_image() -> RgbImage {
    // 20x10 的深色背景，中间 8x4 的浅色屋顶
    RgbImage::from_fn(20, 10, |x, y| {
      if (6..14).contains(&x) && (3..7).contains(&y) {
        Rgb([200, 190, 180])
      } else {
        Rgb([30, 60, 30])
      }
    })
  }

  fn prompted(image: RgbImage, x: u32, y: u32) -> Prompted {
    Prompted {
      frame: Frame::new(image, 0, "test"),
      point: PointPrompt { x, y },
    }
  }

  #[test]
  fn fills_uniform_rectangle() {
    let result = RegionGrow::default()
      .infer(&prompted(roof_image(), 10, 5))
      .unwrap();
    assert_eq!(result.mask.count(), 32);
    assert!(result.mask.get(6, 3));
    assert!(result.mask.get(13, 6));
    assert!(!result.mask.get(5, 3));
    assert!(!result.mask.get(14, 6));
  }

  #[test]
  fn tolerance_absorbs_small_noise() {
    let mut image = roof_image();
    image.put_pixel(8, 4, Rgb([205, 185, 180]));
    let result = RegionGrow::default().infer(&prompted(image, 10, 5)).unwrap();
    assert_eq!(result.mask.count(), 32);
  }

  #[test]
  fn zero_tolerance_excludes_any_change() {
    let mut image = roof_image();
    image.put_pixel(8, 4, Rgb([201, 190, 180]));
    let result = RegionGrow::default()
      .tolerance(0.0)
      .infer(&prompted(image, 10, 5))
      .unwrap();
    assert_eq!(result.mask.count(), 31);
  }

  #[test]
  fn prompt_outside_image_is_clamped() {
    let image = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
    let result = RegionGrow::default().infer(&prompted(image, 100, 100)).unwrap();
    assert_eq!(result.mask.count(), 16);
  }

  #[test]
  fn empty_image_is_rejected() {
    let result = RegionGrow::default().infer(&prompted(RgbImage::new(0, 0), 0, 0));
    assert!(matches!(result, Err(RegionGrowError::EmptyImage)));
  }

  #[test]
  fn parses_tolerance_from_url() {
    let url = Url::parse("region://?tolerance=12.5").unwrap();
    assert_eq!(RegionGrow::from_url(&url).unwrap().tolerance, 12.5);

    let url = Url::parse("region://?tolerance=-1").unwrap();
    assert!(matches!(
      RegionGrow::from_url(&url),
      Err(RegionGrowError::InvalidParameter(_, _))
    ));

    let url = Url::parse("mask:///tmp/a.png").unwrap();
    assert!(matches!(
      RegionGrow::from_url(&url),
      Err(RegionGrowError::SchemeMismatch(_))
    ));
  }
}
