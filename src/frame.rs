// 该文件是 Wuding （屋顶） 项目的一部分。
// src/frame.rs - 图像帧与分割掩码定义
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

use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::Serialize;
use thiserror::Error;

/// 输入帧
#[derive(Debug, Clone)]
pub struct Frame {
  /// RGB 图像数据
  pub image: RgbImage,
  /// 帧索引
  pub index: u64,
  /// 来源名称（通常为文件名）
  pub name: String,
}

impl Frame {
  pub fn new(image: RgbImage, index: u64, name: impl Into<String>) -> Self {
    Self {
      image,
      index,
      name: name.into(),
    }
  }

  pub fn width(&self) -> u32 {
    self.image.width()
  }

  pub fn height(&self) -> u32 {
    self.image.height()
  }
}

/// 前景提示点（像素坐标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointPrompt {
  pub x: u32,
  pub y: u32,
}

impl PointPrompt {
  /// 图像中心 (w / 2, h / 2)
  pub fn center_of(width: u32, height: u32) -> Self {
    Self {
      x: width / 2,
      y: height / 2,
    }
  }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MaskError {
  #[error("掩码数据长度不匹配: 期望长度 {expected}, 实际长度 {actual}")]
  LengthMismatch { expected: usize, actual: usize },
  #[error("掩码尺寸不匹配: 期望 {expected:?}, 实际 {actual:?}")]
  ShapeMismatch {
    expected: (u32, u32),
    actual: (u32, u32),
  },
}

/// 与输入图像同尺寸的布尔掩码，按行优先存储
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
  width: u32,
  height: u32,
  data: Box<[bool]>,
}

impl Mask {
  pub fn empty(width: u32, height: u32) -> Self {
    let data = vec![false; width as usize * height as usize].into_boxed_slice();
    Self {
      width,
      height,
      data,
    }
  }

  pub fn from_vec(width: u32, height: u32, data: Vec<bool>) -> Result<Self, MaskError> {
    let expected = width as usize * height as usize;
    if data.len() != expected {
      return Err(MaskError::LengthMismatch {
        expected,
        actual: data.len(),
      });
    }
    Ok(Self {
      width,
      height,
      data: data.into_boxed_slice(),
    })
  }

  pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Self {
    let mut mask = Self::empty(width, height);
    for y in 0..height {
      for x in 0..width {
        mask.set(x, y, f(x, y));
      }
    }
    mask
  }

  /// 灰度值大于 `threshold` 的像素视为前景
  pub fn from_luma(image: &GrayImage, threshold: u8) -> Self {
    Self::from_fn(image.width(), image.height(), |x, y| {
      image.get_pixel(x, y)[0] > threshold
    })
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn dimensions(&self) -> (u32, u32) {
    (self.width, self.height)
  }

  fn index(&self, x: u32, y: u32) -> usize {
    y as usize * self.width as usize + x as usize
  }

  pub fn get(&self, x: u32, y: u32) -> bool {
    self.data[self.index(x, y)]
  }

  pub fn set(&mut self, x: u32, y: u32, value: bool) {
    let index = self.index(x, y);
    self.data[index] = value;
  }

  /// 前景像素数
  pub fn count(&self) -> u64 {
    self.data.iter().filter(|&&v| v).count() as u64
  }

  pub fn is_empty(&self) -> bool {
    !self.data.iter().any(|&v| v)
  }

  pub fn ensure_shape(&self, width: u32, height: u32) -> Result<(), MaskError> {
    if self.dimensions() != (width, height) {
      return Err(MaskError::ShapeMismatch {
        expected: (width, height),
        actual: self.dimensions(),
      });
    }
    Ok(())
  }

  /// 将非掩码像素置零，返回新图像
  pub fn apply(&self, image: &RgbImage) -> Result<RgbImage, MaskError> {
    self.ensure_shape(image.width(), image.height())?;
    let mut result = image.clone();
    for (x, y, pixel) in result.enumerate_pixels_mut() {
      if !self.get(x, y) {
        *pixel = Rgb([0, 0, 0]);
      }
    }
    Ok(result)
  }

  pub fn to_luma(&self) -> GrayImage {
    GrayImage::from_fn(self.width, self.height, |x, y| {
      if self.get(x, y) { Luma([255]) } else { Luma([0]) }
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn center_prompt_uses_integer_halves() {
    assert_eq!(PointPrompt::center_of(640, 480), PointPrompt { x: 320, y: 240 });
    assert_eq!(PointPrompt::center_of(5, 3), PointPrompt { x: 2, y: 1 });
  }

  #[test]
  fn mask_counts_foreground() {
    let mask = Mask::from_fn(4, 3, |x, _| x < 2);
    assert_eq!(mask.count(), 6);
    assert!(!mask.is_empty());
    assert!(Mask::empty(4, 3).is_empty());
  }

  #[test]
  fn mask_from_vec_checks_length() {
    assert_eq!(
      Mask::from_vec(2, 2, vec![true; 3]),
      Err(MaskError::LengthMismatch {
        expected: 4,
        actual: 3
      })
    );
  }

  #[test]
  fn apply_zeroes_background_only() {
    let image = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
    let mask = Mask::from_fn(3, 2, |x, y| x == 1 && y == 0);
    let masked = mask.apply(&image).unwrap();
    for (x, y, pixel) in masked.enumerate_pixels() {
      if x == 1 && y == 0 {
        assert_eq!(*pixel, Rgb([10, 20, 30]));
      } else {
        assert_eq!(*pixel, Rgb([0, 0, 0]));
      }
    }
  }

  #[test]
  fn apply_rejects_other_shapes() {
    let image = RgbImage::new(3, 2);
    let mask = Mask::empty(2, 3);
    assert!(matches!(
      mask.apply(&image),
      Err(MaskError::ShapeMismatch { .. })
    ));
  }

  #[test]
  fn luma_round_trip_keeps_pixels() {
    let mask = Mask::from_fn(5, 5, |x, y| (x + y) % 2 == 0);
    assert_eq!(Mask::from_luma(&mask.to_luma(), 127), mask);
  }
}
