// 该文件是 Wuding （屋顶） 项目的一部分。
// src/segment.rs - 屋顶分割适配层
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

//! # 分割适配层
//!
//! 以图像中心作为唯一的前景提示点调用分割模型，得到单一掩码，
//! 生成置零背景后的图像，并把掩码像素数换算为面积。
//!
//! 像素到面积的换算系数没有地理参考，只是粗略的占位值。

use image::RgbImage;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
  frame::{Frame, Mask, MaskError, PointPrompt},
  model::{Model, Prompted, SegmentResult},
};

/// 每像素对应的面积（平方米），未经标定
pub const DEFAULT_PIXEL_AREA_M2: f64 = 0.25;

#[derive(Error, Debug)]
pub enum SegmentError<E> {
  #[error("模型推理错误: {0}")]
  Model(E),
  #[error("掩码与输入图像不一致: {0}")]
  MaskShape(#[from] MaskError),
}

/// 分割结果
#[derive(Debug, Clone)]
pub struct Segmented {
  pub frame: Frame,
  pub point: PointPrompt,
  pub mask: Mask,
  /// 背景像素置零后的图像
  pub masked: RgbImage,
  pub mask_area_pixels: u64,
  pub score: f32,
}

/// 持有已初始化模型的分割句柄
pub struct Segmenter<M> {
  model: M,
  pixel_area_m2: f64,
}

impl<M> Segmenter<M>
where
  M: Model<Input = Prompted, Output = SegmentResult>,
{
  pub fn new(model: M) -> Self {
    Self {
      model,
      pixel_area_m2: DEFAULT_PIXEL_AREA_M2,
    }
  }

  pub fn with_pixel_area(mut self, pixel_area_m2: f64) -> Self {
    self.pixel_area_m2 = pixel_area_m2;
    self
  }

  pub fn pixel_area_m2(&self) -> f64 {
    self.pixel_area_m2
  }

  pub fn area_m2(&self, mask_area_pixels: u64) -> f64 {
    mask_area_pixels as f64 * self.pixel_area_m2
  }

  pub fn segment(&self, frame: Frame) -> Result<Segmented, SegmentError<M::Error>> {
    let point = PointPrompt::center_of(frame.width(), frame.height());
    debug!("帧 {} 提示点: ({}, {})", frame.index, point.x, point.y);

    let prompted = Prompted { frame, point };
    let SegmentResult { mask, score } = self.model.infer(&prompted).map_err(SegmentError::Model)?;
    let masked = mask.apply(&prompted.frame.image)?;
    let mask_area_pixels = mask.count();
    info!(
      "帧 {} 分割完成: 前景像素 {}, 约 {:.2} 平方米",
      prompted.frame.index,
      mask_area_pixels,
      self.area_m2(mask_area_pixels)
    );

    Ok(Segmented {
      frame: prompted.frame,
      point,
      mask,
      masked,
      mask_area_pixels,
      score,
    })
  }
}
