// 该文件是 Wuding （屋顶） 项目的一部分。
// src/model/mask_file.rs - 预计算掩码文件
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

use image::ImageReader;
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  frame::{Mask, MaskError},
  model::{Model, Prompted, SegmentResult},
  url_path,
};

// 灰度大于该值视为前景
const MASK_THRESHOLD: u8 = 127;

#[derive(Error, Debug)]
pub enum MaskFileError {
  #[error("URI 方案不匹配")]
  SchemaMismatch,
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("掩码加载错误: {0}")]
  ImageLoadError(#[from] image::ImageError),
  #[error("掩码错误: {0}")]
  MaskError(#[from] MaskError),
}

/// 由外部预训练网络离线生成的掩码，构造时一次性读入
#[derive(Debug, Clone)]
pub struct MaskFile {
  mask: Mask,
}

impl FromUrlWithScheme for MaskFile {
  const SCHEME: &'static str = "mask";
}

impl FromUrl for MaskFile {
  type Error = MaskFileError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI 方案不匹配: 期望 '{}', 实际 '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(MaskFileError::SchemaMismatch);
    }

    let path = url_path(url);
    info!("加载掩码文件: {}", path);
    let image = ImageReader::open(&path)?.decode()?.to_luma8();
    let mask = Mask::from_luma(&image, MASK_THRESHOLD);
    debug!(
      "掩码尺寸: {}x{}, 前景像素: {}",
      mask.width(),
      mask.height(),
      mask.count()
    );

    Ok(MaskFile { mask })
  }
}

impl From<Mask> for MaskFile {
  fn from(mask: Mask) -> Self {
    MaskFile { mask }
  }
}

impl Model for MaskFile {
  type Input = Prompted;
  type Output = SegmentResult;
  type Error = MaskFileError;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
    self
      .mask
      .ensure_shape(input.frame.width(), input.frame.height())?;
    Ok(SegmentResult {
      mask: self.mask.clone(),
      score: 1.0,
    })
  }
}
