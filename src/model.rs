// 该文件是 Wuding （屋顶） 项目的一部分。
// src/model.rs - 分割模型
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

use thiserror::Error;
use url::Url;

use crate::{
  FromUrl,
  frame::{Frame, Mask, PointPrompt},
};

pub trait Model {
  type Input;
  type Output;
  type Error;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// 带提示点的输入帧
#[derive(Debug, Clone)]
pub struct Prompted {
  pub frame: Frame,
  pub point: PointPrompt,
}

/// 单掩码分割结果，分数仅作记录
#[derive(Debug, Clone)]
pub struct SegmentResult {
  pub mask: Mask,
  pub score: f32,
}

#[cfg(feature = "model_region_grow")]
mod region_grow;
#[cfg(feature = "model_region_grow")]
pub use self::region_grow::{RegionGrow, RegionGrowError};

#[cfg(feature = "model_mask_file")]
mod mask_file;
#[cfg(feature = "model_mask_file")]
pub use self::mask_file::{MaskFile, MaskFileError};

#[derive(Error, Debug)]
pub enum ModelError {
  #[cfg(feature = "model_region_grow")]
  #[error("区域生长模型错误: {0}")]
  RegionGrowError(#[from] RegionGrowError),
  #[cfg(feature = "model_mask_file")]
  #[error("掩码文件模型错误: {0}")]
  MaskFileError(#[from] MaskFileError),
  #[error("URI 方案不匹配")]
  SchemeMismatch,
}

pub enum ModelWrapper {
  #[cfg(feature = "model_region_grow")]
  RegionGrow(RegionGrow),
  #[cfg(feature = "model_mask_file")]
  MaskFile(MaskFile),
}

impl FromUrl for ModelWrapper {
  type Error = ModelError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    #[cfg(feature = "model_region_grow")]
    {
      use crate::FromUrlWithScheme;

      if url.scheme() == RegionGrow::SCHEME {
        return Ok(ModelWrapper::RegionGrow(RegionGrow::from_url(url)?));
      }
    }
    #[cfg(feature = "model_mask_file")]
    {
      use crate::FromUrlWithScheme;

      if url.scheme() == MaskFile::SCHEME {
        return Ok(ModelWrapper::MaskFile(MaskFile::from_url(url)?));
      }
    }
    Err(ModelError::SchemeMismatch)
  }
}

impl Model for ModelWrapper {
  type Input = Prompted;
  type Output = SegmentResult;
  type Error = ModelError;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
    match self {
      #[cfg(feature = "model_region_grow")]
      ModelWrapper::RegionGrow(model) => model.infer(input).map_err(ModelError::from),
      #[cfg(feature = "model_mask_file")]
      ModelWrapper::MaskFile(model) => model.infer(input).map_err(ModelError::from),
    }
  }
}
