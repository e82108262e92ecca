// 该文件是 Wuding （屋顶） 项目的一部分。
// src/output/draw.rs - 分割结果可视化
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

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut};

use crate::frame::PointPrompt;

const MARKER_RADIUS: i32 = 6;
const MARKER_COLOR: [u8; 3] = [255, 0, 0]; // 红色

pub struct Draw {
  marker_radius: i32,
  marker_color: [u8; 3],
}

impl Default for Draw {
  fn default() -> Self {
    Self {
      marker_radius: MARKER_RADIUS,
      marker_color: MARKER_COLOR,
    }
  }
}

impl Draw {
  /// 在提示点处绘制十字与圆圈
  pub fn draw_prompt(&self, image: &mut RgbImage, point: PointPrompt) {
    let (x, y) = (point.x as i32, point.y as i32);
    let color = Rgb(self.marker_color);
    draw_cross_mut(image, color, x, y);
    draw_hollow_circle_mut(image, (x, y), self.marker_radius, color);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn marks_prompt_point() {
    let mut image = RgbImage::new(32, 32);
    Draw::default().draw_prompt(&mut image, PointPrompt { x: 16, y: 16 });
    assert_eq!(*image.get_pixel(16, 16), Rgb(MARKER_COLOR));
    assert_eq!(*image.get_pixel(16 + MARKER_RADIUS as u32, 16), Rgb(MARKER_COLOR));
    assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 0]));
  }
}
