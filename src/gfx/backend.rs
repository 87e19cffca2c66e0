//! 图形后端的统一抽象接口
//!
//! 示例只需要从后端获取窗口和交换链描述，其余资源通过设备直接创建。

use winit::window::Window;

use crate::core::SurfaceTransform;

/// 交换链描述
///
/// 示例在初始化时保存一份，用于选择管线格式和计算投影矩阵。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapChainDesc {
    /// 宽度（像素）
    pub width: u32,
    /// 高度（像素）
    pub height: u32,
    /// 颜色缓冲格式
    pub color_format: wgpu::TextureFormat,
    /// 深度缓冲格式
    pub depth_format: wgpu::TextureFormat,
    /// 表面相对于显示设备的旋转
    pub pre_transform: SurfaceTransform,
}

impl SwapChainDesc {
    /// 颜色缓冲不是 sRGB 格式时，像素着色器需要手动做 gamma 转换
    pub fn requires_manual_gamma(&self) -> bool {
        !self.color_format.is_srgb()
    }

    /// 宽高比，高度为 0 时按 1 处理
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for SwapChainDesc {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            color_format: wgpu::TextureFormat::Bgra8UnormSrgb,
            depth_format: wgpu::TextureFormat::Depth32Float,
            pre_transform: SurfaceTransform::Identity,
        }
    }
}

/// 图形后端的统一接口
pub trait GraphicsBackend {
    /// 获取窗口的引用
    fn window(&self) -> &Window;

    /// 获取后端的名称，用于日志输出
    fn backend_name(&self) -> &str;

    /// 当前交换链描述
    fn swap_chain_desc(&self) -> SwapChainDesc;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_gamma_follows_format() {
        let mut desc = SwapChainDesc::default();
        assert!(!desc.requires_manual_gamma());

        desc.color_format = wgpu::TextureFormat::Bgra8Unorm;
        assert!(desc.requires_manual_gamma());
    }

    #[test]
    fn test_aspect_ratio() {
        let mut desc = SwapChainDesc::default();
        assert!((desc.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);

        desc.height = 0;
        assert_eq!(desc.aspect_ratio(), 800.0);
    }
}
