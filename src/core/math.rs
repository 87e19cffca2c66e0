//! 数学库模块
//!
//! 基于 `nalgebra` 提供示例程序需要的矩阵和颜色工具。
//!
//! 矩阵采用列向量约定（`v' = M * v`），因此变换按从右到左的顺序组合。
//! 投影矩阵为左手坐标系，深度范围 [0, 1]，与 wgpu 的裁剪空间一致。

pub use nalgebra::{Matrix4 as Mat4, Unit, Vector3 as Vec3, Vector4 as Vec4};

pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;
pub type Matrix4 = Mat4<f32>;

/// 颜色类型（RGBA，范围 0.0-1.0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// 线性空间转换到 sRGB 空间（alpha 保持不变）
    pub fn linear_to_srgb(&self) -> Color {
        use color_space::linear_to_srgb_component as f;
        Color::new(f(self.r), f(self.g), f(self.b), self.a)
    }
}

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-5;
}

/// 矩阵辅助函数
pub mod matrix {
    use super::*;

    /// 创建平移矩阵
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// 创建绕 X 轴旋转的矩阵
    pub fn rotation_x(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::x_axis(), angle)
    }

    /// 创建绕 Y 轴旋转的矩阵
    pub fn rotation_y(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::y_axis(), angle)
    }

    /// 创建绕任意轴旋转的矩阵
    pub fn rotation_axis(axis: &Vector3, angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Unit::new_normalize(*axis), angle)
    }

    /// 左手坐标系透视投影，深度映射到 [0, 1]
    ///
    /// 直接接收 x/y 缩放系数，方便调用方根据表面方向调整宽高比。
    pub fn perspective_lh(x_scale: f32, y_scale: f32, near: f32, far: f32) -> Matrix4 {
        let mut m = Matrix4::zeros();
        m[(0, 0)] = x_scale;
        m[(1, 1)] = y_scale;
        m[(2, 2)] = far / (far - near);
        m[(2, 3)] = -near * far / (far - near);
        m[(3, 2)] = 1.0;
        m
    }

    /// 检查两个矩阵是否逐元素近似相等
    pub fn approx_eq(a: &Matrix4, b: &Matrix4, epsilon: f32) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= epsilon)
    }
}

/// 颜色空间转换
pub mod color_space {
    /// 单通道 Linear 转 sRGB
    pub fn linear_to_srgb_component(c: f32) -> f32 {
        if c <= 0.0031308 {
            c * 12.92
        } else {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::{EPSILON, PI};

    #[test]
    fn test_matrix_translation() {
        let mat = matrix::translation(1.0, 2.0, 3.0);
        let result = mat * Vector4::new(0.0, 0.0, 0.0, 1.0);

        assert!((result.x - 1.0).abs() < EPSILON);
        assert!((result.y - 2.0).abs() < EPSILON);
        assert!((result.z - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        // 绕 Y 轴 +90°：+X 转到 -Z
        let v = matrix::rotation_y(PI / 2.0) * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert!(v.x.abs() < EPSILON);
        assert!((v.z + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_rotation_axis_matches_named_axes() {
        let a = matrix::rotation_axis(&Vector3::new(0.0, 2.0, 0.0), 0.7);
        assert!(matrix::approx_eq(&a, &matrix::rotation_y(0.7), EPSILON));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = matrix::perspective_lh(1.0, 1.0, 0.1, 100.0);

        let near = proj * Vector4::new(0.0, 0.0, 0.1, 1.0);
        let far = proj * Vector4::new(0.0, 0.0, 100.0, 1.0);

        assert!((near.z / near.w).abs() < EPSILON);
        assert!((far.z / far.w - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_linear_to_srgb() {
        assert_eq!(color_space::linear_to_srgb_component(0.0), 0.0);
        assert!((color_space::linear_to_srgb_component(1.0) - 1.0).abs() < EPSILON);
        assert!((color_space::linear_to_srgb_component(0.002) - 0.02584).abs() < EPSILON);

        let c = Color::new(0.35, 0.35, 0.35, 0.5).linear_to_srgb();
        assert!((c.r - 0.6262).abs() < 1e-3);
        assert_eq!(c.a, 0.5);
    }
}
