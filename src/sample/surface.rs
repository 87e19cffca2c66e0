//! 表面方向相关的矩阵
//!
//! 在旋转的显示设备上，表面内容需要绕相机视线方向预先旋转，
//! 投影矩阵的 x/y 缩放也要随之互换。桌面平台上预变换总是单位矩阵。

use crate::core::math::{constants::PI, matrix, Matrix4, Vector3};
use crate::core::SurfaceTransform;
use crate::gfx::SwapChainDesc;

/// 表面预变换矩阵
///
/// `camera_view_axis` 是相机空间中的视线方向，旋转绕该轴进行。
pub fn surface_pretransform_matrix(transform: SurfaceTransform, camera_view_axis: &Vector3) -> Matrix4 {
    match transform {
        SurfaceTransform::Identity => Matrix4::identity(),
        SurfaceTransform::Rotate90 => matrix::rotation_axis(camera_view_axis, -PI / 2.0),
        SurfaceTransform::Rotate180 => matrix::rotation_axis(camera_view_axis, -PI),
        SurfaceTransform::Rotate270 => matrix::rotation_axis(camera_view_axis, -PI * 3.0 / 2.0),
    }
}

/// 根据交换链尺寸和方向调整后的透视投影矩阵
pub fn adjusted_projection_matrix(swap_chain: &SwapChainDesc, fov: f32, near: f32, far: f32) -> Matrix4 {
    let aspect = swap_chain.aspect_ratio();
    let focal = 1.0 / (fov / 2.0).tan();

    let (x_scale, y_scale) = if swap_chain.pre_transform.swaps_axes() {
        // 旋转后垂直视角变为水平视角
        (focal, focal * aspect)
    } else {
        (focal / aspect, focal)
    };

    matrix::perspective_lh(x_scale, y_scale, near, far)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::{constants::EPSILON, Vector4};

    fn desc(width: u32, height: u32, pre_transform: SurfaceTransform) -> SwapChainDesc {
        SwapChainDesc {
            width,
            height,
            pre_transform,
            ..SwapChainDesc::default()
        }
    }

    #[test]
    fn test_identity_pretransform() {
        let m = surface_pretransform_matrix(SurfaceTransform::Identity, &Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn test_rotate90_pretransform() {
        let m = surface_pretransform_matrix(SurfaceTransform::Rotate90, &Vector3::new(0.0, 0.0, 1.0));
        let v = m * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert!(v.x.abs() < EPSILON);
        assert!((v.y + 1.0).abs() < EPSILON);
        assert!(v.z.abs() < EPSILON);
    }

    #[test]
    fn test_rotate180_pretransform() {
        let m = surface_pretransform_matrix(SurfaceTransform::Rotate180, &Vector3::new(0.0, 0.0, 1.0));
        let v = m * Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert!((v.x + 1.0).abs() < EPSILON);
        assert!((v.y + 2.0).abs() < EPSILON);
        assert!((v.z - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_projection_scales() {
        let fov = PI / 4.0;
        let focal = 1.0 / (fov / 2.0).tan();

        let proj = adjusted_projection_matrix(&desc(800, 400, SurfaceTransform::Identity), fov, 0.1, 100.0);
        assert!((proj[(0, 0)] - focal / 2.0).abs() < EPSILON);
        assert!((proj[(1, 1)] - focal).abs() < EPSILON);

        let proj = adjusted_projection_matrix(&desc(800, 400, SurfaceTransform::Rotate90), fov, 0.1, 100.0);
        assert!((proj[(0, 0)] - focal).abs() < EPSILON);
        assert!((proj[(1, 1)] - focal * 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_projection_depth_terms() {
        let proj = adjusted_projection_matrix(&SwapChainDesc::default(), PI / 4.0, 0.1, 100.0);
        assert!((proj[(2, 2)] - 100.0 / 99.9).abs() < EPSILON);
        assert!((proj[(2, 3)] + 0.1 * 100.0 / 99.9).abs() < EPSILON);
        assert_eq!(proj[(3, 2)], 1.0);
        assert_eq!(proj[(3, 3)], 0.0);
    }
}
