//! 配置管理模块
//!
//! 提供示例程序配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! width = 800
//! height = 600
//! title = "Tree Sample"
//! resizable = true
//!
//! [graphics]
//! vsync = true
//! gamma = "auto"             # auto, manual
//! pre_transform = "identity" # identity, rotate90, rotate180, rotate270
//! shader_dir = "assets/shaders"
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result, SampleError};

/// 示例程序配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 图形配置
    #[serde(default)]
    pub graphics: GraphicsConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_title")]
    pub title: String,

    /// 是否可调整大小
    #[serde(default = "default_resizable")]
    pub resizable: bool,
}

/// 图形配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// 垂直同步
    #[serde(default = "default_vsync")]
    pub vsync: bool,

    /// Gamma 校正方式
    #[serde(default = "default_gamma")]
    pub gamma: GammaMode,

    /// 表面预变换（用于模拟旋转的显示设备）
    #[serde(default = "default_pre_transform")]
    pub pre_transform: SurfaceTransform,

    /// 着色器源文件目录
    #[serde(default = "default_shader_dir")]
    pub shader_dir: String,
}

/// Gamma 校正方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GammaMode {
    /// 优先使用 sRGB 交换链，由硬件完成转换
    Auto,
    /// 强制使用非 sRGB 交换链，由像素着色器手动转换
    Manual,
}

/// 表面相对于显示设备自然方向的旋转
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceTransform {
    #[default]
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_title() -> String { "Tree Sample".to_string() }
fn default_resizable() -> bool { true }
fn default_vsync() -> bool { true }
fn default_gamma() -> GammaMode { GammaMode::Auto }
fn default_pre_transform() -> SurfaceTransform { SurfaceTransform::Identity }
fn default_shader_dir() -> String { "assets/shaders".to_string() }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "tree_sample.log".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            resizable: default_resizable(),
        }
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            vsync: default_vsync(),
            gamma: default_gamma(),
            pre_transform: default_pre_transform(),
            shader_dir: default_shader_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use tree_sample::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), tree_sample::core::SampleError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SampleError::from(ConfigError::FileNotFound(path_str.clone())),
            _ => SampleError::Io(e),
        })?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析配置
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--width <value>`: 设置窗口宽度
    /// - `--height <value>`: 设置窗口高度
    /// - `--no-vsync`: 关闭垂直同步
    /// - `--manual-gamma`: 强制在像素着色器中进行 gamma 校正
    /// - `--pre-transform <identity|rotate90|rotate180|rotate270>`: 模拟表面旋转
    /// - `--shader-dir <path>`: 着色器源文件目录
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--no-vsync") {
            self.graphics.vsync = false;
        }

        if args.iter().any(|a| a == "--manual-gamma") {
            self.graphics.gamma = GammaMode::Manual;
        }

        if let Some(width) = arg_value(&args, "--width").and_then(|v| v.parse().ok()) {
            self.window.width = width;
        }

        if let Some(height) = arg_value(&args, "--height").and_then(|v| v.parse().ok()) {
            self.window.height = height;
        }

        if let Some(transform) = arg_value(&args, "--pre-transform").and_then(SurfaceTransform::parse) {
            self.graphics.pre_transform = transform;
        }

        if let Some(dir) = arg_value(&args, "--shader-dir") {
            self.graphics.shader_dir = dir.to_string();
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window.width/height".to_string(),
                reason: "Window dimensions must be greater than 0".to_string(),
            }.into());
        }

        if self.graphics.shader_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "graphics.shader_dir".to_string(),
                reason: "Shader directory must not be empty".to_string(),
            }.into());
        }

        Ok(())
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).map(String::as_str)
}

impl SurfaceTransform {
    /// 从命令行字符串解析
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "identity" => Some(SurfaceTransform::Identity),
            "rotate90" => Some(SurfaceTransform::Rotate90),
            "rotate180" => Some(SurfaceTransform::Rotate180),
            "rotate270" => Some(SurfaceTransform::Rotate270),
            _ => None,
        }
    }

    /// 旋转 90 或 270 度时宽高互换
    pub fn swaps_axes(&self) -> bool {
        matches!(self, SurfaceTransform::Rotate90 | SurfaceTransform::Rotate270)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert!(config.graphics.vsync);
        assert_eq!(config.graphics.gamma, GammaMode::Auto);
        assert_eq!(config.graphics.pre_transform, SurfaceTransform::Identity);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.window.width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.graphics.shader_dir = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            [window]
            width = 1280

            [graphics]
            gamma = "manual"
            pre_transform = "rotate90"
            "#,
        )
        .unwrap();

        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.graphics.gamma, GammaMode::Manual);
        assert_eq!(config.graphics.pre_transform, SurfaceTransform::Rotate90);
        assert_eq!(config.logging.log_file, "tree_sample.log");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = Config::from_toml_str("[graphics]\ngamma = \"sometimes\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = Config::from_file_or_default("definitely/not/here.toml");
        assert_eq!(config.window.title, "Tree Sample");
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let err = Config::from_file("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, SampleError::Config(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("tree_sample_bad_utf8_{}.toml", std::process::id()));
        std::fs::write(&path, [0xff, 0xfe, b'[', b'w']).unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, SampleError::Io(_)));
        let _ = std::fs::remove_file(&path);

        // 目录同样不能当作缺失的配置文件
        let err = Config::from_file(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, SampleError::Io(_)));
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args([
            "tree_sample",
            "--width",
            "1024",
            "--height",
            "abc",
            "--no-vsync",
            "--manual-gamma",
            "--pre-transform",
            "rotate270",
            "--shader-dir",
            "shaders",
        ]);

        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert!(!config.graphics.vsync);
        assert_eq!(config.graphics.gamma, GammaMode::Manual);
        assert_eq!(config.graphics.pre_transform, SurfaceTransform::Rotate270);
        assert_eq!(config.graphics.shader_dir, "shaders");
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("tree_sample_config_{}.toml", std::process::id()));
        let mut config = Config::default();
        config.window.title = "Saved".to_string();
        config.graphics.pre_transform = SurfaceTransform::Rotate180;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.window.title, "Saved");
        assert_eq!(loaded.graphics.pre_transform, SurfaceTransform::Rotate180);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_surface_transform_axes() {
        assert!(SurfaceTransform::Rotate90.swaps_axes());
        assert!(SurfaceTransform::Rotate270.swaps_axes());
        assert!(!SurfaceTransform::Rotate180.swaps_axes());
        assert_eq!(SurfaceTransform::parse("ROTATE180"), Some(SurfaceTransform::Rotate180));
        assert_eq!(SurfaceTransform::parse("sideways"), None);
    }
}
