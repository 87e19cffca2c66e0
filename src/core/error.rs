//! 错误处理模块
//!
//! 定义了示例程序中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理

use std::fmt;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, SampleError>;

/// 示例程序的错误类型
#[derive(Debug)]
pub enum SampleError {
    /// 配置错误
    Config(ConfigError),

    /// 图形 API 错误
    Graphics(GraphicsError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),

    /// 初始化错误
    Initialization(String),

    /// 运行时错误
    Runtime(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 图形 API 相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 设备创建失败
    DeviceCreation(String),

    /// 交换链错误
    SwapchainError(String),

    /// 着色器源文件未找到
    ShaderSourceNotFound { path: String, searched: Vec<String> },

    /// 着色器编译失败
    ShaderCompilation(String),

    /// 资源创建失败
    ResourceCreation(String),

    /// 渲染命令执行失败
    CommandExecution(String),
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::Config(e) => write!(f, "Configuration error: {}", e),
            SampleError::Graphics(e) => write!(f, "Graphics error: {}", e),
            SampleError::Io(e) => write!(f, "IO error: {}", e),
            SampleError::Log(msg) => write!(f, "Log error: {}", msg),
            SampleError::Initialization(msg) => write!(f, "Initialization error: {}", msg),
            SampleError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::DeviceCreation(msg) => write!(f, "Device creation failed: {}", msg),
            GraphicsError::SwapchainError(msg) => write!(f, "Swapchain error: {}", msg),
            GraphicsError::ShaderSourceNotFound { path, searched } => write!(
                f,
                "Shader source '{}' not found (searched: {})",
                path,
                searched.join(", ")
            ),
            GraphicsError::ShaderCompilation(msg) => write!(f, "Shader compilation failed: {}", msg),
            GraphicsError::ResourceCreation(msg) => write!(f, "Resource creation failed: {}", msg),
            GraphicsError::CommandExecution(msg) => write!(f, "Command execution failed: {}", msg),
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SampleError::Io(e) => Some(e),
            SampleError::Config(e) => Some(e),
            SampleError::Graphics(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for GraphicsError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for SampleError {
    fn from(err: std::io::Error) -> Self {
        SampleError::Io(err)
    }
}

impl From<ConfigError> for SampleError {
    fn from(err: ConfigError) -> Self {
        SampleError::Config(err)
    }
}

impl From<GraphicsError> for SampleError {
    fn from(err: GraphicsError) -> Self {
        SampleError::Graphics(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphics_error_display() {
        let err: SampleError = GraphicsError::ShaderCompilation("bad token".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Graphics error: Shader compilation failed: bad token"
        );
    }

    #[test]
    fn test_shader_not_found_lists_search_dirs() {
        let err = GraphicsError::ShaderSourceNotFound {
            path: "tree_vs.wgsl".to_string(),
            searched: vec!["a".to_string(), "b".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("tree_vs.wgsl"));
        assert!(msg.contains("a, b"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err: SampleError = ConfigError::ParseError("eof".to_string()).into();
        assert!(err.source().is_some());

        let err = SampleError::Runtime("lost".to_string());
        assert!(err.source().is_none());
    }
}
