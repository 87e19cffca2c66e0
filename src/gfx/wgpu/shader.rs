//! 着色器加载
//!
//! 着色器以 WGSL 源文件形式按相对路径从搜索目录中加载。
//! WGSL 没有预处理器，宏以模块级 `const NAME: i32 = VALUE;` 声明的形式
//! 插入到源码开头，着色器中直接按常量使用。

use std::path::{Path, PathBuf};

use tracing::debug;

use super::validation::capture_validation;
use crate::core::config::GraphicsConfig;
use crate::core::error::{GraphicsError, Result};

/// 随 crate 一起分发的着色器目录
const BUNDLED_SHADER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/shaders");

/// 着色器源文件工厂
///
/// 依次在每个搜索目录中查找文件，返回第一个命中的内容。
#[derive(Debug, Clone)]
pub struct ShaderSourceFactory {
    search_dirs: Vec<PathBuf>,
}

impl ShaderSourceFactory {
    pub fn new<I, P>(search_dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_dirs: search_dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// 配置目录优先，其次是 crate 自带的 `assets/shaders`
    pub fn from_config(config: &GraphicsConfig) -> Self {
        let mut dirs = vec![PathBuf::from(&config.shader_dir)];
        let bundled = PathBuf::from(BUNDLED_SHADER_DIR);
        if dirs[0] != bundled {
            dirs.push(bundled);
        }
        Self::new(dirs)
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// 读取相对路径对应的着色器源码
    pub fn load(&self, relative_path: &str) -> Result<String> {
        for dir in &self.search_dirs {
            let candidate = dir.join(relative_path);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "Loading shader source");
                return Ok(std::fs::read_to_string(&candidate)?);
            }
        }

        Err(GraphicsError::ShaderSourceNotFound {
            path: relative_path.to_string(),
            searched: self
                .search_dirs
                .iter()
                .map(|d| d.display().to_string())
                .collect(),
        }
        .into())
    }
}

/// 编译期宏
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderMacro {
    pub name: String,
    pub definition: String,
}

impl ShaderMacro {
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderType {
    Vertex,
    Pixel,
}

/// 着色器创建参数
#[derive(Debug, Clone)]
pub struct ShaderCreateInfo<'a> {
    /// 调试名称
    pub name: &'a str,
    /// 相对于搜索目录的源文件路径
    pub file_path: &'a str,
    /// 入口函数名
    pub entry_point: &'a str,
    pub shader_type: ShaderType,
    pub macros: &'a [ShaderMacro],
}

/// 编译完成的着色器
#[derive(Debug)]
pub struct Shader {
    pub module: wgpu::ShaderModule,
    pub entry_point: String,
    pub shader_type: ShaderType,
}

/// 将宏展开为常量声明并拼接到源码之前
pub fn preprocess(source: &str, macros: &[ShaderMacro]) -> Result<String> {
    let mut out = String::with_capacity(source.len() + macros.len() * 48);

    for m in macros {
        if !is_identifier(&m.name) {
            return Err(GraphicsError::ShaderCompilation(format!(
                "Invalid macro name '{}'",
                m.name
            ))
            .into());
        }
        let value: i32 = m.definition.trim().parse().map_err(|_| {
            GraphicsError::ShaderCompilation(format!(
                "Macro '{}' must be an integer, got '{}'",
                m.name, m.definition
            ))
        })?;
        out.push_str(&format!("const {}: i32 = {};\n", m.name, value));
    }

    out.push_str(source);
    Ok(out)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// 加载、预处理并编译着色器
///
/// WGSL 解析或验证失败时返回 `GraphicsError::ShaderCompilation`。
pub fn create_shader(
    device: &wgpu::Device,
    factory: &ShaderSourceFactory,
    info: &ShaderCreateInfo<'_>,
) -> Result<Shader> {
    let source = factory.load(info.file_path)?;
    let source = preprocess(&source, info.macros)?;

    debug!(name = info.name, shader_type = ?info.shader_type, "Compiling shader");
    let module = capture_validation(
        device,
        |msg| GraphicsError::ShaderCompilation(format!("{} ({}): {}", info.name, Path::new(info.file_path).display(), msg)),
        || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(info.name),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            })
        },
    )?;

    Ok(Shader {
        module,
        entry_point: info.entry_point.to_string(),
        shader_type: info.shader_type,
    })
}
