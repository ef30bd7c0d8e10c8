// crates/ae_config/src/aerosol_config.rs

//! AerosolConfig - 气溶胶模型配置（全 f64）
//!
//! 定义分段分布、惯性漂移模型和有效通量组装的配置参数。
//! 模型名称在运行时由注册表解析，本层只负责存储和基本校验。
//!
//! # JSON 示例
//!
//! ```json
//! {
//!   "sections": { "distribution": "logarithmic", "n_sections": 20,
//!                 "size_min": 1e-8, "size_max": 1e-4, "interpolation_order": 3.0 },
//!   "drift": { "model": "schillerNaumann", "v_max": 0.5 },
//!   "flux": { "calc_aerosol_after": 0.05 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// 气溶胶模型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AerosolConfig {
    /// 分段分布配置
    #[serde(default)]
    pub sections: SectionalConfig,

    /// 惯性漂移模型配置
    #[serde(default)]
    pub drift: DriftConfig,

    /// 有效通量组装配置
    #[serde(default)]
    pub flux: FluxConfig,
}

/// 分段分布配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionalConfig {
    /// 分布类型名称（"logarithmic"、"linear"）
    #[serde(default = "default_distribution")]
    pub distribution: String,

    /// 分段数 N
    #[serde(default = "default_n_sections")]
    pub n_sections: usize,

    /// 最小尺寸 [m]
    #[serde(default = "default_size_min")]
    pub size_min: f64,

    /// 最大尺寸 [m]
    #[serde(default = "default_size_max")]
    pub size_max: f64,

    /// 插值守恒矩阶数 k（3 对应球形液滴质量）
    #[serde(default = "default_interpolation_order")]
    pub interpolation_order: f64,
}

fn default_distribution() -> String { "logarithmic".to_string() }
fn default_n_sections() -> usize { 10 }
fn default_size_min() -> f64 { 1e-8 }
fn default_size_max() -> f64 { 1e-4 }
fn default_interpolation_order() -> f64 { 3.0 }

impl Default for SectionalConfig {
    fn default() -> Self {
        Self {
            distribution: default_distribution(),
            n_sections: default_n_sections(),
            size_min: default_size_min(),
            size_max: default_size_max(),
            interpolation_order: default_interpolation_order(),
        }
    }
}

/// 惯性漂移模型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// 模型名称（"stokes"、"schillerNaumann"、"none"）
    #[serde(default = "default_drift_model")]
    pub model: String,

    /// 最大相对速度 VMax [m/s]
    #[serde(default = "default_v_max")]
    pub v_max: f64,

    /// 重力加速度矢量 [m/s²]
    #[serde(default = "default_gravity")]
    pub gravity: [f64; 3],

    /// 是否启用 Cunningham 滑移修正
    #[serde(default)]
    pub cunningham: bool,

    /// 依赖 Re 的阻力关系的最大不动点迭代次数
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// 不动点迭代相对收敛容差
    #[serde(default = "default_drift_tolerance")]
    pub tolerance: f64,
}

fn default_drift_model() -> String { "stokes".to_string() }
fn default_v_max() -> f64 { 1.0 }
fn default_gravity() -> [f64; 3] { [0.0, 0.0, -9.81] }
fn default_max_iterations() -> usize { 20 }
fn default_drift_tolerance() -> f64 { 1e-8 }

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            model: default_drift_model(),
            v_max: default_v_max(),
            gravity: default_gravity(),
            cunningham: false,
            max_iterations: default_max_iterations(),
            tolerance: default_drift_tolerance(),
        }
    }
}

/// 有效通量组装配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxConfig {
    /// 气溶胶开始计算的时间 [s]（calcAerosolAfter）
    #[serde(default)]
    pub calc_aerosol_after: f64,

    /// 是否启用并行
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// 单元数达到此值时才并行计算漂移速度
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel() -> bool { true }
fn default_parallel_threshold() -> usize { 4096 }

impl Default for FluxConfig {
    fn default() -> Self {
        Self {
            calc_aerosol_after: 0.0,
            parallel: default_parallel(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl Default for AerosolConfig {
    fn default() -> Self {
        Self {
            sections: SectionalConfig::default(),
            drift: DriftConfig::default(),
            flux: FluxConfig::default(),
        }
    }
}

/// 模型名称规范化：小写并去除 `-`、`_` 和空格
///
/// ```
/// use ae_config::normalize_model_name;
/// assert_eq!(normalize_model_name("Schiller-Naumann"), "schillernaumann");
/// assert_eq!(normalize_model_name("schillerNaumann"), "schillernaumann");
/// ```
pub fn normalize_model_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl AerosolConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: AerosolConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sections.validate()?;
        self.drift.validate()?;
        self.flux.validate()?;
        Ok(())
    }
}

impl SectionalConfig {
    /// 验证分段配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.distribution.trim().is_empty() {
            return Err(ConfigError::Missing("sections.distribution".to_string()));
        }

        if self.n_sections < 1 {
            return Err(ConfigError::invalid(
                "sections.n_sections",
                self.n_sections,
                "分段数必须 ≥ 1",
            ));
        }

        if !(self.size_min.is_finite() && self.size_min > 0.0) {
            return Err(ConfigError::invalid(
                "sections.size_min",
                self.size_min,
                "最小尺寸必须为正的有限值",
            ));
        }

        // NaN 也在这里被拒绝
        if !(self.size_max.is_finite() && self.size_max > self.size_min) {
            return Err(ConfigError::invalid(
                "sections.size_max",
                self.size_max,
                format!("最大尺寸必须大于最小尺寸 {}", self.size_min),
            ));
        }

        if !(self.interpolation_order.is_finite() && self.interpolation_order >= 0.0) {
            return Err(ConfigError::invalid(
                "sections.interpolation_order",
                self.interpolation_order,
                "矩阶数必须为非负有限值",
            ));
        }

        Ok(())
    }
}

impl DriftConfig {
    /// 验证漂移模型配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Missing("drift.model".to_string()));
        }

        if !(self.v_max.is_finite() && self.v_max > 0.0) {
            return Err(ConfigError::invalid(
                "drift.v_max",
                self.v_max,
                "VMax 必须为正的有限值",
            ));
        }

        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(ConfigError::invalid(
                "drift.gravity",
                format!("{:?}", self.gravity),
                "重力分量必须为有限值",
            ));
        }

        if self.max_iterations == 0 {
            return Err(ConfigError::invalid(
                "drift.max_iterations",
                self.max_iterations,
                "迭代次数必须 ≥ 1",
            ));
        }

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::invalid(
                "drift.tolerance",
                self.tolerance,
                "收敛容差必须为正",
            ));
        }

        Ok(())
    }
}

impl FluxConfig {
    /// 验证通量配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.calc_aerosol_after.is_finite() {
            return Err(ConfigError::invalid(
                "flux.calc_aerosol_after",
                self.calc_aerosol_after,
                "起始时间必须为有限值",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AerosolConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sections.distribution, "logarithmic");
        assert_eq!(config.drift.gravity, [0.0, 0.0, -9.81]);
    }

    #[test]
    fn test_invalid_section_count() {
        let mut config = AerosolConfig::default();
        config.sections.n_sections = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.key(), Some("sections.n_sections"));
    }

    #[test]
    fn test_inverted_range() {
        let mut config = AerosolConfig::default();
        config.sections.size_max = config.sections.size_min;
        let err = config.validate().unwrap_err();
        assert_eq!(err.key(), Some("sections.size_max"));
        assert!(err.to_string().contains("1e-8") || err.to_string().contains("0.00000001"));
    }

    #[test]
    fn test_non_positive_min() {
        let mut config = AerosolConfig::default();
        config.sections.size_min = 0.0;
        assert_eq!(config.validate().unwrap_err().key(), Some("sections.size_min"));
    }

    #[test]
    fn test_negative_order() {
        let mut config = AerosolConfig::default();
        config.sections.interpolation_order = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_v_max() {
        let mut config = AerosolConfig::default();
        config.drift.v_max = 0.0;
        assert_eq!(config.validate().unwrap_err().key(), Some("drift.v_max"));
    }

    #[test]
    fn test_empty_model_name() {
        let mut config = AerosolConfig::default();
        config.drift.model = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "sections": { "n_sections": 5 }, "drift": { "v_max": 0.01 } }"#;
        let config = AerosolConfig::from_json_str(json).unwrap();
        assert_eq!(config.sections.n_sections, 5);
        assert_eq!(config.sections.size_min, 1e-8);
        assert_eq!(config.drift.v_max, 0.01);
        assert_eq!(config.drift.model, "stokes");
        assert_eq!(config.flux.calc_aerosol_after, 0.0);
    }

    #[test]
    fn test_json_rejects_invalid() {
        let json = r#"{ "sections": { "size_min": 1e-4, "size_max": 1e-8 } }"#;
        assert!(AerosolConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_json_parse_error() {
        assert!(matches!(
            AerosolConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_file_roundtrip() {
        let mut config = AerosolConfig::default();
        config.drift.model = "schillerNaumann".to_string();
        config.flux.calc_aerosol_after = 0.25;

        let path = std::env::temp_dir().join(format!("ae_config_{}.json", std::process::id()));
        config.save_to_file(&path).unwrap();
        let loaded = AerosolConfig::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_normalize_model_name() {
        assert_eq!(normalize_model_name("Log_arithmic"), "logarithmic");
        assert_eq!(normalize_model_name("none"), "none");
    }
}
