// crates/ae_sectional/src/registry.rs

//! 按名称选择模型的注册表
//!
//! 分布类型与漂移模型在配置中以名称给出，构建时通过注册表实例化。
//! 名称比较前经过 [`normalize_model_name`] 规范化，
//! 因此 `"schillerNaumann"`、`"Schiller-Naumann"` 与 `"schiller_naumann"` 等价。
//! 未注册的名称直接报错，不做回退。

use std::collections::BTreeMap;

use ae_config::{normalize_model_name, AerosolConfig};

use crate::distribution::{LinearDistribution, LogarithmicDistribution, SectionalDistribution};
use crate::drift::{InertialModel, NoDrift, SchillerNaumannDrift, StokesDrift};
use crate::error::{SectionalError, SectionalResult};

/// 模型构造函数
pub type Constructor<T> = fn(&AerosolConfig) -> SectionalResult<Box<T>>;

/// 名称到构造函数的映射
pub struct ModelRegistry<T: ?Sized> {
    kind: &'static str,
    /// 规范化名称 -> (注册名称, 构造函数)
    constructors: BTreeMap<String, (String, Constructor<T>)>,
}

/// 分布注册表
pub type DistributionRegistry = ModelRegistry<dyn SectionalDistribution>;

/// 漂移模型注册表
pub type DriftModelRegistry = ModelRegistry<dyn InertialModel>;

impl<T: ?Sized> ModelRegistry<T> {
    /// 创建空注册表，`kind` 用于错误信息
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            constructors: BTreeMap::new(),
        }
    }

    /// 注册构造函数，同名时覆盖并返回 true
    pub fn register(&mut self, name: &str, constructor: Constructor<T>) -> bool {
        self.constructors
            .insert(normalize_model_name(name), (name.to_string(), constructor))
            .is_some()
    }

    /// 是否已注册
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&normalize_model_name(name))
    }

    /// 已注册的名称
    pub fn names(&self) -> Vec<String> {
        self.constructors.values().map(|(n, _)| n.clone()).collect()
    }

    /// 注册表类别
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// 按名称构建模型
    pub fn create(&self, name: &str, config: &AerosolConfig) -> SectionalResult<Box<T>> {
        match self.constructors.get(&normalize_model_name(name)) {
            Some((_, constructor)) => constructor(config),
            None => Err(SectionalError::UnknownModel {
                kind: self.kind,
                name: name.to_string(),
                available: self.names(),
            }),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for ModelRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("kind", &self.kind)
            .field("names", &self.names())
            .finish()
    }
}

// ============================================================
// 内置模型
// ============================================================

impl ModelRegistry<dyn SectionalDistribution> {
    /// 包含内置分布的注册表
    pub fn with_defaults() -> Self {
        let mut registry = Self::new("distribution");
        registry.register(LogarithmicDistribution::NAME, build_logarithmic);
        registry.register(LinearDistribution::NAME, build_linear);
        registry
    }
}

impl ModelRegistry<dyn InertialModel> {
    /// 包含内置漂移模型的注册表
    pub fn with_defaults() -> Self {
        let mut registry = Self::new("inertial model");
        registry.register(StokesDrift::NAME, build_stokes);
        registry.register(SchillerNaumannDrift::NAME, build_schiller_naumann);
        registry.register(NoDrift::NAME, build_no_drift);
        registry
    }
}

fn build_logarithmic(config: &AerosolConfig) -> SectionalResult<Box<dyn SectionalDistribution>> {
    let s = &config.sections;
    Ok(Box::new(LogarithmicDistribution::new(s.n_sections, s.size_min, s.size_max)?))
}

fn build_linear(config: &AerosolConfig) -> SectionalResult<Box<dyn SectionalDistribution>> {
    let s = &config.sections;
    Ok(Box::new(LinearDistribution::new(s.n_sections, s.size_min, s.size_max)?))
}

fn build_stokes(config: &AerosolConfig) -> SectionalResult<Box<dyn InertialModel>> {
    Ok(Box::new(StokesDrift::from_config(&config.drift)?))
}

fn build_schiller_naumann(config: &AerosolConfig) -> SectionalResult<Box<dyn InertialModel>> {
    Ok(Box::new(SchillerNaumannDrift::from_config(&config.drift)?))
}

fn build_no_drift(config: &AerosolConfig) -> SectionalResult<Box<dyn InertialModel>> {
    Ok(Box::new(NoDrift::from_config(&config.drift)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_distributions() {
        let registry = DistributionRegistry::with_defaults();
        assert!(registry.contains("logarithmic"));
        assert!(registry.contains("Linear"));
        let dist = registry.create("logarithmic", &AerosolConfig::default()).unwrap();
        assert_eq!(dist.name(), "logarithmic");
        assert_eq!(dist.n_sections(), 10);
    }

    #[test]
    fn test_drift_name_normalization() {
        let registry = DriftModelRegistry::with_defaults();
        let config = AerosolConfig::default();
        for name in ["schillerNaumann", "Schiller-Naumann", "schiller_naumann"] {
            let model = registry.create(name, &config).unwrap();
            assert_eq!(model.name(), "schillerNaumann");
        }
    }

    #[test]
    fn test_unknown_name() {
        let registry = DriftModelRegistry::with_defaults();
        let err = registry.create("magic", &AerosolConfig::default()).unwrap_err();
        match err {
            SectionalError::UnknownModel { kind, name, available } => {
                assert_eq!(kind, "inertial model");
                assert_eq!(name, "magic");
                assert_eq!(available.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_constructor_error_propagates() {
        let registry = DistributionRegistry::with_defaults();
        let mut config = AerosolConfig::default();
        config.sections.size_max = config.sections.size_min;
        assert!(matches!(
            registry.create("linear", &config),
            Err(SectionalError::InvalidSections { .. })
        ));
    }

    #[test]
    fn test_drift_v_max_checked_without_validate() {
        let registry = DriftModelRegistry::with_defaults();
        let mut config = AerosolConfig::default();
        config.drift.v_max = -0.1;
        for name in registry.names() {
            assert!(matches!(
                registry.create(&name, &config),
                Err(SectionalError::Foundation(_))
            ));
        }
    }

    #[test]
    fn test_register_custom() {
        fn build(config: &AerosolConfig) -> SectionalResult<Box<dyn InertialModel>> {
            Ok(Box::new(NoDrift::new(config.drift.v_max)?))
        }
        let mut registry = DriftModelRegistry::new("inertial model");
        assert!(!registry.register("tracer", build));
        assert!(registry.register("Tracer", build));
        assert_eq!(registry.names(), vec!["Tracer".to_string()]);
    }
}
