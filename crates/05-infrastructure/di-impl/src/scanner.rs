//! 组件扫描器实现
//!
//! 候选类型通过声明式注册进入目录，扫描时按包前缀过滤。

use di_abstractions::{BeanClass, BeanScanner};
use infrastructure_common::{BeanError, BeanResult};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// 基于注册目录的组件扫描器
#[derive(Debug, Clone)]
pub struct CatalogBeanScanner {
    /// 扫描器名称
    name: String,
    /// 已注册的候选类型
    classes: Vec<BeanClass>,
    /// 排除的包
    exclude_packages: Vec<String>,
}

impl CatalogBeanScanner {
    /// 创建新的组件扫描器
    pub fn new() -> Self {
        Self {
            name: "CatalogBeanScanner".to_string(),
            classes: Vec::new(),
            exclude_packages: Vec::new(),
        }
    }

    /// 设置扫描器名称
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// 注册候选类型，同一类型只保留第一次注册
    pub fn register(mut self, class: BeanClass) -> Self {
        let type_info = class.type_info();
        if self.classes.iter().any(|existing| existing.type_info() == type_info) {
            warn!("候选类型已注册，忽略重复注册: {}", type_info);
            return self;
        }

        debug!("注册候选类型: {}", type_info);
        self.classes.push(class);
        self
    }

    /// 批量注册候选类型
    pub fn register_all<I>(self, classes: I) -> Self
    where
        I: IntoIterator<Item = BeanClass>,
    {
        classes.into_iter().fold(self, Self::register)
    }

    /// 添加排除的包
    pub fn exclude_package<S: Into<String>>(mut self, package: S) -> Self {
        self.exclude_packages.push(package.into());
        self
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn is_excluded(&self, class: &BeanClass) -> bool {
        self.exclude_packages
            .iter()
            .any(|package| class.type_info().is_in_package(package))
    }
}

impl Default for CatalogBeanScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanScanner for CatalogBeanScanner {
    fn scan(&self, base_packages: &[String]) -> BeanResult<Vec<BeanClass>> {
        if base_packages.is_empty() {
            warn!("未指定扫描包，扫描结果为空");
            return Ok(Vec::new());
        }

        if let Some(blank) = base_packages.iter().find(|package| package.trim().is_empty()) {
            return Err(BeanError::scan_failed(format!("扫描包名称无效: {:?}", blank)));
        }

        let mut seen = HashSet::new();
        let discovered: Vec<BeanClass> = self
            .classes
            .iter()
            .filter(|class| {
                base_packages
                    .iter()
                    .any(|package| class.type_info().is_in_package(package))
            })
            .filter(|class| !self.is_excluded(class))
            .filter(|class| seen.insert(class.type_info().id))
            .cloned()
            .collect();

        for class in &discovered {
            debug!("发现候选类型: {}", class.type_info());
        }
        info!(
            "扫描器 {} 在 {:?} 中发现 {} 个候选类型",
            self.name,
            base_packages,
            discovered.len()
        );
        Ok(discovered)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
