//! 元数据定义
//!
//! 提供容器使用的类型元数据

use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 容器中"类"的标识。相等性与哈希只取决于 [`TypeId`]，名称仅用于日志与按名查找。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称，例如 `my_app::service::UserService`
    pub name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        let path = self.path_without_generics();
        match path.rsplit_once("::") {
            Some((_, short)) => short,
            None => path,
        }
    }

    /// 获取模块路径
    ///
    /// trait object 会去掉 `dyn ` 前缀。不在任何模块中的类型返回空字符串。
    pub fn module_path(&self) -> &'static str {
        match self.path_without_generics().rsplit_once("::") {
            Some((module, _)) => module,
            None => "",
        }
    }

    /// 检查类型是否位于指定包（模块路径前缀）之下
    pub fn is_in_package(&self, package: &str) -> bool {
        let package = package.trim().trim_end_matches("::");
        if package.is_empty() {
            return false;
        }

        let module = self.module_path();
        module == package
            || module
                .strip_prefix(package)
                .is_some_and(|rest| rest.starts_with("::"))
    }

    /// 检查名称是否指向此类型（完整名称或简短名称）
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.name == name || self.path_without_generics() == name || self.short_name() == name
    }

    fn path_without_generics(&self) -> &'static str {
        let name = self.name.strip_prefix("dyn ").unwrap_or(self.name);
        match name.find(['<', ' ']) {
            Some(index) => &name[..index],
            None => name,
        }
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(other.name).then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
