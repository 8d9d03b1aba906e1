//! 构造参数与解析结果
//!
//! 容器内部以类型擦除的形式保存实例，这里提供擦除形式与具体类型之间的转换

use infrastructure_common::{BeanError, BeanResult, TypeInfo};
use std::any::Any;
use std::sync::Arc;

/// 类型擦除的单例实例，内部为 `Arc<具体类型>`
pub type SharedBean = Arc<dyn Any + Send + Sync>;

/// 按某个请求类型视图装箱的实例，内部为 `Arc<请求类型>`
pub type ErasedBean = Box<dyn Any + Send + Sync>;

/// 构造函数的实参列表
///
/// 实参顺序与构造函数声明的参数类型顺序一致，每个实参都已转换为声明的参数类型。
pub struct BeanArguments {
    owner: TypeInfo,
    values: Vec<(TypeInfo, ErasedBean)>,
    cursor: usize,
}

impl BeanArguments {
    /// 为指定组件创建空的实参列表
    pub fn new(owner: TypeInfo) -> Self {
        Self {
            owner,
            values: Vec::new(),
            cursor: 0,
        }
    }

    /// 追加一个已解析的实参
    pub fn push(&mut self, parameter_type: TypeInfo, value: ErasedBean) {
        self.values.push((parameter_type, value));
    }

    /// 正在构造的组件类型
    pub fn owner(&self) -> TypeInfo {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 按位置获取实参
    pub fn get<P>(&self, index: usize) -> BeanResult<Arc<P>>
    where
        P: ?Sized + Send + Sync + 'static,
    {
        let (declared, value) =
            self.values
                .get(index)
                .ok_or_else(|| BeanError::ArgumentMismatch {
                    index,
                    expected: std::any::type_name::<P>().to_string(),
                    actual: "<missing>".to_string(),
                })?;

        (**value)
            .downcast_ref::<Arc<P>>()
            .cloned()
            .ok_or_else(|| BeanError::ArgumentMismatch {
                index,
                expected: std::any::type_name::<P>().to_string(),
                actual: declared.name.to_string(),
            })
    }

    /// 按声明顺序依次获取下一个实参
    pub fn next<P>(&mut self) -> BeanResult<Arc<P>>
    where
        P: ?Sized + Send + Sync + 'static,
    {
        let value = self.get::<P>(self.cursor)?;
        self.cursor += 1;
        Ok(value)
    }
}

impl std::fmt::Debug for BeanArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanArguments")
            .field("owner", &self.owner)
            .field(
                "parameters",
                &self.values.iter().map(|(ty, _)| ty.name).collect::<Vec<_>>(),
            )
            .field("cursor", &self.cursor)
            .finish()
    }
}

/// 按请求类型解析得到的 Bean
pub struct ResolvedBean {
    bean_type: TypeInfo,
    value: ErasedBean,
}

impl ResolvedBean {
    pub fn new(bean_type: TypeInfo, value: ErasedBean) -> Self {
        Self { bean_type, value }
    }

    /// 请求的类型
    pub fn bean_type(&self) -> TypeInfo {
        self.bean_type
    }

    /// 转换为请求类型的共享引用
    pub fn downcast<T>(self) -> BeanResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.value
            .downcast::<Arc<T>>()
            .map(|bean| *bean)
            .map_err(|_| BeanError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
            })
    }
}

impl std::fmt::Debug for ResolvedBean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedBean")
            .field("bean_type", &self.bean_type)
            .finish_non_exhaustive()
    }
}
