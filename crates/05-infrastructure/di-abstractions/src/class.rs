//! Bean 候选类型声明
//!
//! 扫描器返回的"类"。构造函数、可赋值的接口类型与组件标记都在注册时显式声明，
//! 容器在运行期只做表查找与间接调用。

use crate::arguments::{BeanArguments, ErasedBean, SharedBean};
use infrastructure_common::{BoxError, TypeInfo};
use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

/// 组件标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stereotype {
    /// 通用组件
    Component,
    /// 业务服务
    Service,
    /// 数据访问
    Repository,
    /// 控制器，由上层框架单独枚举
    Controller,
}

type InstantiateFn = Arc<dyn Fn(&mut BeanArguments) -> Result<SharedBean, BoxError> + Send + Sync>;

type CastFn = Arc<dyn Fn(SharedBean) -> Option<ErasedBean> + Send + Sync>;

/// 类型化的构造函数声明
///
/// ```rust,ignore
/// Constructor::new(|args| Ok(Consumer { service: args.next::<dyn Service>()? }))
///     .with_parameter::<dyn Service>()
///     .injectable()
/// ```
pub struct Constructor<T> {
    parameter_types: Vec<TypeInfo>,
    injectable: bool,
    instantiate: InstantiateFn,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Constructor<T>
where
    T: Send + Sync + 'static,
{
    /// 创建构造函数，闭包按声明顺序读取实参
    pub fn new<F>(instantiate: F) -> Self
    where
        F: Fn(&mut BeanArguments) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            parameter_types: Vec::new(),
            injectable: false,
            instantiate: Arc::new(move |args: &mut BeanArguments| {
                let bean = instantiate(args)?;
                Ok(Arc::new(bean) as SharedBean)
            }),
            _marker: PhantomData,
        }
    }

    /// 创建无参构造函数
    pub fn no_args<F>(instantiate: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::new(move |_| Ok(instantiate()))
    }

    /// 追加一个参数类型，可以是具体类型或 trait object
    pub fn with_parameter<P: ?Sized + 'static>(mut self) -> Self {
        self.parameter_types.push(TypeInfo::of::<P>());
        self
    }

    /// 标记为注入构造函数
    pub fn injectable(mut self) -> Self {
        self.injectable = true;
        self
    }
}

/// 类型擦除后的构造函数
#[derive(Clone)]
pub struct ConstructorDefinition {
    parameter_types: Vec<TypeInfo>,
    injectable: bool,
    instantiate: InstantiateFn,
}

impl ConstructorDefinition {
    /// 有序的参数类型
    pub fn parameter_types(&self) -> &[TypeInfo] {
        &self.parameter_types
    }

    pub fn is_injectable(&self) -> bool {
        self.injectable
    }

    /// 调用构造函数
    pub fn instantiate(&self, args: &mut BeanArguments) -> Result<SharedBean, BoxError> {
        (self.instantiate)(args)
    }
}

impl<T> From<Constructor<T>> for ConstructorDefinition {
    fn from(constructor: Constructor<T>) -> Self {
        Self {
            parameter_types: constructor.parameter_types,
            injectable: constructor.injectable,
            instantiate: constructor.instantiate,
        }
    }
}

impl std::fmt::Debug for ConstructorDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorDefinition")
            .field("parameter_types", &self.parameter_types)
            .field("injectable", &self.injectable)
            .field("instantiate", &"<function>")
            .finish()
    }
}

/// 可赋值类型绑定
///
/// 把具体类型的实例转换为某个请求类型（自身或声明实现的接口）的视图。
#[derive(Clone)]
pub struct TypeBinding {
    type_info: TypeInfo,
    cast: CastFn,
}

impl TypeBinding {
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 转换实例，实例类型与绑定不符时返回 `None`
    pub fn cast(&self, instance: SharedBean) -> Option<ErasedBean> {
        (self.cast)(instance)
    }
}

impl std::fmt::Debug for TypeBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeBinding")
            .field("type_info", &self.type_info)
            .finish_non_exhaustive()
    }
}

/// 扫描得到的候选 Bean 类型
#[derive(Debug, Clone)]
pub struct BeanClass {
    type_info: TypeInfo,
    constructors: Vec<ConstructorDefinition>,
    bindings: Vec<TypeBinding>,
    stereotypes: HashSet<Stereotype>,
}

impl BeanClass {
    /// 开始声明一个候选类型
    pub fn builder<T: Send + Sync + 'static>() -> BeanClassBuilder<T> {
        BeanClassBuilder::new()
    }

    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    pub fn constructors(&self) -> &[ConstructorDefinition] {
        &self.constructors
    }

    /// 可赋值类型，第一个总是类型自身
    pub fn bindings(&self) -> &[TypeBinding] {
        &self.bindings
    }

    pub fn stereotypes(&self) -> &HashSet<Stereotype> {
        &self.stereotypes
    }

    pub fn has_stereotype(&self, stereotype: Stereotype) -> bool {
        self.stereotypes.contains(&stereotype)
    }
}

/// 候选类型构建器
pub struct BeanClassBuilder<T> {
    constructors: Vec<ConstructorDefinition>,
    bindings: Vec<TypeBinding>,
    stereotypes: HashSet<Stereotype>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> BeanClassBuilder<T>
where
    T: Send + Sync + 'static,
{
    fn new() -> Self {
        let self_binding = TypeBinding {
            type_info: TypeInfo::of::<T>(),
            cast: Arc::new(|instance: SharedBean| {
                instance
                    .downcast::<T>()
                    .ok()
                    .map(|bean| Box::new(bean) as ErasedBean)
            }),
        };

        Self {
            constructors: Vec::new(),
            bindings: vec![self_binding],
            stereotypes: HashSet::new(),
            _marker: PhantomData,
        }
    }

    /// 添加构造函数
    pub fn constructor(mut self, constructor: Constructor<T>) -> Self {
        self.constructors.push(constructor.into());
        self
    }

    /// 声明此类型可以赋值给接口 `I`
    ///
    /// ```rust,ignore
    /// BeanClass::builder::<ServiceImpl>().implements::<dyn Service, _>(|bean| bean)
    /// ```
    pub fn implements<I, F>(mut self, upcast: F) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
    {
        let type_info = TypeInfo::of::<I>();
        if self.bindings.iter().any(|binding| binding.type_info == type_info) {
            return self;
        }

        self.bindings.push(TypeBinding {
            type_info,
            cast: Arc::new(move |instance: SharedBean| {
                instance
                    .downcast::<T>()
                    .ok()
                    .map(|bean| Box::new(upcast(bean)) as ErasedBean)
            }),
        });
        self
    }

    /// 添加组件标记
    pub fn stereotype(mut self, stereotype: Stereotype) -> Self {
        self.stereotypes.insert(stereotype);
        self
    }

    /// 标记为控制器
    pub fn controller(self) -> Self {
        self.stereotype(Stereotype::Controller)
    }

    pub fn build(self) -> BeanClass {
        BeanClass {
            type_info: TypeInfo::of::<T>(),
            constructors: self.constructors,
            bindings: self.bindings,
            stereotypes: self.stereotypes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Repository: Send + Sync {
        fn find(&self) -> &str;
    }

    #[derive(Debug)]
    struct MemoryRepository;

    impl Repository for MemoryRepository {
        fn find(&self) -> &str {
            "memory"
        }
    }

    #[test]
    fn test_builder_binds_self_first() {
        let class = BeanClass::builder::<MemoryRepository>()
            .constructor(Constructor::no_args(|| MemoryRepository))
            .implements::<dyn Repository, _>(|bean| bean)
            .stereotype(Stereotype::Repository)
            .build();

        assert_eq!(class.type_info(), TypeInfo::of::<MemoryRepository>());
        assert_eq!(class.bindings()[0].type_info(), TypeInfo::of::<MemoryRepository>());
        assert_eq!(class.bindings()[1].type_info(), TypeInfo::of::<dyn Repository>());
        assert!(class.has_stereotype(Stereotype::Repository));
        assert!(!class.has_stereotype(Stereotype::Controller));
    }

    #[test]
    fn test_duplicate_interface_binding_is_ignored() {
        let class = BeanClass::builder::<MemoryRepository>()
            .implements::<dyn Repository, _>(|bean| bean)
            .implements::<dyn Repository, _>(|bean| bean)
            .build();

        assert_eq!(class.bindings().len(), 2);
    }

    #[test]
    fn test_constructor_instantiates_and_bindings_cast() {
        let class = BeanClass::builder::<MemoryRepository>()
            .constructor(Constructor::no_args(|| MemoryRepository))
            .implements::<dyn Repository, _>(|bean| bean)
            .build();

        let mut args = BeanArguments::new(class.type_info());
        let instance = class.constructors()[0].instantiate(&mut args).unwrap();

        let view = class.bindings()[1].cast(instance.clone()).unwrap();
        let repository = view.downcast::<Arc<dyn Repository>>().unwrap();
        assert_eq!(repository.find(), "memory");

        let wrong: SharedBean = Arc::new(1_u8);
        assert!(class.bindings()[1].cast(wrong).is_none());
    }

    #[test]
    fn test_constructor_declares_parameters() {
        struct Finder {
            repository: Arc<dyn Repository>,
        }

        let constructor: ConstructorDefinition = Constructor::new(|args| {
            Ok(Finder {
                repository: args.next::<dyn Repository>()?,
            })
        })
        .with_parameter::<dyn Repository>()
        .injectable()
        .into();

        assert!(constructor.is_injectable());
        assert_eq!(
            constructor.parameter_types(),
            &[TypeInfo::of::<dyn Repository>()]
        );

        let repository: Arc<dyn Repository> = Arc::new(MemoryRepository);
        let mut args = BeanArguments::new(TypeInfo::of::<Finder>());
        args.push(TypeInfo::of::<dyn Repository>(), Box::new(repository));
        let instance = constructor.instantiate(&mut args).unwrap();
        let finder = instance.downcast::<Finder>().unwrap();
        assert_eq!(finder.repository.find(), "memory");
    }
}
