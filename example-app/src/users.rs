//! 示例用户模块
//!
//! 仓储接口、内存实现、业务服务与控制器，依赖关系全部由容器装配。

use di_abstractions::{BeanClass, Constructor, Stereotype};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// 用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// 用户仓储
pub trait UserRepository: Send + Sync {
    fn find(&self, id: u64) -> Option<User>;
    fn all(&self) -> Vec<User>;
}

/// 内存用户仓储
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: BTreeMap<u64, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        let users = [(1, "alice"), (2, "bob")]
            .into_iter()
            .map(|(id, name)| {
                (
                    id,
                    User {
                        id,
                        name: name.to_string(),
                    },
                )
            })
            .collect();
        Self { users }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find(&self, id: u64) -> Option<User> {
        self.users.get(&id).cloned()
    }

    fn all(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }
}

/// 用户服务
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub fn greet(&self, id: u64) -> Option<String> {
        debug!("查找用户 {}", id);
        self.repository
            .find(id)
            .map(|user| format!("你好, {}!", user.name))
    }

    pub fn count(&self) -> usize {
        self.repository.all().len()
    }
}

/// 用户控制器
pub struct UserController {
    service: Arc<UserService>,
}

impl UserController {
    pub fn new(service: Arc<UserService>) -> Self {
        Self { service }
    }

    /// 处理 `GET /users/{id}/greeting`
    pub fn handle_greeting(&self, id: u64) -> String {
        self.service
            .greet(id)
            .unwrap_or_else(|| format!("用户 {} 不存在", id))
    }

    pub fn service(&self) -> &Arc<UserService> {
        &self.service
    }
}

/// 本模块的候选类型
pub fn bean_classes() -> Vec<BeanClass> {
    vec![
        BeanClass::builder::<InMemoryUserRepository>()
            .constructor(Constructor::no_args(InMemoryUserRepository::new))
            .implements::<dyn UserRepository, _>(|bean| bean)
            .stereotype(Stereotype::Repository)
            .build(),
        BeanClass::builder::<UserService>()
            .constructor(
                Constructor::new(|args| Ok(UserService::new(args.next::<dyn UserRepository>()?)))
                    .with_parameter::<dyn UserRepository>(),
            )
            .stereotype(Stereotype::Service)
            .build(),
        BeanClass::builder::<UserController>()
            .constructor(
                Constructor::new(|args| Ok(UserController::new(args.next::<UserService>()?)))
                    .with_parameter::<UserService>(),
            )
            .controller()
            .build(),
    ]
}
