//! # 示例应用程序
//!
//! 演示如何加载配置、启动容器并从应用上下文获取组件

mod users;

use anyhow::Context;
use clap::Parser;
use di_abstractions::ApplicationContext;
use infrastructure_composition::{init_logging, ContainerBootstrapper, SettingsLoader};
use std::path::Path;
use tracing::{info, warn};
use users::{UserController, UserRepository};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "interface21 容器示例应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "config/app.toml")]
    config: String,

    /// 日志级别，覆盖配置文件中的 logging.level
    #[arg(long)]
    log_level: Option<String>,

    /// 惰性初始化，单例在第一次查找时创建
    #[arg(long)]
    lazy: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut loader = SettingsLoader::new();
    let config_missing = !Path::new(&args.config).exists();
    if !config_missing {
        loader = loader.with_file(&args.config);
    }
    let mut settings = loader.load_unvalidated().context("加载配置失败")?;

    if let Some(level) = args.log_level {
        settings.logging.level = level;
    }
    if args.lazy {
        settings.container.eager_initialization = false;
    }
    if settings.container.base_packages.is_empty() {
        settings.container.base_packages = vec![module_path!().to_string()];
    }

    init_logging(&settings.logging).context("初始化日志失败")?;
    if config_missing {
        warn!("配置文件 {} 不存在，使用默认配置和环境变量", args.config);
    }
    info!("启动 interface21 示例应用");

    let context = ContainerBootstrapper::new(settings)
        .register_all(users::bean_classes())
        .bootstrap()
        .context("启动容器失败")?;

    let mut classes: Vec<_> = context.get_bean_classes().into_iter().collect();
    classes.sort();
    for class in &classes {
        info!("已注册组件: {}", class);
    }

    for (controller_type, _) in context.get_controllers() {
        info!("控制器: {}", controller_type.short_name());
    }

    let controller = context.get_bean::<UserController>()?;
    let repository = context.get_bean::<dyn UserRepository>()?;
    info!("仓储中共有 {} 个用户", repository.all().len());
    info!("服务统计: {} 个用户", controller.service().count());

    for id in [1, 2, 3] {
        println!("{}", controller.handle_greeting(id));
    }

    let stats = context.bean_factory().stats();
    info!(
        container_id = %stats.container_id,
        "容器统计: {} 个定义，{} 个单例，初始化时间: {:?}",
        stats.registered_definitions,
        stats.singleton_count,
        stats.initialized_at
    );

    Ok(())
}
