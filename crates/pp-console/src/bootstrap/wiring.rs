//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (cache, discovery, preferences file)
//!   / 创建 infra 层具体实现
//! - ✅ Create platform implementations (automation, displays)
//!   / 创建 platform 层具体实现
//! - ✅ Compose the preview pipeline in configured order / 按配置顺序组合预览管线
//! - ✅ Inject all dependencies into the session / 将所有依赖注入到会话
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//!
//! > **This is the only place allowed to depend on pp-infra + pp-platform + pp-app
//! > simultaneously.**
//! > **这是唯一允许同时依赖 pp-infra、pp-platform 和 pp-app 的地方。**

use std::sync::Arc;

use pp_app::{
    AppDeps, AutomationExportStrategy, AutomationLauncher, MonitorAwareLauncher,
    PreferencesService, PresenterSession, PreviewStrategyFactory,
};
use pp_core::ports::{PresentationAutomationPort, PresentationSurfacePort, PreviewStrategyPort};
use pp_core::{AppConfig, AppDirs};
use pp_infra::{
    FilePreferencesRepository, FsPresentationDiscovery, PackageThumbnailStrategy,
    PreviewCacheService,
};
use pp_platform::automation::DEFAULT_PROGRAM;
use pp_platform::{OfficeProcessAutomation, SystemDisplays};
use tracing::{info, warn};

pub const AUTOMATION_STRATEGY: &str = "automation";
pub const PACKAGE_THUMBNAIL_STRATEGY: &str = "package_thumbnail";

/// Pipeline order when the config names none.
pub const DEFAULT_STRATEGIES: [&str; 2] = [AUTOMATION_STRATEGY, PACKAGE_THUMBNAIL_STRATEGY];

pub struct WiredApp {
    pub session: Arc<PresenterSession>,
    pub preferences: Arc<PreferencesService>,
}

/// Map configured names to strategies, keeping their order.
///
/// Unknown names are skipped with a warning. An empty list means the default
/// order.
pub fn build_strategies(
    names: &[String],
    automation: Arc<dyn PresentationAutomationPort>,
) -> Vec<Arc<dyn PreviewStrategyPort>> {
    let names: Vec<&str> = if names.is_empty() {
        DEFAULT_STRATEGIES.to_vec()
    } else {
        names.iter().map(String::as_str).collect()
    };

    let mut strategies: Vec<Arc<dyn PreviewStrategyPort>> = Vec::with_capacity(names.len());
    for name in names {
        match name {
            AUTOMATION_STRATEGY => {
                strategies.push(Arc::new(AutomationExportStrategy::new(automation.clone())))
            }
            PACKAGE_THUMBNAIL_STRATEGY => {
                strategies.push(Arc::new(PackageThumbnailStrategy::new()))
            }
            unknown => warn!(strategy = unknown, "unknown preview strategy, skipping"),
        }
    }
    strategies
}

pub fn wire_dependencies(
    config: &AppConfig,
    app_dirs: &AppDirs,
    surface: Arc<dyn PresentationSurfacePort>,
) -> anyhow::Result<WiredApp> {
    let cache = PreviewCacheService::new(
        config
            .cache_dir
            .clone()
            .unwrap_or_else(|| app_dirs.previews_dir()),
    );
    if let Err(err) = cache.ensure_directory() {
        warn!(error = %format!("{err:#}"), "preview cache unavailable, previews will fail");
    }

    let program = config
        .automation_program
        .clone()
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
    let automation: Arc<dyn PresentationAutomationPort> = Arc::new(
        OfficeProcessAutomation::new(program).with_profile_root(app_dirs.office_profiles_dir()),
    );

    let factory = PreviewStrategyFactory::new(build_strategies(
        &config.preview_strategies,
        automation.clone(),
    ));
    info!(
        strategies = ?factory.names(),
        cache = %cache.root().display(),
        "preview pipeline composed"
    );

    let preferences_file = config
        .preferences_file
        .clone()
        .unwrap_or_else(|| app_dirs.preferences_file());
    let preferences = Arc::new(PreferencesService::new(Arc::new(
        FilePreferencesRepository::new(preferences_file),
    )));

    let displays = Arc::new(SystemDisplays::new());
    let launcher = Arc::new(MonitorAwareLauncher::new(
        Arc::new(AutomationLauncher::new(automation)),
        displays.clone(),
    ));

    let session = Arc::new(PresenterSession::new(AppDeps {
        discovery: Arc::new(FsPresentationDiscovery::new()),
        pipeline: factory.pipeline(cache.create_context()),
        launcher,
        displays,
        preferences: preferences.clone(),
        surface,
    }));

    Ok(WiredApp {
        session,
        preferences,
    })
}
