//! # Application Dependencies / 应用依赖
//!
//! Dependency grouping for [`PresenterSession`](crate::PresenterSession)
//! construction.
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包

use std::sync::Arc;

use pp_core::ports::{
    DisplayPort, PresentationDiscoveryPort, PresentationLauncherPort, PresentationSurfacePort,
};

use crate::pipeline::PreviewPipeline;
use crate::preferences::PreferencesService;

/// All dependencies are required - no defaults, no optional fields.
/// 所有依赖都是必需的 - 无默认值，无可选字段。
pub struct AppDeps {
    // Discovery and previews / 发现与预览
    pub discovery: Arc<dyn PresentationDiscoveryPort>,
    pub pipeline: PreviewPipeline,

    // Launch / 启动
    pub launcher: Arc<dyn PresentationLauncherPort>,
    pub displays: Arc<dyn DisplayPort>,

    // Preferences / 偏好设置
    pub preferences: Arc<PreferencesService>,

    // Presentation surface / 展示界面
    pub surface: Arc<dyn PresentationSurfacePort>,
}
