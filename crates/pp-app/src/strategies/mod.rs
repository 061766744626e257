mod automation_export;

pub use automation_export::{AutomationExportStrategy, EXPORT_HEIGHT, EXPORT_WIDTH};
