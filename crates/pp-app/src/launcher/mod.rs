mod automation;
mod monitor_aware;

pub use automation::AutomationLauncher;
pub use monitor_aware::MonitorAwareLauncher;
