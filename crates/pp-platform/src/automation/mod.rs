mod office_process;

pub use office_process::{OfficeProcessAutomation, OfficeProcessPresentation, DEFAULT_PROGRAM};
