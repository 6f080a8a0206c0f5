pub mod sysinfo_inspector;

pub use sysinfo_inspector::SysinfoProcessInspector;
