mod fs_discovery;

pub use fs_discovery::FsPresentationDiscovery;
