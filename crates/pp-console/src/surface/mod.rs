mod console;

pub use console::ConsoleSurface;
