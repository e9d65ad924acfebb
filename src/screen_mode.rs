// Screen mode management for Inclusivo

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScreenMode {
    #[default]
    Main, // Whatever the controller state calls for
    Debug, // Full screen debug output
}

impl ScreenMode {
    pub fn toggle(self) -> Self {
        match self {
            ScreenMode::Main => ScreenMode::Debug,
            ScreenMode::Debug => ScreenMode::Main,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScreenMode::Main => "PRINCIPAL",
            ScreenMode::Debug => "DEBUG",
        }
    }
}
