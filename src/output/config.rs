//! Output configuration types

/// Configuration for text output.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Print a marker line under directories whose listing is not complete.
    pub show_status: bool,
    /// Longest accumulated path prefix before the sentinel is used instead.
    pub max_path_len: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: false,
            show_status: true,
            max_path_len: None,
        }
    }
}
