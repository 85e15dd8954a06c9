use std::fmt;

/// Editor input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual,
    /// Choosing the provider queries are sent to
    ApiSelect,
    /// Waiting for the user to confirm quitting
    QuitConfirm,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "NORMAL"),
            Mode::Insert => write!(f, "INSERT"),
            Mode::Visual => write!(f, "VISUAL"),
            Mode::ApiSelect => write!(f, "API"),
            Mode::QuitConfirm => write!(f, "QUIT"),
        }
    }
}
