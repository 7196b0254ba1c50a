use crate::error::FolioError;
use std::fmt;
use std::str::FromStr;

/// Where in the view list an operation applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkbenchPosition {
    /// The active view.
    #[default]
    Active,
    /// Right after the active view.
    Beside,
    Head,
    /// Past the last view.
    Tail,
    Index(usize),
}

impl FromStr for WorkbenchPosition {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(WorkbenchPosition::Active),
            "beside" => Ok(WorkbenchPosition::Beside),
            "head" => Ok(WorkbenchPosition::Head),
            "tail" => Ok(WorkbenchPosition::Tail),
            other => other.parse::<usize>().map(WorkbenchPosition::Index).map_err(|_| {
                FolioError::Api(format!(
                    "Invalid position '{}' (expected active, beside, head, tail or a number)",
                    other
                ))
            }),
        }
    }
}

impl fmt::Display for WorkbenchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkbenchPosition::Active => f.write_str("active"),
            WorkbenchPosition::Beside => f.write_str("beside"),
            WorkbenchPosition::Head => f.write_str("head"),
            WorkbenchPosition::Tail => f.write_str("tail"),
            WorkbenchPosition::Index(i) => write!(f, "{}", i),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenOptions {
    pub at: WorkbenchPosition,
    pub replace_history: bool,
}

impl OpenOptions {
    pub fn at(at: WorkbenchPosition) -> Self {
        Self {
            at,
            ..Default::default()
        }
    }

    pub fn replacing(mut self) -> Self {
        self.replace_history = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbolic_and_numeric_positions() {
        assert_eq!("beside".parse::<WorkbenchPosition>().unwrap(), WorkbenchPosition::Beside);
        assert_eq!("tail".parse::<WorkbenchPosition>().unwrap(), WorkbenchPosition::Tail);
        assert_eq!("3".parse::<WorkbenchPosition>().unwrap(), WorkbenchPosition::Index(3));
        assert!("-1".parse::<WorkbenchPosition>().is_err());
        assert!("left".parse::<WorkbenchPosition>().is_err());
    }

    #[test]
    fn default_options_open_in_active_view() {
        let options = OpenOptions::default();
        assert_eq!(options.at, WorkbenchPosition::Active);
        assert!(!options.replace_history);
        assert!(OpenOptions::at(WorkbenchPosition::Tail).replacing().replace_history);
    }
}
