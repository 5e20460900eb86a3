use std::fmt::{self, Display};

/// Per-slide image load status.
///
/// Legal moves: `Unloaded -> Loading`, `Loading -> Loaded | Error`,
/// `Error -> Loading` (a fresh request), and `Loading -> Unloaded` when an
/// in-flight load is cancelled during teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LoadStatus {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Error,
}

/// Rejected status change, e.g. `Loaded -> Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransitionError {
    pub from: LoadStatus,
    pub to: LoadStatus,
}

impl Display for StatusTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal load status change {} -> {}", self.from, self.to)
    }
}

impl std::error::Error for StatusTransitionError {}

impl LoadStatus {
    pub fn is_loaded(self) -> bool {
        matches!(self, LoadStatus::Loaded)
    }

    pub fn is_error(self) -> bool {
        matches!(self, LoadStatus::Error)
    }

    pub fn is_loading(self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    /// Whether a move from `self` to `next` is allowed.
    pub fn can_become(self, next: LoadStatus) -> bool {
        use LoadStatus::*;
        matches!(
            (self, next),
            (Unloaded, Loading)
                | (Error, Loading)
                | (Loading, Loaded)
                | (Loading, Error)
                | (Loading, Unloaded)
        )
    }

    /// Checked transition; returns the new status on success.
    pub fn advance(
        self,
        next: LoadStatus,
    ) -> Result<LoadStatus, StatusTransitionError> {
        if self.can_become(next) {
            Ok(next)
        } else {
            Err(StatusTransitionError {
                from: self,
                to: next,
            })
        }
    }
}

impl Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadStatus::Unloaded => "unloaded",
            LoadStatus::Loading => "loading",
            LoadStatus::Loaded => "loaded",
            LoadStatus::Error => "error",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_can_be_retried() {
        assert_eq!(
            LoadStatus::Error.advance(LoadStatus::Loading),
            Ok(LoadStatus::Loading)
        );
    }

    #[test]
    fn loaded_is_not_reloaded() {
        let err = LoadStatus::Loaded
            .advance(LoadStatus::Loading)
            .expect_err("loaded slides do not restart loading");
        assert_eq!(err.from, LoadStatus::Loaded);
        assert_eq!(
            err.to_string(),
            "illegal load status change loaded -> loading"
        );
    }

    #[test]
    fn unloaded_cannot_jump_to_loaded() {
        assert!(!LoadStatus::Unloaded.can_become(LoadStatus::Loaded));
        assert!(!LoadStatus::Unloaded.can_become(LoadStatus::Error));
    }
}
