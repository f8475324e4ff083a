//! List screen state: load status, records and the search box.

use crate::error::ConsoleError;

/// Records that can be matched by the screen's search box.
pub trait Searchable {
    /// Whether any searchable field contains `needle`.
    ///
    /// `needle` is already lower-cased and non-empty.
    fn matches(&self, needle: &str) -> bool;
}

/// Load status of a list screen.
#[derive(Debug, Clone, Default)]
pub enum ViewState<T> {
    #[default]
    Loading,
    Failed(String),
    Ready(Vec<T>),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn records(&self) -> &[T] {
        match self {
            Self::Ready(records) => records,
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// State of one list screen.
///
/// Results that arrive after [`ListView::unmount`] are dropped.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    state: ViewState<T>,
    search: String,
    mounted: bool,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            state: ViewState::Loading,
            search: String::new(),
            mounted: true,
        }
    }
}

impl<T> ListView<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState<T> {
        &self.state
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        self.state.records()
    }

    /// Mark a fetch as in flight. Existing records stay until it lands.
    pub fn begin_load(&mut self) {
        if self.mounted && !matches!(self.state, ViewState::Ready(_)) {
            self.state = ViewState::Loading;
        }
    }

    /// Apply a fetch result and hand back its error, if any.
    ///
    /// Once unmounted the result is dropped, errors included.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged.
    pub fn apply(&mut self, result: Result<Vec<T>, ConsoleError>) -> Result<(), ConsoleError> {
        if !self.mounted {
            tracing::debug!("Dropping result for unmounted view");
            return Ok(());
        }
        match result {
            Ok(records) => {
                self.state = ViewState::Ready(records);
                Ok(())
            }
            Err(e) => {
                self.state = ViewState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Mutate the loaded records in place. No-op unless ready and mounted.
    pub fn update(&mut self, f: impl FnOnce(&mut Vec<T>)) {
        if let (true, ViewState::Ready(records)) = (self.mounted, &mut self.state) {
            f(records);
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }
}

impl<T: Searchable> ListView<T> {
    /// Records matching the search box, case-insensitively.
    pub fn filtered(&self) -> impl Iterator<Item = &T> {
        let needle = self.search.trim().to_lowercase();
        self.records()
            .iter()
            .filter(move |r| needle.is_empty() || r.matches(&needle))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str);

    impl Searchable for Row {
        fn matches(&self, needle: &str) -> bool {
            self.0.to_lowercase().contains(needle)
        }
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut view = ListView::new();
        view.apply(Ok(vec![Row("Asha Rao"), Row("John Doe")])).unwrap();
        view.set_search("  ASHA ");
        let hits: Vec<_> = view.filtered().collect();
        assert_eq!(hits, vec![&Row("Asha Rao")]);
        view.set_search("");
        assert_eq!(view.filtered().count(), 2);
    }

    #[test]
    fn test_failure_sets_message() {
        let mut view: ListView<Row> = ListView::new();
        assert!(view.apply(Err(ConsoleError::Network("connection refused".to_string()))).is_err());
        assert_eq!(view.state().error(), Some("Network error: connection refused"));
        assert!(view.records().is_empty());
    }

    #[test]
    fn test_unmounted_view_ignores_late_results() {
        let mut view = ListView::new();
        view.apply(Ok(vec![Row("a")])).unwrap();
        view.unmount();
        view.apply(Ok(vec![Row("b"), Row("c")])).unwrap();
        assert_eq!(view.records(), &[Row("a")]);
    }

    #[test]
    fn test_reload_keeps_records_visible() {
        let mut view = ListView::new();
        view.apply(Ok(vec![Row("a")])).unwrap();
        view.begin_load();
        assert!(!view.state().is_loading());
        assert_eq!(view.records().len(), 1);
    }
}
