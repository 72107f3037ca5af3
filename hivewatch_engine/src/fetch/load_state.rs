//! Tagged state of one independently loaded resource

use super::source::FetchError;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Error(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    /// Terminal state for a fetch result; `None` when the fetch was cancelled
    /// and the previous state should stand
    pub fn from_fetch(result: Result<T, FetchError>) -> Option<Self> {
        match result {
            Ok(value) => Some(LoadState::Ready(value)),
            Err(FetchError::Cancelled { .. }) => None,
            Err(e) => Some(LoadState::Error(e.to_string())),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> LoadState<&T> {
        match self {
            LoadState::Loading => LoadState::Loading,
            LoadState::Ready(value) => LoadState::Ready(value),
            LoadState::Error(message) => LoadState::Error(message.clone()),
        }
    }

    pub fn map<U, F>(self, f: F) -> LoadState<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            LoadState::Loading => LoadState::Loading,
            LoadState::Ready(value) => LoadState::Ready(f(value)),
            LoadState::Error(message) => LoadState::Error(message),
        }
    }

    /// Ready only when both are ready. The first error wins over loading.
    pub fn zip<U>(self, other: LoadState<U>) -> LoadState<(T, U)> {
        match (self, other) {
            (LoadState::Ready(a), LoadState::Ready(b)) => LoadState::Ready((a, b)),
            (LoadState::Error(message), _) | (_, LoadState::Error(message)) => {
                LoadState::Error(message)
            }
            _ => LoadState::Loading,
        }
    }

    /// Display text; errors render as `Error: <message>`
    pub fn render<F>(&self, ready: F) -> String
    where
        F: FnOnce(&T) -> String,
    {
        match self {
            LoadState::Loading => "Loading…".to_string(),
            LoadState::Ready(value) => ready(value),
            LoadState::Error(message) => format!("Error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ResourceKind;
    use assert_matches::assert_matches;

    #[test]
    fn test_render() {
        let loading: LoadState<u32> = LoadState::Loading;
        let ready = LoadState::Ready(3u32);
        let failed: LoadState<u32> = LoadState::Error("503 Service Unavailable".into());

        assert_eq!(loading.render(|n| n.to_string()), "Loading…");
        assert_eq!(ready.render(|n| format!("{} servers", n)), "3 servers");
        assert_eq!(failed.render(|n| n.to_string()), "Error: 503 Service Unavailable");
    }

    #[test]
    fn test_zip_precedence() {
        let ready = LoadState::Ready(1);
        let loading: LoadState<i32> = LoadState::Loading;
        let failed: LoadState<i32> = LoadState::Error("boom".into());

        assert_eq!(ready.clone().zip(ready.clone()), LoadState::Ready((1, 1)));
        assert!(ready.clone().zip(loading.clone()).is_loading());
        assert_eq!(loading.zip(failed.clone()).error(), Some("boom"));
        assert_eq!(failed.zip(ready).error(), Some("boom"));
    }

    #[test]
    fn test_from_fetch() {
        assert_matches!(LoadState::from_fetch(Ok(5)), Some(LoadState::Ready(5)));
        assert_matches!(
            LoadState::<i32>::from_fetch(Err(FetchError::Cancelled {
                resource: ResourceKind::Templates
            })),
            None
        );

        let failed = LoadState::<i32>::from_fetch(Err(FetchError::Failed {
            resource: ResourceKind::Servers,
            message: "timeout".into(),
        }));
        assert_matches!(failed, Some(LoadState::Error(ref m)) if m.contains("timeout"));
    }
}
