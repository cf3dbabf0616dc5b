use std::{collections::BTreeMap, fmt, sync::Arc};

#[derive(Debug, Clone)]
pub struct AppError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<AppCause>,
}

#[derive(Debug, Clone)]
pub enum AppCause {
    App(Box<AppError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_app(mut self, cause: AppError) -> Self {
        self.causes.push(AppCause::App(Box::new(cause)));
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(AppCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            AppCause::App(e) => Some(e.as_ref() as &dyn std::error::Error),
            AppCause::Std(e) => Some(e.as_ref()),
        })
    }
}

impl From<glutin::error::Error> for AppError {
    fn from(err: glutin::error::Error) -> Self {
        AppError::new("glutin::error::Error").push_std(err)
    }
}

impl From<raw_window_handle::HandleError> for AppError {
    fn from(err: raw_window_handle::HandleError) -> Self {
        AppError::new("raw_window_handle::HandleError").push_std(err)
    }
}

impl From<winit::error::EventLoopError> for AppError {
    fn from(err: winit::error::EventLoopError) -> Self {
        AppError::new("winit::error::EventLoopError").push_std(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_lists_args_in_key_order() {
        let err = AppError::new("gl-init")
            .with_arg("width", 800)
            .with_arg("height", 600);
        assert_eq!(err.to_string(), "gl-init(height=600, width=800)");
    }

    #[test]
    fn display_without_args() {
        assert_eq!(AppError::new("no-window").to_string(), "no-window()");
    }

    #[test]
    fn source_follows_first_cause() {
        let inner = AppError::new("inner");
        let outer = AppError::new("outer").push_app(inner);
        let source = outer.source().expect("cause should be exposed");
        assert_eq!(source.to_string(), "inner()");
    }

    #[test]
    fn handle_error_is_kept_as_cause() {
        let err: AppError = raw_window_handle::HandleError::Unavailable.into();
        assert_eq!(err.key, "raw_window_handle::HandleError");
        assert!(err.source().is_some());
        assert!(err.args.is_empty());
    }
}
