//! Stop error aggregation
//!
//! Stop handlers release independent resources, so one failure must not keep
//! the rest from running. Failures are collected into an [`ErrorArray`] and
//! reported as a single [`StopError`].

/// Error returned by a fallible handler
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Collector for handler failures
#[derive(Debug, Default)]
pub struct ErrorArray {
    errors: Vec<HandlerError>,
}

impl ErrorArray {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the error from `result`, if any
    pub fn check(&mut self, result: Result<(), HandlerError>) {
        if let Err(e) = result {
            self.errors.push(e);
        }
    }

    /// Number of recorded failures
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether nothing failed
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collapse into `Ok(())` when empty, or one combined error
    pub fn into_result(self) -> Result<(), StopError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(StopError {
                errors: self.errors,
            })
        }
    }
}

/// Combined failure of one or more stop handlers
///
/// Errors are kept in the order the handlers were registered.
#[derive(Debug)]
pub struct StopError {
    errors: Vec<HandlerError>,
}

impl StopError {
    /// All handler failures, in handler order
    pub fn errors(&self) -> &[HandlerError] {
        &self.errors
    }

    /// Consume into the individual failures
    pub fn into_errors(self) -> Vec<HandlerError> {
        self.errors
    }
}

impl std::fmt::Display for StopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} stop handler(s) failed: ", self.errors.len())?;
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}

impl std::error::Error for StopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_empty_array_is_ok() {
        let mut errs = ErrorArray::new();
        errs.check(Ok(()));
        errs.check(Ok(()));

        assert!(errs.is_empty());
        assert!(errs.into_result().is_ok());
    }

    #[test]
    fn test_errors_kept_in_order() {
        let mut errs = ErrorArray::new();
        errs.check(Err("sink flush failed".into()));
        errs.check(Ok(()));
        errs.check(Err("upload aborted".into()));
        assert_eq!(errs.len(), 2);

        let err = errs.into_result().unwrap_err();
        assert_eq!(err.errors().len(), 2);
        assert_eq!(err.errors()[0].to_string(), "sink flush failed");
        assert_eq!(err.errors()[1].to_string(), "upload aborted");
        assert_eq!(
            err.to_string(),
            "2 stop handler(s) failed: sink flush failed; upload aborted"
        );
    }

    #[test]
    fn test_source_is_first_failure() {
        let mut errs = ErrorArray::new();
        errs.check(Err("first".into()));
        errs.check(Err("second".into()));

        let err = errs.into_result().unwrap_err();
        assert_eq!(err.source().unwrap().to_string(), "first");
        assert_eq!(err.into_errors().len(), 2);
    }
}
