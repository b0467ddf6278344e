//! Lifecycle State Machine
//!
//! The three-phase life of a controller: Raw until first initialization,
//! Initializing while waiting on the runtime, Ready for the rest of its
//! lifetime. Transitions are monotonic; nothing ever returns to Raw.

/// Controller status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// No widget requested yet
    #[default]
    Raw,
    /// Widget construction requested, readiness signal pending
    Initializing,
    /// Widget present; terminal
    Ready,
}

/// Invalid transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("already initialized")]
    AlreadyInitialized,

    #[error("ready signal outside initialization")]
    NotInitializing,
}

impl Status {
    /// Enter Initializing; only legal from Raw
    pub fn begin_init(&mut self) -> Result<(), LifecycleError> {
        match self {
            Self::Raw => {
                *self = Self::Initializing;
                Ok(())
            }
            _ => Err(LifecycleError::AlreadyInitialized),
        }
    }

    /// Enter Ready; only legal from Initializing
    pub fn finish_init(&mut self) -> Result<(), LifecycleError> {
        match self {
            Self::Initializing => {
                *self = Self::Ready;
                Ok(())
            }
            _ => Err(LifecycleError::NotInitializing),
        }
    }

    pub fn is_raw(&self) -> bool {
        *self == Self::Raw
    }

    pub fn is_ready(&self) -> bool {
        *self == Self::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut status = Status::default();
        assert!(status.is_raw());
        status.begin_init().unwrap();
        assert_eq!(status, Status::Initializing);
        status.finish_init().unwrap();
        assert!(status.is_ready());
    }

    #[test]
    fn test_no_reinitialization() {
        let mut status = Status::Raw;
        status.begin_init().unwrap();
        assert_eq!(status.begin_init(), Err(LifecycleError::AlreadyInitialized));

        status.finish_init().unwrap();
        assert_eq!(status.begin_init(), Err(LifecycleError::AlreadyInitialized));
        // The failed attempts left the state alone.
        assert!(status.is_ready());
    }

    #[test]
    fn test_ready_requires_initializing() {
        let mut status = Status::Raw;
        assert_eq!(status.finish_init(), Err(LifecycleError::NotInitializing));
        assert!(status.is_raw());
    }
}
