//! [`Error`]-related definitions.

use std::{fmt, num::TryFromIntError};

use axum_extra::typed_header::TypedHeaderRejection;
use derive_more::Error as StdError;
use itertools::Itertools as _;
use juniper::IntoFieldError;
use service::infra::{database, postgres};
use tracerr::{Trace, Traced};
use tracing as log;

/// Defines a new error type convertible into an [`Error`].
///
/// Every variant declares its `#[code]`, the `#[status]` of the HTTP
/// response and the `#[message]` shown to clients.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            Eq,
            ::derive_more::Error,
            PartialEq,
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_owned(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// GraphQL API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// [`Code`] of an [`Error::internal()`].
    pub const INTERNAL: Code = "INTERNAL_SERVER_ERROR";

    /// Creates a new [`Error`] representing an internal server error.
    ///
    /// The provided `cause` is logged rather than shown to clients, as it
    /// may expose database details.
    #[must_use]
    pub fn internal(cause: &impl fmt::Display) -> Self {
        log::error!("internal server error: {cause}");
        Self {
            code: Self::INTERNAL,
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_owned(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String>,
{
    fn into_field_error(self) -> juniper::FieldError<S> {
        let mut ext = juniper::Object::with_capacity(2);
        drop(
            ext.add_field("code", juniper::Value::scalar(self.code.to_owned())),
        );
        if let Some(trace) = &self.backtrace {
            drop(ext.add_field(
                "backtrace",
                juniper::Value::list(
                    trace
                        .iter()
                        .map(|frame| juniper::Value::scalar(frame.to_string()))
                        .collect(),
                ),
            ));
        }
        juniper::FieldError::new(self.message, juniper::Value::object(ext))
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into a client-facing [`Error`].
    ///
    /// [`None`] is returned if the type is an internal failure.
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`], falling back to an
    /// [`Error::internal()`] one.
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error().unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }

    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error().unwrap_or_else(|| {
            Error::internal(&format_args!("{self}\n{}", self.trace()))
        })
    }
}

impl AsError for TypedHeaderRejection {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "BAD_REQUEST",
            status_code: http::StatusCode::BAD_REQUEST,
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        use postgres::connection::PoolError;

        define_error! {
            enum Error {
                #[code = "DATABASE_UNAVAILABLE"]
                #[status = SERVICE_UNAVAILABLE]
                #[message = "Database is temporarily unavailable"]
                Unavailable,
            }
        }

        match self {
            Self::Postgres(postgres::Error::PoolError(e))
                if matches!(e, PoolError::Timeout(_) | PoolError::Closed) =>
            {
                log::warn!("`Postgres` pool is exhausted: {e}");
                Some(Error::Unavailable.into())
            }
            Self::Postgres(_) => None,
        }
    }
}

impl AsError for TryFromIntError {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, IntoFieldError};

    use super::{AsError, Error};

    crate::define_error! {
        enum TestError {
            #[code = "PLOT_GONE"]
            #[status = GONE]
            #[message = "`Plot` is gone"]
            Gone,
        }
    }

    impl AsError for TestError {
        fn try_as_error(&self) -> Option<Error> {
            Some((*self).into())
        }
    }

    #[derive(Debug, derive_more::Display)]
    #[display("broken pipe")]
    struct Internal;

    impl AsError for Internal {
        fn try_as_error(&self) -> Option<Error> {
            None
        }
    }

    #[test]
    fn converts_defined_errors() {
        let err = Error::from(TestError::Gone);

        assert_eq!(err.code, "PLOT_GONE");
        assert_eq!(err.status_code, http::StatusCode::GONE);
        assert_eq!(err.message, "`Plot` is gone");
        assert_eq!(err.to_string(), "[PLOT_GONE]: `Plot` is gone");
    }

    #[test]
    fn hides_internal_causes() {
        let err = tracerr::new!(Internal).into_error();

        assert_eq!(err.code, Error::INTERNAL);
        assert_eq!(
            err.status_code,
            http::StatusCode::INTERNAL_SERVER_ERROR,
        );
        assert!(!err.message.contains("broken pipe"));
        assert!(err.backtrace.is_none());
    }

    #[test]
    fn attaches_backtrace_of_traced_errors() {
        let err = tracerr::new!(TestError::Gone).into_error();

        assert_eq!(err.code, "PLOT_GONE");
        assert!(err.backtrace.is_some());
    }

    #[test]
    fn puts_code_into_extensions() {
        let field = IntoFieldError::<DefaultScalarValue>::into_field_error(
            Error::from(TestError::Gone),
        );
        let ext = field.extensions().as_object_value().unwrap();

        assert_eq!(
            ext.get_field_value("code").and_then(|v| v.as_string_value()),
            Some("PLOT_GONE"),
        );
        assert!(ext.get_field_value("backtrace").is_none());
    }
}
