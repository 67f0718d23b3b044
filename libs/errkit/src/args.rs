//! Loosely typed constructor arguments

use errkit_http::{BoxError, ErrorData, HttpError, StatusArg};
use serde_json::Value;

use crate::dispatch::JsonApiError;
use crate::options::InvocationOptions;

/// One positional argument of an error constructor.
///
/// Constructors are overloaded on the shape of their arguments; see
/// [`Invocation::classify`](crate::Invocation::classify) for how a list of
/// `Arg`s is resolved.
#[derive(Debug)]
pub enum Arg {
    /// Strings, numbers, booleans, null, records and arrays
    Value(Value),
    /// Typed structured options
    Options(InvocationOptions),
    /// Any foreign error
    Error(BoxError),
    /// Error from the factory, not yet augmented
    Http(HttpError),
    /// Error already carrying its JSON:API members
    Augmented(Box<JsonApiError>),
    /// Status code that has no JSON form, such as an infinite float
    Status(StatusArg),
}

impl Arg {
    /// Loose truthiness: `null`, `false`, `0` and `""` are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Value(value) => value_is_truthy(value),
            Self::Options(_)
            | Self::Error(_)
            | Self::Http(_)
            | Self::Augmented(_)
            | Self::Status(_) => true,
        }
    }

    /// `true` when the argument is a record with a truthy `err` member.
    #[must_use]
    pub fn has_err(&self) -> bool {
        match self {
            Self::Options(options) => options.err.is_some(),
            Self::Value(Value::Object(record)) => record.get("err").is_some_and(value_is_truthy),
            _ => false,
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Value(Value::Null) => "null",
            Self::Value(Value::Bool(_)) => "boolean",
            Self::Value(Value::Number(_)) | Self::Status(_) => "number",
            Self::Value(Value::String(_)) => "string",
            Self::Value(Value::Array(_)) => "array",
            Self::Value(Value::Object(_)) | Self::Options(_) => "record",
            Self::Error(_) | Self::Http(_) | Self::Augmented(_) => "error",
        }
    }

    /// Interpret as an optional message.
    pub(crate) fn into_message(self) -> Result<Option<String>, Self> {
        match self {
            Self::Value(Value::Null) => Ok(None),
            Self::Value(Value::String(text)) => Ok(Some(text).filter(|t| !t.is_empty())),
            Self::Value(value @ (Value::Number(_) | Value::Bool(_))) => {
                Ok(value_is_truthy(&value).then(|| value.to_string()))
            }
            other => Err(other),
        }
    }

    /// Interpret as an optional status code.
    pub(crate) fn into_status(self) -> Result<Option<StatusArg>, Self> {
        match self {
            Self::Value(Value::Null) => Ok(None),
            Self::Value(Value::String(text)) => Ok(Some(StatusArg::Text(text))),
            Self::Value(Value::Number(number)) => Ok(Some(
                number
                    .as_i64()
                    .map_or_else(
                        || StatusArg::Number(number.as_f64().unwrap_or(f64::NAN)),
                        StatusArg::Code,
                    ),
            )),
            Self::Status(status) => Ok(Some(status)),
            other => Err(other),
        }
    }

    /// Interpret as data or cause for a family constructor.
    pub(crate) fn into_data(self) -> Result<Option<ErrorData>, Self> {
        match self {
            Self::Value(Value::Null) => Ok(None),
            Self::Value(value) => Ok(Some(ErrorData::Value(value))),
            Self::Error(cause) => Ok(Some(ErrorData::Cause(cause))),
            Self::Http(err) => Ok(Some(ErrorData::Cause(Box::new(err)))),
            Self::Augmented(err) => Ok(Some(ErrorData::Cause(err))),
            other @ (Self::Options(_) | Self::Status(_)) => Err(other),
        }
    }
}

fn value_is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Self::Value(Value::String(text.to_owned()))
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Self::Value(Value::String(text))
    }
}

macro_rules! integer_args {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Arg {
                fn from(number: $ty) -> Self {
                    Self::Value(Value::from(number))
                }
            }
        )+
    };
}

integer_args!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl From<f64> for Arg {
    fn from(number: f64) -> Self {
        if number.is_finite() {
            Self::Value(Value::from(number))
        } else {
            Self::Status(StatusArg::Number(number))
        }
    }
}

impl From<Vec<&str>> for Arg {
    fn from(items: Vec<&str>) -> Self {
        Self::Value(Value::Array(items.into_iter().map(Value::from).collect()))
    }
}

impl From<StatusArg> for Arg {
    fn from(status: StatusArg) -> Self {
        Self::Status(status)
    }
}

impl From<InvocationOptions> for Arg {
    fn from(options: InvocationOptions) -> Self {
        Self::Options(options)
    }
}

impl From<BoxError> for Arg {
    fn from(error: BoxError) -> Self {
        Self::Error(error)
    }
}

impl From<HttpError> for Arg {
    fn from(error: HttpError) -> Self {
        Self::Http(error)
    }
}

impl From<JsonApiError> for Arg {
    fn from(error: JsonApiError) -> Self {
        Self::Augmented(Box::new(error))
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Value(Value::Null), Into::into)
    }
}

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// ```
/// use errkit::{args, Arg};
/// let list: Vec<Arg> = args!["my message", serde_json::json!({ "type": "user" })];
/// assert_eq!(list.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Arg>::new() };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}
