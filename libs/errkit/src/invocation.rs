//! Resolution of a raw argument list into one calling convention

use errkit_http::{BoxError, Challenge, ErrorData, StatusArg};
use serde_json::Value;

use crate::args::Arg;
use crate::error::ArgumentError;
use crate::kind::{Convention, ErrorKind};
use crate::options::InvocationOptions;

/// Error handed to `wrap`.
#[derive(Debug)]
pub enum WrapTarget {
    /// Already augmented; returned as is
    Augmented(Box<crate::JsonApiError>),
    /// Any other error, including factory errors
    Error(BoxError),
}

/// Calls of the generic constructors.
#[derive(Debug)]
pub enum GenericCall {
    Wrap {
        target: WrapTarget,
        status: Option<StatusArg>,
        message: Option<String>,
    },
    Create {
        status: StatusArg,
        message: Option<String>,
        data: Option<ErrorData>,
    },
}

/// A constructor call with its convention decided.
#[derive(Debug)]
pub enum Invocation {
    /// `wrap` / `create`
    Generic(GenericCall),
    /// `unauthorized` with a falsy message or a challenge argument
    Challenge {
        message: Option<String>,
        challenge: Option<Challenge>,
    },
    /// A record carrying `err`
    Options(InvocationOptions),
    /// `(message?, data?)`
    Positional {
        message: Option<String>,
        data: Option<ErrorData>,
    },
}

impl Invocation {
    /// Decide the calling convention of `args` for `kind`.
    ///
    /// Checked in order: the generic form of `wrap`/`create`; the challenge
    /// form of `unauthorized` (first argument falsy or second truthy); an
    /// options record with a truthy `err`; positional `(message?, data?)`.
    ///
    /// # Errors
    /// Returns `ArgumentError` when the arguments fit the chosen form badly,
    /// e.g. a record as the message or too many arguments.
    pub fn classify(kind: ErrorKind, args: Vec<Arg>) -> Result<Self, ArgumentError> {
        let convention = kind.convention();
        match convention {
            Convention::Wrap => return classify_wrap(kind, args),
            Convention::Create => return classify_create(kind, args),
            Convention::Challenge(_) => {
                let first_falsy = args.first().is_none_or(|arg| !arg.is_truthy());
                let second_truthy = args.get(1).is_some_and(Arg::is_truthy);
                if first_falsy || second_truthy {
                    return classify_challenge(kind, args);
                }
            }
            Convention::Standard(_) => {}
        }

        if args.first().is_some_and(Arg::has_err) {
            return classify_options(kind, args);
        }
        classify_positional(kind, args)
    }
}

struct Cursor {
    kind: ErrorKind,
    args: std::vec::IntoIter<Arg>,
}

impl Cursor {
    fn new(kind: ErrorKind, args: Vec<Arg>, max: usize) -> Result<Self, ArgumentError> {
        if args.len() > max {
            return Err(ArgumentError::TooManyArguments {
                kind,
                max,
                got: args.len(),
            });
        }
        Ok(Self {
            kind,
            args: args.into_iter(),
        })
    }

    fn pop(&mut self) -> Option<Arg> {
        self.args.next()
    }

    fn unexpected(&self, name: &'static str, expected: &'static str, arg: &Arg) -> ArgumentError {
        ArgumentError::Unexpected {
            kind: self.kind,
            name,
            expected,
            got: arg.kind_name(),
        }
    }

    fn message(&mut self) -> Result<Option<String>, ArgumentError> {
        match self.pop() {
            None => Ok(None),
            Some(arg) => arg
                .into_message()
                .map_err(|arg| self.unexpected("message", "a string", &arg)),
        }
    }

    fn status(&mut self) -> Result<Option<StatusArg>, ArgumentError> {
        match self.pop() {
            None => Ok(None),
            Some(arg) => arg
                .into_status()
                .map_err(|arg| self.unexpected("statusCode", "a number or numeric string", &arg)),
        }
    }

    fn data(&mut self) -> Result<Option<ErrorData>, ArgumentError> {
        match self.pop() {
            None => Ok(None),
            Some(arg) => arg
                .into_data()
                .map_err(|arg| self.unexpected("data", "a value or an error", &arg)),
        }
    }
}

fn classify_wrap(kind: ErrorKind, args: Vec<Arg>) -> Result<Invocation, ArgumentError> {
    let mut cursor = Cursor::new(kind, args, 3)?;
    let target = match cursor.pop() {
        None => return Err(ArgumentError::Missing { kind, name: "error" }),
        Some(Arg::Augmented(err)) => WrapTarget::Augmented(err),
        Some(Arg::Http(err)) => WrapTarget::Error(Box::new(err)),
        Some(Arg::Error(err)) => WrapTarget::Error(err),
        Some(other) => return Err(cursor.unexpected("error", "an error", &other)),
    };
    let status = cursor.status()?;
    let message = cursor.message()?;
    Ok(Invocation::Generic(GenericCall::Wrap {
        target,
        status,
        message,
    }))
}

fn classify_create(kind: ErrorKind, args: Vec<Arg>) -> Result<Invocation, ArgumentError> {
    let mut cursor = Cursor::new(kind, args, 3)?;
    let status = cursor.status()?.ok_or(ArgumentError::Missing {
        kind,
        name: "statusCode",
    })?;
    let message = cursor.message()?;
    let data = cursor.data()?;
    Ok(Invocation::Generic(GenericCall::Create {
        status,
        message,
        data,
    }))
}

enum SchemeArg {
    One(String),
    Many(Vec<String>),
}

fn classify_challenge(kind: ErrorKind, args: Vec<Arg>) -> Result<Invocation, ArgumentError> {
    let mut cursor = Cursor::new(kind, args, 3)?;
    let message = match cursor.pop() {
        None => None,
        Some(arg) if !arg.is_truthy() => None,
        Some(arg) => arg
            .into_message()
            .map_err(|arg| cursor.unexpected("message", "a string", &arg))?,
    };

    let scheme = match cursor.pop() {
        None | Some(Arg::Value(Value::Null)) => None,
        Some(Arg::Value(Value::String(scheme))) => Some(SchemeArg::One(scheme)),
        Some(Arg::Value(Value::Array(items))) => {
            let schemes = items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(other),
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| ArgumentError::Unexpected {
                    kind,
                    name: "scheme",
                    expected: "a list of strings",
                    got: "array",
                })?;
            Some(SchemeArg::Many(schemes))
        }
        Some(other) => {
            return Err(cursor.unexpected("scheme", "a string or a list of strings", &other));
        }
    };

    let attributes = match cursor.pop() {
        None | Some(Arg::Value(Value::Null)) => None,
        Some(Arg::Value(Value::Object(attributes))) => Some(attributes),
        Some(other) => return Err(cursor.unexpected("attributes", "a record", &other)),
    };

    let challenge = match scheme {
        None => None,
        Some(SchemeArg::One(scheme)) => Some(Challenge::Scheme { scheme, attributes }),
        Some(SchemeArg::Many(schemes)) => Some(Challenge::Schemes(schemes)),
    };

    Ok(Invocation::Challenge { message, challenge })
}

fn classify_options(kind: ErrorKind, args: Vec<Arg>) -> Result<Invocation, ArgumentError> {
    let mut cursor = Cursor::new(kind, args, 1)?;
    match cursor.pop() {
        Some(Arg::Options(options)) => Ok(Invocation::Options(options)),
        Some(Arg::Value(record @ Value::Object(_))) => serde_json::from_value(record)
            .map(Invocation::Options)
            .map_err(|e| ArgumentError::MalformedOptions {
                kind,
                reason: e.to_string(),
            }),
        Some(other) => Err(cursor.unexpected("options", "a record", &other)),
        None => Err(ArgumentError::Missing {
            kind,
            name: "options",
        }),
    }
}

fn classify_positional(kind: ErrorKind, args: Vec<Arg>) -> Result<Invocation, ArgumentError> {
    let mut cursor = Cursor::new(kind, args, 2)?;
    let message = cursor.message()?;
    let data = cursor.data()?;
    Ok(Invocation::Positional { message, data })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::args;
    use serde_json::json;

    #[test]
    fn unauthorized_with_null_message_is_a_challenge() {
        let inv = Invocation::classify(ErrorKind::Unauthorized, args![Value::Null]).unwrap();
        assert!(matches!(
            inv,
            Invocation::Challenge {
                message: None,
                challenge: None
            }
        ));
    }

    #[test]
    fn unauthorized_with_only_message_is_positional() {
        let inv = Invocation::classify(ErrorKind::Unauthorized, args!["my message"]).unwrap();
        assert!(matches!(inv, Invocation::Positional { message: Some(m), data: None } if m == "my message"));
    }

    #[test]
    fn unauthorized_scheme_and_attributes() {
        let inv = Invocation::classify(
            ErrorKind::Unauthorized,
            args![Value::Null, "Test", json!({ "a": 1 })],
        )
        .unwrap();
        let Invocation::Challenge {
            message: None,
            challenge: Some(Challenge::Scheme { scheme, attributes }),
        } = inv
        else {
            panic!("expected a single scheme challenge");
        };
        assert_eq!(scheme, "Test");
        assert_eq!(attributes.unwrap()["a"], 1);
    }

    #[test]
    fn unauthorized_scheme_list() {
        let inv = Invocation::classify(
            ErrorKind::Unauthorized,
            args![Value::Null, vec!["Test", "one", "two"]],
        )
        .unwrap();
        assert!(matches!(
            inv,
            Invocation::Challenge { challenge: Some(Challenge::Schemes(ref s)), .. } if s.len() == 3
        ));
    }

    #[test]
    fn unauthorized_options_record_wins_over_positional() {
        let inv = Invocation::classify(
            ErrorKind::Unauthorized,
            args![json!({ "id": "abc-123", "err": { "message": "Oops!" } })],
        )
        .unwrap();
        assert!(matches!(inv, Invocation::Options(ref o) if o.id.as_deref() == Some("abc-123")));
    }

    #[test]
    fn record_without_err_is_rejected_as_message() {
        let err = Invocation::classify(ErrorKind::BadRequest, args![json!({ "id": "x" })]).unwrap_err();
        assert!(matches!(err, ArgumentError::Unexpected { name: "message", got: "record", .. }));
    }

    #[test]
    fn malformed_options_fail_fast() {
        let err = Invocation::classify(
            ErrorKind::Conflict,
            args![json!({ "err": "boom", "source": 5 })],
        )
        .unwrap_err();
        assert!(matches!(err, ArgumentError::MalformedOptions { .. }));
    }

    #[test]
    fn wrap_requires_an_error() {
        let err = Invocation::classify(ErrorKind::Wrap, args!["not an error"]).unwrap_err();
        assert!(matches!(err, ArgumentError::Unexpected { name: "error", .. }));
        let err = Invocation::classify(ErrorKind::Wrap, args![]).unwrap_err();
        assert!(matches!(err, ArgumentError::Missing { name: "error", .. }));
    }

    #[test]
    fn create_takes_status_message_and_data() {
        let inv = Invocation::classify(
            ErrorKind::Create,
            args![418, "short and stout", json!({ "handle": true })],
        )
        .unwrap();
        assert!(matches!(
            inv,
            Invocation::Generic(GenericCall::Create {
                status: StatusArg::Code(418),
                message: Some(_),
                data: Some(ErrorData::Value(_)),
            })
        ));
    }

    #[test]
    fn positional_rejects_extra_arguments() {
        let err = Invocation::classify(ErrorKind::NotFound, args!["a", "b", "c"]).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::TooManyArguments {
                kind: ErrorKind::NotFound,
                max: 2,
                got: 3
            }
        );
    }
}
