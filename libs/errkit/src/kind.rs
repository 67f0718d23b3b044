//! Static table of error constructors

use std::fmt;
use std::str::FromStr;

use errkit_http::{ErrorData, HttpError};

/// Family constructor signature shared by the factory.
pub type FamilyFn = fn(Option<String>, Option<ErrorData>) -> HttpError;

/// How a constructor interprets its arguments.
#[derive(Clone, Copy)]
pub enum Convention {
    /// `(error, statusCode?, message?)`
    Wrap,
    /// `(statusCode, message?, data?)`
    Create,
    /// Challenge form `(message?, scheme?, attributes?)`, else like `Standard`
    Challenge(FamilyFn),
    /// Options record with `err`, else `(message?, data?)`
    Standard(FamilyFn),
}

impl fmt::Debug for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wrap => "Wrap",
            Self::Create => "Create",
            Self::Challenge(_) => "Challenge",
            Self::Standard(_) => "Standard",
        })
    }
}

/// One row of [`KIND_TABLE`].
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: ErrorKind,
    /// Stable camelCase name
    pub name: &'static str,
    /// Fixed status code; `None` for `wrap` and `create`
    pub status: Option<u16>,
    pub convention: Convention,
}

/// Invokes `$m!` with the `method => Variant` list of every constructor.
macro_rules! with_error_kinds {
    ($m:ident) => {
        $m! {
            /// An already augmented error is returned unchanged: no member is
            /// derived again, so a custom `code` or `title` survives a re-wrap.
            wrap => Wrap,
            create => Create,
            bad_request => BadRequest,
            unauthorized => Unauthorized,
            payment_required => PaymentRequired,
            forbidden => Forbidden,
            not_found => NotFound,
            method_not_allowed => MethodNotAllowed,
            not_acceptable => NotAcceptable,
            proxy_auth_required => ProxyAuthRequired,
            client_timeout => ClientTimeout,
            conflict => Conflict,
            resource_gone => ResourceGone,
            length_required => LengthRequired,
            precondition_failed => PreconditionFailed,
            entity_too_large => EntityTooLarge,
            uri_too_long => UriTooLong,
            unsupported_media_type => UnsupportedMediaType,
            range_not_satisfiable => RangeNotSatisfiable,
            expectation_failed => ExpectationFailed,
            teapot => Teapot,
            bad_data => BadData,
            locked => Locked,
            precondition_required => PreconditionRequired,
            too_many_requests => TooManyRequests,
            illegal => Illegal,
            internal => Internal,
            not_implemented => NotImplemented,
            bad_gateway => BadGateway,
            server_unavailable => ServerUnavailable,
            gateway_timeout => GatewayTimeout,
            bad_implementation => BadImplementation,
        }
    };
}
pub(crate) use with_error_kinds;

macro_rules! declare_error_kind {
    ($($(#[$attr:meta])* $method:ident => $variant:ident),+ $(,)?) => {
        /// Named error constructor.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorKind {
            $($(#[$attr])* $variant),+
        }

        impl ErrorKind {
            /// Every kind, in table order.
            pub const ALL: &'static [ErrorKind] = &[$(ErrorKind::$variant),+];
        }
    };
}

with_error_kinds!(declare_error_kind);

const fn spec(
    kind: ErrorKind,
    name: &'static str,
    status: Option<u16>,
    convention: Convention,
) -> KindSpec {
    KindSpec {
        kind,
        name,
        status,
        convention,
    }
}

/// Every constructor with its name, status and factory function, in
/// [`ErrorKind`] declaration order.
pub static KIND_TABLE: [KindSpec; ErrorKind::ALL.len()] = {
    use errkit_http as f;
    use Convention::{Challenge, Create, Standard, Wrap};
    use ErrorKind as K;
    [
        spec(K::Wrap, "wrap", None, Wrap),
        spec(K::Create, "create", None, Create),
        spec(K::BadRequest, "badRequest", Some(400), Standard(f::bad_request)),
        spec(K::Unauthorized, "unauthorized", Some(401), Challenge(f::unauthorized_with_data)),
        spec(K::PaymentRequired, "paymentRequired", Some(402), Standard(f::payment_required)),
        spec(K::Forbidden, "forbidden", Some(403), Standard(f::forbidden)),
        spec(K::NotFound, "notFound", Some(404), Standard(f::not_found)),
        spec(K::MethodNotAllowed, "methodNotAllowed", Some(405), Standard(f::method_not_allowed)),
        spec(K::NotAcceptable, "notAcceptable", Some(406), Standard(f::not_acceptable)),
        spec(K::ProxyAuthRequired, "proxyAuthRequired", Some(407), Standard(f::proxy_auth_required)),
        spec(K::ClientTimeout, "clientTimeout", Some(408), Standard(f::client_timeout)),
        spec(K::Conflict, "conflict", Some(409), Standard(f::conflict)),
        spec(K::ResourceGone, "resourceGone", Some(410), Standard(f::resource_gone)),
        spec(K::LengthRequired, "lengthRequired", Some(411), Standard(f::length_required)),
        spec(K::PreconditionFailed, "preconditionFailed", Some(412), Standard(f::precondition_failed)),
        spec(K::EntityTooLarge, "entityTooLarge", Some(413), Standard(f::entity_too_large)),
        spec(K::UriTooLong, "uriTooLong", Some(414), Standard(f::uri_too_long)),
        spec(K::UnsupportedMediaType, "unsupportedMediaType", Some(415), Standard(f::unsupported_media_type)),
        spec(K::RangeNotSatisfiable, "rangeNotSatisfiable", Some(416), Standard(f::range_not_satisfiable)),
        spec(K::ExpectationFailed, "expectationFailed", Some(417), Standard(f::expectation_failed)),
        spec(K::Teapot, "teapot", Some(418), Standard(f::teapot)),
        spec(K::BadData, "badData", Some(422), Standard(f::bad_data)),
        spec(K::Locked, "locked", Some(423), Standard(f::locked)),
        spec(K::PreconditionRequired, "preconditionRequired", Some(428), Standard(f::precondition_required)),
        spec(K::TooManyRequests, "tooManyRequests", Some(429), Standard(f::too_many_requests)),
        spec(K::Illegal, "illegal", Some(451), Standard(f::illegal)),
        spec(K::Internal, "internal", Some(500), Standard(f::internal)),
        spec(K::NotImplemented, "notImplemented", Some(501), Standard(f::not_implemented)),
        spec(K::BadGateway, "badGateway", Some(502), Standard(f::bad_gateway)),
        spec(K::ServerUnavailable, "serverUnavailable", Some(503), Standard(f::server_unavailable)),
        spec(K::GatewayTimeout, "gatewayTimeout", Some(504), Standard(f::gateway_timeout)),
        spec(K::BadImplementation, "badImplementation", Some(500), Standard(f::bad_implementation)),
    ]
};

impl ErrorKind {
    #[must_use]
    pub fn spec(self) -> &'static KindSpec {
        &KIND_TABLE[self as usize]
    }

    /// camelCase name, e.g. `badRequest`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Fixed status code; `None` for `wrap` and `create`.
    #[must_use]
    pub fn status(self) -> Option<u16> {
        self.spec().status
    }

    #[must_use]
    pub fn convention(self) -> Convention {
        self.spec().convention
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown constructor name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for ErrorKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KIND_TABLE
            .iter()
            .find(|spec| spec.name == s)
            .map(|spec| spec.kind)
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn table_follows_declaration_order() {
        for (i, kind) in ErrorKind::ALL.iter().enumerate() {
            assert_eq!(KIND_TABLE[i].kind, *kind);
        }
    }

    #[test]
    fn names_round_trip() {
        for kind in ErrorKind::ALL {
            assert_eq!(kind.name().parse::<ErrorKind>().unwrap(), *kind);
        }
        assert!("boom".parse::<ErrorKind>().is_err());
    }

    #[test]
    fn factory_matches_declared_status() {
        for spec in &KIND_TABLE {
            if let Convention::Standard(factory) | Convention::Challenge(factory) = spec.convention {
                assert_eq!(Some(factory(None, None).status_code()), spec.status, "{}", spec.name);
            }
        }
    }
}
