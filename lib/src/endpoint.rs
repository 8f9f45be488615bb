use std::{convert::Infallible, fmt, str::FromStr};

/// The address of a looking glass daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Default looking glass host.
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    /// Default looking glass port.
    pub const DEFAULT_PORT: u16 = 17900;

    /// Construct a new [`Endpoint`].
    pub fn new<H: Into<String>>(host: H, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the looking glass hostname or IP address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the looking glass port number.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOST, Self::DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "tcp://[{}]:{}", self.host, self.port)
        } else {
            write!(f, "tcp://{}:{}", self.host, self.port)
        }
    }
}

/// A looking glass password, kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Consume the wrapper, returning the password.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self(password)
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self(password.to_string())
    }
}

impl FromStr for Password {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// Clear-text credentials presented to the looking glass using the ZeroMQ `PLAIN` mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Password,
}

impl Credentials {
    /// Construct a new set of credentials.
    pub fn new<U, P>(username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<Password>,
    {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Configure `socket` to authenticate as a `PLAIN` client.
    pub(crate) fn apply(self, socket: &zmq::Socket) -> Result<(), zmq::Error> {
        tracing::debug!(username = %self.username, "using PLAIN authentication");
        socket.set_plain_username(Some(self.username.as_str()))?;
        socket.set_plain_password(Some(self.password.into_inner().as_str()))
    }
}
