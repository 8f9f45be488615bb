use std::fmt;

use bytes::Bytes;

use crate::{
    endpoint::{Credentials, Endpoint},
    error::Error,
    query::Query,
    reply::{Record, Summary},
};

/// A connection to a looking glass daemon.
pub struct LookingGlass {
    // must be dropped before the context
    socket: zmq::Socket,
    _context: zmq::Context,
}

impl LookingGlass {
    /// Connect a ZeroMQ `REQ` socket to the looking glass at `endpoint`.
    ///
    /// If `credentials` are provided, they are presented using the ZeroMQ `PLAIN` mechanism.
    ///
    /// The connection itself is established in the background: an unreachable looking glass
    /// is retried rather than reported.
    ///
    /// # Errors
    ///
    /// An [`Error::Transport`] is returned if the socket cannot be created or configured.
    #[tracing::instrument(level = "debug")]
    pub fn connect(endpoint: &Endpoint, credentials: Option<Credentials>) -> Result<Self, Error> {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::REQ)?;
        socket.set_linger(0)?;
        socket.set_ipv6(true)?;
        if let Some(credentials) = credentials {
            credentials.apply(&socket)?;
        }
        tracing::info!(%endpoint, "connecting to looking glass");
        socket.connect(&endpoint.to_string())?;
        Ok(Self {
            socket,
            _context: context,
        })
    }

    /// Send `query` and receive the reply summary.
    ///
    /// The returned [`Response`] yields the result records announced in the summary.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, or if the summary is malformed.
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn query(&mut self, query: &Query) -> Result<Response<'_>, Error> {
        let frames = query.frames()?;
        tracing::debug!(frames = frames.len(), "sending query");
        let last = frames.len().saturating_sub(1);
        for (i, frame) in frames.into_iter().enumerate() {
            let flags = if i < last { zmq::SNDMORE } else { 0 };
            self.socket.send(frame, flags)?;
        }
        let summary = Summary::from_bytes(&self.socket.recv_bytes(0)?)?;
        let more = self.socket.get_rcvmore()?;
        tracing::debug!(?summary, "received reply summary");
        if summary.kind() != Some(query.query_type()) {
            tracing::warn!(
                sent = query.query_type().code(),
                received = summary.query_type(),
                "reply query type does not match request"
            );
        }
        Ok(Response {
            expected: summary.results(),
            summary,
            received: 0,
            more,
            failed: false,
            socket: &self.socket,
        })
    }
}

impl fmt::Debug for LookingGlass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookingGlass").finish_non_exhaustive()
    }
}

/// The reply to a looking glass query.
///
/// Iterating over a [`Response`] performs exactly one receive for each result announced in
/// the [`Summary`]. Any further reply frames are left unread.
pub struct Response<'a> {
    summary: Summary,
    expected: u64,
    received: u64,
    more: bool,
    failed: bool,
    socket: &'a zmq::Socket,
}

impl Response<'_> {
    /// The reply summary.
    #[must_use]
    pub const fn summary(&self) -> &Summary {
        &self.summary
    }

    /// The number of records not yet received.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.expected - self.received
    }

    fn recv(&mut self) -> Result<Record, Error> {
        let data = self.socket.recv_bytes(0)?;
        self.more = self.socket.get_rcvmore()?;
        self.received += 1;
        tracing::trace!(index = self.received, "received result record");
        Ok(Record::new(Bytes::from(data)))
    }
}

impl fmt::Debug for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("summary", &self.summary)
            .field("expected", &self.expected)
            .field("received", &self.received)
            .field("more", &self.more)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl Iterator for Response<'_> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.received == self.expected {
            return None;
        }
        if !self.more {
            self.failed = true;
            return Some(Err(Error::TruncatedReply {
                expected: self.expected,
                received: self.received,
            }));
        }
        let record = self.recv();
        self.failed = record.is_err();
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, usize::try_from(self.remaining()).ok())
        }
    }
}
