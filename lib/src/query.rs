use ip::{Address, Any};

use serde::Serialize;

use crate::error::Error;

/// Looking glass query kinds, identified on the wire by an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum QueryType {
    /// Look up the routes covering an IP address in a peer's routing table.
    IpLookup = 1,
    /// List the BGP peers known to the looking glass.
    GetPeers = 2,
}

impl QueryType {
    /// The wire code of this query type.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a query type by its wire code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::IpLookup),
            2 => Some(Self::GetPeers),
            _ => None,
        }
    }
}

impl From<QueryType> for u8 {
    fn from(query_type: QueryType) -> Self {
        query_type.code()
    }
}

#[derive(Debug, Serialize)]
struct Header {
    query_type: QueryType,
}

/// Parameters of an IP address lookup.
///
/// # Examples
///
/// ```
/// use pmbgp::IpLookup;
///
/// let lookup = IpLookup::new("192.0.2.1", "2001:db8::1", Some("65000:1"))?;
/// assert_eq!(lookup.ip_address(), "2001:db8::1");
/// # Ok::<_, pmbgp::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpLookup {
    peer_ip_src: String,
    ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rd: Option<String>,
}

impl IpLookup {
    /// Construct a new lookup of `address` in the routing table learned from `peer`, optionally
    /// restricted to the VPN routing table identified by the route distinguisher `rd`.
    ///
    /// Both addresses are validated, but sent exactly as given. The route distinguisher is
    /// passed through as-is; an empty string is treated as absent.
    ///
    /// # Errors
    ///
    /// An [`Error::InvalidAddress`] is returned if `peer` or `address` is not an IPv4 or IPv6
    /// address.
    pub fn new(peer: &str, address: &str, rd: Option<&str>) -> Result<Self, Error> {
        let peer_ip_src = parse_address("peer", peer)?;
        let ip_address = parse_address("address", address)?;
        let rd = rd.filter(|rd| !rd.is_empty()).map(ToString::to_string);
        Ok(Self {
            peer_ip_src,
            ip_address,
            rd,
        })
    }

    /// The peer whose routing table is queried.
    #[must_use]
    pub fn peer_ip_src(&self) -> &str {
        &self.peer_ip_src
    }

    /// The address to look up.
    #[must_use]
    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    /// The route distinguisher, if any.
    #[must_use]
    pub fn rd(&self) -> Option<&str> {
        self.rd.as_deref()
    }
}

fn parse_address(param: &'static str, value: &str) -> Result<String, Error> {
    _ = value
        .parse::<Address<Any>>()
        .map_err(|err| Error::invalid_address(param, value, err))?;
    Ok(value.to_string())
}

/// A looking glass query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Look up the routes covering an IP address.
    IpLookup(IpLookup),
    /// List the known BGP peers.
    GetPeers,
}

impl Query {
    /// The query type announced in the first request frame.
    #[must_use]
    pub const fn query_type(&self) -> QueryType {
        match self {
            Self::IpLookup(_) => QueryType::IpLookup,
            Self::GetPeers => QueryType::GetPeers,
        }
    }

    /// Encode the query as the JSON request frames sent to the looking glass.
    ///
    /// The first frame carries the query type. Queries with parameters carry them in a
    /// second frame.
    ///
    /// # Errors
    ///
    /// Fails if JSON serialization fails.
    pub fn frames(&self) -> Result<Vec<Vec<u8>>, Error> {
        let mut frames = vec![serde_json::to_vec(&Header {
            query_type: self.query_type(),
        })?];
        if let Self::IpLookup(lookup) = self {
            frames.push(serde_json::to_vec(lookup)?);
        }
        Ok(frames)
    }
}

impl From<IpLookup> for Query {
    fn from(lookup: IpLookup) -> Self {
        Self::IpLookup(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(query: &Query) -> Vec<String> {
        query
            .frames()
            .unwrap()
            .into_iter()
            .map(|frame| String::from_utf8(frame).unwrap())
            .collect()
    }

    #[test]
    fn ip_lookup_frames() {
        let query = Query::from(IpLookup::new("10.0.0.1", "192.0.2.0", None).unwrap());
        assert_eq!(
            frames(&query),
            [
                r#"{"query_type":1}"#,
                r#"{"peer_ip_src":"10.0.0.1","ip_address":"192.0.2.0"}"#
            ]
        );
    }

    #[test]
    fn ip_lookup_frames_with_rd() {
        let query =
            Query::from(IpLookup::new("2001:db8::1", "2001:db8:f::", Some("0:65000:1")).unwrap());
        assert_eq!(
            frames(&query)[1],
            r#"{"peer_ip_src":"2001:db8::1","ip_address":"2001:db8:f::","rd":"0:65000:1"}"#
        );
    }

    #[test]
    fn addresses_are_sent_as_given() {
        let lookup = IpLookup::new("2001:DB8::01", "192.0.2.1", None).unwrap();
        assert_eq!(lookup.peer_ip_src(), "2001:DB8::01");
        assert_eq!(
            frames(&Query::from(lookup))[1],
            r#"{"peer_ip_src":"2001:DB8::01","ip_address":"192.0.2.1"}"#
        );
    }

    #[test]
    fn empty_rd_is_omitted() {
        let lookup = IpLookup::new("10.0.0.1", "10.1.1.1", Some("")).unwrap();
        assert_eq!(lookup.rd(), None);
    }

    #[test]
    fn get_peers_is_a_single_frame() {
        assert_eq!(frames(&Query::GetPeers), [r#"{"query_type":2}"#]);
    }

    #[test]
    fn invalid_peer_address() {
        assert!(matches!(
            IpLookup::new("router1", "192.0.2.1", None),
            Err(Error::InvalidAddress { param: "peer", value, .. }) if value == "router1"
        ));
    }

    #[test]
    fn invalid_lookup_address() {
        assert!(matches!(
            IpLookup::new("192.0.2.1", "192.0.2.256", None),
            Err(Error::InvalidAddress {
                param: "address",
                ..
            })
        ));
    }

    #[test]
    fn prefix_is_not_an_address() {
        assert!(IpLookup::new("192.0.2.1", "192.0.2.0/24", None).is_err());
    }

    #[test]
    fn query_type_codes() {
        assert_eq!(QueryType::from_code(1), Some(QueryType::IpLookup));
        assert_eq!(QueryType::from_code(2), Some(QueryType::GetPeers));
        assert_eq!(QueryType::from_code(0), None);
        assert_eq!(QueryType::GetPeers.code(), 2);
    }
}
