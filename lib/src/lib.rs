//! Support library for `pmbgp`, a BGP looking glass query client.
//!
//! A looking glass daemon answers route lookups over a [ZeroMQ][zmq] request/reply socket. A
//! query is sent as one or two JSON encoded frames, and the reply is a JSON summary, announcing
//! the number of results, followed by one JSON document per result.
//!
//! # Examples
//!
//! ``` no_run
//! use pmbgp::{Endpoint, IpLookup, LookingGlass, Query};
//!
//! let query = Query::from(IpLookup::new("192.0.2.1", "198.51.100.0", None)?);
//! let mut lg = LookingGlass::connect(&Endpoint::default(), None)?;
//! let response = lg.query(&query)?;
//! println!("{}", response.summary());
//! for record in response {
//!     println!("{}", record?);
//! }
//! # Ok::<_, pmbgp::Error>(())
//! ```
//!
//! [zmq]: https://zeromq.org/
#![doc(html_root_url = "https://docs.rs/pmbgp-lib/0.1.0-alpha.1")]
// clippy lints
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::multiple_crate_versions)]
// rustc lints
#![warn(absolute_paths_not_starting_with_crate)]
#![warn(deprecated_in_future)]
#![warn(elided_lifetimes_in_paths)]
#![warn(explicit_outlives_requirements)]
#![warn(keyword_idents)]
#![warn(macro_use_extern_crate)]
#![warn(meta_variable_misuse)]
#![warn(missing_abi)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(noop_method_call)]
#![warn(rust_2021_incompatible_closure_captures)]
#![warn(rust_2021_incompatible_or_patterns)]
#![warn(rust_2021_prefixes_incompatible_syntax)]
#![warn(rust_2021_prelude_collisions)]
#![warn(single_use_lifetimes)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(unsafe_op_in_unsafe_fn)]
#![warn(unstable_features)]
#![warn(unused_crate_dependencies)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]
#![warn(unused_results)]
#![warn(variant_size_differences)]
// docs.rs build config
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod client;
pub use self::client::{LookingGlass, Response};

mod endpoint;
pub use self::endpoint::{Credentials, Endpoint, Password};

mod error;
pub use self::error::Error;

mod query;
pub use self::query::{IpLookup, Query, QueryType};

mod reply;
pub use self::reply::{Record, Summary};

// silence unused dev-dependency warnings
#[cfg(test)]
mod deps {
    use version_sync as _;
}
