//! Transport boundary: anything that can POST a form body and hand back
//! the raw response bytes.

#[cfg(feature = "http-transport")]
mod http;
mod traits;

#[cfg(feature = "http-transport")]
pub use http::HttpTransport;
pub use traits::GatewayTransport;
