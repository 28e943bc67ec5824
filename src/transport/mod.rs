//! Transport layer: wire-format details (parameter encoding, credentials,
//! response classification, list pages).

mod credentials;
mod cursor;
mod encode;
mod parse;

pub use credentials::{CredentialsError, inject};
pub use cursor::{ListCursor, decode_page};
pub use encode::{EncodingError, encode, form_pairs, to_params, transform_keys};
pub use parse::{parse, project};
