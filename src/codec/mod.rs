//! Codecs shared by the config-carrying resources
//!
//! Wiki.js exchanges free-form module settings (auth strategies, renderers,
//! search engines) as key/value pairs whose values are JSON envelopes. This
//! module converts those envelopes to and from plain strings, rebuilds
//! position-ordered collections from API responses, and validates keyed
//! submissions before they hit the wire.

mod keyed;
mod ordered;
mod value;

pub use keyed::ensure_unique_keys;
pub use ordered::{place_at, rebuild_by_index, rebuild_ordered, Positioned};
pub(crate) use ordered::slot;
pub use value::{
    decode_config_map, decode_value, encode_config_map, encode_input_value, encode_value,
    ConfigValue, KeyValuePair, KeyValuePairInput,
};
