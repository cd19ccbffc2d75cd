//! Native image decoding

mod native_decoder;

pub use native_decoder::{NativeImageDecoder, decode_dimensions};
