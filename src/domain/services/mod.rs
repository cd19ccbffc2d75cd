//! Domain services
//!
//! Format sniffing and dimension probing.

mod dimension_prober;
mod format_sniffer;

pub use dimension_prober::DimensionProber;
pub use format_sniffer::{
    FormatSniffer, SniffError, sniff_bytes, sniff_data_uri, sniff_extension, sniff_file,
};
