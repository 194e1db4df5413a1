//! Row encoding and decoding
//!
//! CSV lines are decoded into sparse rows and written back out as libsvm
//! lines. Both sides also drive whole sections over readers and writers.

pub mod csv;
pub mod libsvm;

pub use self::csv::{build_section, decode_line, RowReader};
pub use self::libsvm::{
    encode_row, parse_libsvm_line, read_libsvm_section, write_section, LibSvmLine,
};
