//! Protocol module: the wire value model, the command schema table, the
//! payload codec, and transaction identifiers.

pub mod codec;
pub mod coerce;
pub mod commands;
pub mod registry;
pub mod transaction;
pub mod value;

pub use codec::{decode_payload, encode_command, CodecError, DecodedCommand, Params};
pub use coerce::Coercion;
pub use commands::builtin_commands;
pub use registry::{CommandRegistry, CommandSchema, ParamSchema};
pub use transaction::{Transaction, TransactionId};
pub use value::Value;
