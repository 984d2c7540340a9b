pub mod cell;
pub mod codec;
pub mod db;
pub mod store;

pub use cell::{PrefCell, PrefSubscription};
pub use codec::{Codec, CodecError, JsonCodec, NumberCodec};
pub use store::PrefStore;
