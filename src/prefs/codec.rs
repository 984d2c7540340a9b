use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// A stored string that refused to turn back into a value. Callers never
/// propagate this; they fall back to the cell's default.
#[derive(Debug)]
pub struct CodecError(pub String);

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CodecError {}

/// Reversible string encoding for one preference cell. The store only ever
/// sees strings; what they mean is decided per cell, right here.
pub trait Codec: Send + Sync {
    type Value: Clone + Send + Sync + 'static;

    fn encode(&self, value: &Self::Value) -> Result<String, CodecError>;
    fn decode(&self, raw: &str) -> Result<Self::Value, CodecError>;
}

/// Plain decimal text, the way the reference client stored its numeric
/// filter fields.
pub struct NumberCodec;

impl Codec for NumberCodec {
    type Value = f64;

    fn encode(&self, value: &f64) -> Result<String, CodecError> {
        Ok(value.to_string())
    }

    fn decode(&self, raw: &str) -> Result<f64, CodecError> {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| CodecError(format!("not a number: {raw:?}")))
    }
}

/// Structured values as JSON text. The store stays agnostic; this is just
/// one codec among others.
pub struct JsonCodec<T> {
    _marker: PhantomData<T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Codec for JsonCodec<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Value = T;

    fn encode(&self, value: &T) -> Result<String, CodecError> {
        serde_json::to_string(value).map_err(|e| CodecError(format!("JSON encode failed: {e}")))
    }

    fn decode(&self, raw: &str) -> Result<T, CodecError> {
        serde_json::from_str(raw).map_err(|e| CodecError(format!("JSON decode failed: {e}")))
    }
}
