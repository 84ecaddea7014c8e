use serde::Deserialize;

/// The backend wraps payloads in zero, one, or two `data` envelopes
/// depending on the endpoint. Variants are tried in declaration order, so a
/// `data` wrapper is peeled before the payload itself is considered.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: Box<Envelope<T>> },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data.into_inner(),
            Envelope::Bare(value) => value,
        }
    }
}
