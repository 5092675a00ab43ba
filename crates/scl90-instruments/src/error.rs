use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("'{instrument_id}' expects {expected} responses, got {actual}")]
    ItemCount {
        instrument_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("no norm cutoff for dimension '{dimension_id}' of '{instrument_id}'")]
    MissingNorm {
        instrument_id: String,
        dimension_id: String,
    },
}
