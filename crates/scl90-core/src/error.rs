use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid Likert value '{0}': only numbers 0-4 are allowed")]
    InvalidLikert(String),

    #[error("item {item}: {source}")]
    InvalidItem {
        item: usize,
        #[source]
        source: Box<CoreError>,
    },

    #[error("expected exactly {expected} responses, got {actual}")]
    WrongItemCount { expected: usize, actual: usize },

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid sex '{0}': expected male or female")]
    InvalidSex(String),

    #[error("ambiguous sex '{0}': write male/hombre or female/mujer")]
    AmbiguousSex(String),

    #[error("invalid date '{0}': expected dd/mm/yyyy or yyyy-mm-dd")]
    InvalidDate(String),
}
