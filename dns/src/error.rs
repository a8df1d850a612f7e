use thiserror::Error;

/// A domain name that cannot be put on the wire as a question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("domain name contains an empty label")]
    EmptyLabel,

    #[error("label '{label}' is {len} bytes, at most 63 are allowed")]
    LabelTooLong { label: String, len: usize },

    #[error("encoded domain name is {0} bytes, at most 255 are allowed")]
    NameTooLong(usize),
}

/// A received datagram that does not parse as a DNS message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("message truncated: needed {needed} bytes at offset {offset}")]
    Truncated { needed: usize, offset: usize },

    #[error("unsupported label type {tag:#04x} at offset {offset}")]
    BadLabelType { offset: usize, tag: u8 },

    #[error("label at offset {0} contains a '.' byte")]
    DotInLabel(usize),

    #[error("compression pointer loop through offset {0}")]
    PointerLoop(usize),

    #[error("compression pointer to offset {0} is outside the message")]
    PointerOutOfRange(usize),

    #[error("domain name starting at offset {0} exceeds 255 bytes")]
    NameTooLong(usize),

    #[error("record type {rtype} has rdlength {actual}, expected {expected}")]
    BadRdLength {
        rtype: u16,
        expected: usize,
        actual: usize,
    },

    #[error("rdata of record type {rtype} runs past the end of the message")]
    RdataOverrun { rtype: u16 },
}

impl MessageError {
    pub(crate) fn truncated(needed: usize, offset: usize) -> Self {
        MessageError::Truncated { needed, offset }
    }
}
