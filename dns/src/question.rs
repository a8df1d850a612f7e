use crate::error::{EncodeError, MessageError};
use crate::utils::{domain_to_qname, read_name_at_cursor, read_u16};
use bytes::BufMut;
use std::io::Cursor;

pub const QTYPE_A: u16 = 1;
pub const QCLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    domain: String,
    qtype: u16,
    qclass: u16,
}

impl Question {
    /// An `A`/`IN` question for `domain`.
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            qtype: QTYPE_A,
            qclass: QCLASS_IN,
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
        let qname = domain_to_qname(&self.domain)?;
        bytes.extend_from_slice(&qname);

        bytes.put_u16(self.qtype);
        bytes.put_u16(self.qclass);

        Ok(())
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, MessageError> {
        let domain = read_name_at_cursor(rdr)?;
        let qtype = read_u16(rdr)?;
        let qclass = read_u16(rdr)?;

        let q = Self {
            domain,
            qtype,
            qclass,
        };

        Ok(q)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}
