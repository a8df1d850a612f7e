use crate::error::MessageError;
use crate::utils::read_u16;
use bytes::BufMut;
use std::io::Cursor;

const AA_MASK: u16 = 0x0400;
const RCODE_MASK: u16 = 0x000f;

// 12 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    id: u16,
    flags: u16, // QR, Opcode, AA, TC, RD, RA, Z, RCODE
    qdcount: u16,
    ancount: u16,
    nscount: u16,
    arcount: u16,
}

impl Header {
    /// Header of an iterative standard query: all flags clear, so RD = 0.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            flags: 0,
            qdcount: 1,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) {
        bytes.put_u16(self.id);
        bytes.put_u16(self.flags);
        bytes.put_u16(self.qdcount);
        bytes.put_u16(self.ancount);
        bytes.put_u16(self.nscount);
        bytes.put_u16(self.arcount);
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, MessageError> {
        let id = read_u16(rdr)?;
        let flags = read_u16(rdr)?;
        let qdcount = read_u16(rdr)?;
        let ancount = read_u16(rdr)?;
        let nscount = read_u16(rdr)?;
        let arcount = read_u16(rdr)?;

        let h = Self {
            id,
            flags,
            qdcount,
            ancount,
            nscount,
            arcount,
        };

        Ok(h)
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn is_authoritative(&self) -> bool {
        self.flags & AA_MASK != 0
    }

    /// Low 4 bits of the second flags byte.
    pub fn rcode(&self) -> u8 {
        (self.flags & RCODE_MASK) as u8
    }

    pub fn qd_count(&self) -> u16 {
        self.qdcount
    }

    pub fn answer_count(&self) -> u16 {
        self.ancount
    }

    pub fn authority_count(&self) -> u16 {
        self.nscount
    }

    pub fn additional_count(&self) -> u16 {
        self.arcount
    }
}
