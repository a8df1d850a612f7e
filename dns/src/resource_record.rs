use crate::error::MessageError;
use crate::utils::{read_name, read_name_at_cursor, read_u16, read_u32};
use bytes::Bytes;
use std::fmt;
use std::io::Cursor;
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Ns,
    Cname,
    Soa,
    Aaaa,
    Other(u16),
}

impl From<u16> for RecordType {
    fn from(value: u16) -> Self {
        match value {
            1 => RecordType::A,
            2 => RecordType::Ns,
            5 => RecordType::Cname,
            6 => RecordType::Soa,
            28 => RecordType::Aaaa,
            other => RecordType::Other(other),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordType::A => f.write_str("A"),
            RecordType::Ns => f.write_str("NS"),
            RecordType::Cname => f.write_str("CN"),
            RecordType::Soa => f.write_str("SOA"),
            RecordType::Aaaa => f.write_str("AAAA"),
            RecordType::Other(n) => write!(f, "{}", n),
        }
    }
}

/// Record data, interpreted only for the types the resolver acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Cname(String),
    Ns(String),
    Other(Bytes),
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RData::A(addr) => write!(f, "{}", addr),
            RData::Cname(name) | RData::Ns(name) => f.write_str(name),
            RData::Other(data) if data.len() == 16 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(data);
                write!(f, "{}", Ipv6Addr::from(octets))
            }
            RData::Other(_) => f.write_str("----"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    domain: String,
    rtype: u16,
    ttl: u32,
    rdata: RData,
}

impl ResourceRecord {
    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, MessageError> {
        let domain = read_name_at_cursor(rdr)?;
        let rtype = read_u16(rdr)?;
        read_u16(rdr)?; // class
        let ttl = read_u32(rdr)?;
        let rdlength = read_u16(rdr)?;

        let message: &[u8] = *rdr.get_ref();
        let rdata_begin = rdr.position() as usize;
        let rdata_end = rdata_begin + rdlength as usize;
        let raw = message
            .get(rdata_begin..rdata_end)
            .ok_or(MessageError::RdataOverrun { rtype })?;

        let rdata = match RecordType::from(rtype) {
            RecordType::A => {
                let octets: [u8; 4] = raw.try_into().map_err(|_| MessageError::BadRdLength {
                    rtype,
                    expected: 4,
                    actual: raw.len(),
                })?;
                RData::A(Ipv4Addr::from(octets))
            }
            RecordType::Ns => RData::Ns(read_rdata_name(message, rdata_begin, rtype, rdlength)?),
            RecordType::Cname => {
                RData::Cname(read_rdata_name(message, rdata_begin, rtype, rdlength)?)
            }
            _ => RData::Other(Bytes::copy_from_slice(raw)),
        };

        rdr.set_position(rdata_end as u64);

        let record = Self {
            domain,
            rtype,
            ttl,
            rdata,
        };

        Ok(record)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn record_type(&self) -> RecordType {
        RecordType::from(self.rtype)
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn rdata(&self) -> &RData {
        &self.rdata
    }

    pub fn is_named(&self, domain: &str) -> bool {
        self.domain.eq_ignore_ascii_case(domain)
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "       {:<30} {:<10} {:<4} {}",
            self.domain,
            self.ttl,
            self.record_type().to_string(),
            self.rdata
        )
    }
}

// NS/CNAME rdata is a single name which must fill rdlength exactly.
fn read_rdata_name(
    message: &[u8],
    begin: usize,
    rtype: u16,
    rdlength: u16,
) -> Result<String, MessageError> {
    let (name, consumed) = read_name(message, begin)?;
    if consumed != rdlength as usize {
        return Err(MessageError::BadRdLength {
            rtype,
            expected: consumed,
            actual: rdlength as usize,
        });
    }

    Ok(name)
}
