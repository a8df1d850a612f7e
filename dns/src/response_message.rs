use crate::error::MessageError;
use crate::header::Header;
use crate::question::Question;
use crate::resource_record::{RData, ResourceRecord};
use std::fmt;
use std::io::Cursor;
use std::net::Ipv4Addr;

#[derive(Debug, Clone)]
pub struct ResponseMessage {
    header: Header,
    questions: Vec<Question>,
    answer_records: Vec<ResourceRecord>,
    authority_records: Vec<ResourceRecord>,
    additional_records: Vec<ResourceRecord>,
}

impl ResponseMessage {
    // 解析 DNS 的响应
    pub fn parse_response(response: &[u8]) -> Result<Self, MessageError> {
        let mut reader = Cursor::new(response);

        let header = Header::parse_from_reader(&mut reader)?;

        let mut questions = Vec::with_capacity(header.qd_count().into());
        for _ in 0..header.qd_count() {
            questions.push(Question::parse_from_reader(&mut reader)?);
        }

        let answer_records = parse_records(&mut reader, header.answer_count())?;
        let authority_records = parse_records(&mut reader, header.authority_count())?;
        let additional_records = parse_records(&mut reader, header.additional_count())?;

        let msg = Self {
            header,
            questions,
            answer_records,
            authority_records,
            additional_records,
        };

        Ok(msg)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn id(&self) -> u16 {
        self.header.id()
    }

    pub fn rcode(&self) -> u8 {
        self.header.rcode()
    }

    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answer_records
    }

    pub fn authorities(&self) -> &[ResourceRecord] {
        &self.authority_records
    }

    pub fn additionals(&self) -> &[ResourceRecord] {
        &self.additional_records
    }

    /// First answer `A` record owned by `domain`, with its address.
    pub fn answer_address(&self, domain: &str) -> Option<(&ResourceRecord, Ipv4Addr)> {
        find_address(&self.answer_records, domain)
    }

    /// Target of the first answer `CNAME` record owned by `domain`.
    pub fn answer_alias(&self, domain: &str) -> Option<(&ResourceRecord, &str)> {
        self.answer_records
            .iter()
            .filter(|r| r.is_named(domain))
            .find_map(|r| match r.rdata() {
                RData::Cname(target) => Some((r, target.as_str())),
                _ => None,
            })
    }

    /// Name servers listed in the authority section, in order.
    pub fn name_servers(&self) -> impl Iterator<Item = &str> {
        self.authority_records.iter().filter_map(|r| match r.rdata() {
            RData::Ns(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Glue address for `name_server` in the additional section.
    pub fn glue_address(&self, name_server: &str) -> Option<Ipv4Addr> {
        find_address(&self.additional_records, name_server).map(|(_, addr)| addr)
    }
}

impl fmt::Display for ResponseMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Response ID: {} Authoritative = {} RCODE = {}",
            self.header.id(),
            self.header.is_authoritative(),
            self.header.rcode()
        )?;

        let sections = [
            ("Answers", &self.answer_records),
            ("Nameservers", &self.authority_records),
            ("Additional Information", &self.additional_records),
        ];
        for (title, records) in sections {
            writeln!(f, "  {} ({})", title, records.len())?;
            for record in records.iter() {
                writeln!(f, "{}", record)?;
            }
        }

        Ok(())
    }
}

fn parse_records(
    reader: &mut Cursor<&[u8]>,
    count: u16,
) -> Result<Vec<ResourceRecord>, MessageError> {
    let mut records: Vec<ResourceRecord> = Vec::with_capacity(count.into());
    for _ in 0..count {
        let record = ResourceRecord::parse_from_reader(reader)?;
        records.push(record);
    }

    Ok(records)
}

fn find_address<'a>(
    records: &'a [ResourceRecord],
    domain: &str,
) -> Option<(&'a ResourceRecord, Ipv4Addr)> {
    records
        .iter()
        .filter(|r| r.is_named(domain))
        .find_map(|r| match r.rdata() {
            RData::A(addr) => Some((r, *addr)),
            _ => None,
        })
}
