//! Hand-built responses and an in-memory transport for engine tests.

use crate::transport::{Received, Transport};
use bytes::{BufMut, Bytes};
use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

struct Record {
    name: String,
    rtype: u16,
    ttl: u32,
    rdata: Vec<u8>,
}

/// Builds response datagrams. Names are written uncompressed.
#[derive(Default)]
pub struct MessageBuilder {
    rcode: u8,
    answers: Vec<Record>,
    authorities: Vec<Record>,
    additionals: Vec<Record>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.rcode = rcode;
        self
    }

    pub fn answer_a(mut self, name: &str, ttl: u32, addr: [u8; 4]) -> Self {
        self.answers.push(Record::new(name, 1, ttl, addr.to_vec()));
        self
    }

    pub fn answer_cname(mut self, name: &str, ttl: u32, target: &str) -> Self {
        self.answers.push(Record::new(name, 5, ttl, encode_name(target)));
        self
    }

    pub fn authority_ns(mut self, zone: &str, ttl: u32, name_server: &str) -> Self {
        self.authorities
            .push(Record::new(zone, 2, ttl, encode_name(name_server)));
        self
    }

    pub fn authority_other(mut self, zone: &str, rtype: u16, ttl: u32, rdata: Vec<u8>) -> Self {
        self.authorities.push(Record::new(zone, rtype, ttl, rdata));
        self
    }

    pub fn additional_a(mut self, name: &str, ttl: u32, addr: [u8; 4]) -> Self {
        self.additionals.push(Record::new(name, 1, ttl, addr.to_vec()));
        self
    }

    pub fn to_bytes(&self, id: u16, question: &str) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.put_u16(id);
        bytes.put_u16(0x8000 | u16::from(self.rcode));
        bytes.put_u16(1);
        bytes.put_u16(self.answers.len() as u16);
        bytes.put_u16(self.authorities.len() as u16);
        bytes.put_u16(self.additionals.len() as u16);

        bytes.extend_from_slice(&encode_name(question));
        bytes.put_u16(1);
        bytes.put_u16(1);

        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            bytes.extend_from_slice(&encode_name(&record.name));
            bytes.put_u16(record.rtype);
            bytes.put_u16(1);
            bytes.put_u32(record.ttl);
            bytes.put_u16(record.rdata.len() as u16);
            bytes.extend_from_slice(&record.rdata);
        }

        bytes
    }
}

impl Record {
    fn new(name: &str, rtype: u16, ttl: u32, rdata: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            rtype,
            ttl,
            rdata,
        }
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        bytes.push(label.len() as u8);
        bytes.extend_from_slice(label.as_bytes());
    }
    bytes.push(0);
    bytes
}

/// How a scripted server reacts to one query.
pub enum Reply {
    Message(MessageBuilder),
    Raw(Vec<u8>),
    Silence,
    Fail,
}

/// A query the engine sent: destination, question name and transaction ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentQuery {
    pub server: Ipv4Addr,
    pub name: String,
    pub id: u16,
}

/// In-memory name servers keyed by (server address, question name). Each
/// key holds a queue of replies; the last reply repeats once the queue is
/// down to one. Unknown keys stay silent.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: HashMap<(Ipv4Addr, String), VecDeque<Reply>>,
    pub sent: Vec<SentQuery>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, server: [u8; 4], name: &str, reply: Reply) -> Self {
        self.replies
            .entry((Ipv4Addr::from(server), name.to_ascii_lowercase()))
            .or_default()
            .push_back(reply);
        self
    }

    fn respond(&mut self, key: &(Ipv4Addr, String), id: u16) -> std::io::Result<Received> {
        let Some(queue) = self.replies.get_mut(key) else {
            return Ok(Received::TimedOut);
        };

        let popped: Option<Reply>;
        let reply = if queue.len() > 1 {
            popped = queue.pop_front();
            popped.as_ref()
        } else {
            queue.front()
        };

        match reply {
            None | Some(Reply::Silence) => Ok(Received::TimedOut),
            Some(Reply::Message(builder)) => {
                Ok(Received::Datagram(Bytes::from(builder.to_bytes(id, &key.1))))
            }
            Some(Reply::Raw(bytes)) => Ok(Received::Datagram(Bytes::from(bytes.clone()))),
            Some(Reply::Fail) => Err(std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                "cannot assign requested address",
            )),
        }
    }
}

impl Transport for ScriptedTransport {
    async fn exchange(&mut self, server: SocketAddr, request: &[u8]) -> std::io::Result<Received> {
        let query = dns::decode_response(request).expect("engine sent an undecodable query");
        let name = query
            .question()
            .expect("engine sent a query without a question")
            .domain()
            .to_string();
        let server = match server.ip() {
            IpAddr::V4(addr) => addr,
            IpAddr::V6(_) => panic!("engine sent a query over IPv6"),
        };

        self.sent.push(SentQuery {
            server,
            name: name.clone(),
            id: query.id(),
        });

        let key = (server, name.to_ascii_lowercase());
        self.respond(&key, query.id())
    }
}

/// Trace sink whose clones share one buffer, so a test can read back what
/// the resolver wrote.
#[derive(Clone, Default)]
pub struct TraceBuffer(Arc<Mutex<Vec<u8>>>);

impl TraceBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for TraceBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
