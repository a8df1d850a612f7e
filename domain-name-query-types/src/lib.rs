use std::fmt;
use std::net::Ipv4Addr;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum QType {
    A,
    // Aaaa,
}

impl fmt::Display for QType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            QType::A => "A",
        };
        write!(f, "{}", s)
    }
}

pub type Name = String;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NameQuery {
    pub name: Name,
    pub q_type: QType,
}

impl NameQuery {
    pub fn a_record(name_str: &str) -> Self {
        Self {
            name: Name::from(name_str),
            q_type: QType::A,
        }
    }
}

impl fmt::Display for NameQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name, self.q_type)
    }
}

/// A resolved name: the name asked for, how long the answer may be trusted,
/// and its address.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DomainNameInfo {
    pub fqdn: Name,
    pub ttl: u32,
    pub address: Ipv4Addr,
}

impl DomainNameInfo {
    pub fn new(fqdn: &str, ttl: u32, address: Ipv4Addr) -> Self {
        Self {
            fqdn: Name::from(fqdn),
            ttl,
            address,
        }
    }
}

impl fmt::Display for DomainNameInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.fqdn, self.ttl, self.address)
    }
}

/// The sentinel reported in place of a TTL when a lookup fails.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureCode {
    NameError,
    Timeout,
    QueryBudgetExceeded,
    Unresolved,
}

impl FailureCode {
    pub fn sentinel(self) -> i32 {
        match self {
            FailureCode::NameError => -1,
            FailureCode::Timeout => -2,
            FailureCode::QueryBudgetExceeded => -3,
            FailureCode::Unresolved => -4,
        }
    }
}

/// The single output line of a lookup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LookupReport {
    Resolved(DomainNameInfo),
    Failed { fqdn: Name, code: FailureCode },
}

impl LookupReport {
    pub fn failed(fqdn: &str, code: FailureCode) -> Self {
        LookupReport::Failed {
            fqdn: Name::from(fqdn),
            code,
        }
    }
}

impl fmt::Display for LookupReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LookupReport::Resolved(info) => write!(f, "{}", info),
            LookupReport::Failed { fqdn, code } => {
                write!(f, "{} {} {}", fqdn, code.sentinel(), Ipv4Addr::UNSPECIFIED)
            }
        }
    }
}
