use crate::error::LookupError;
use dns::ResponseMessage;
use std::net::Ipv4Addr;

const RCODE_NO_ERROR: u8 = 0;
const RCODE_NAME_ERROR: u8 = 3;

/// One CNAME hop: the alias target and the TTL of the CNAME record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub target: String,
    pub ttl: u32,
}

/// What to do after a response to a query for `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `owner` (`name` itself, or the end of `aliases`) has an address.
    Answer {
        owner: String,
        address: Ipv4Addr,
        ttl: u32,
        aliases: Vec<Alias>,
    },
    /// Ask the same question of a closer name server.
    Referral { name_server: String, address: Ipv4Addr },
    /// `name` is an alias; start over from the root with the last target.
    Restart { aliases: Vec<Alias> },
    /// The closer name server came without an address; look it up first.
    ResolveNameServer(String),
}

pub fn decide(response: &ResponseMessage, name: &str) -> Result<Step, LookupError> {
    match response.rcode() {
        RCODE_NO_ERROR => {}
        RCODE_NAME_ERROR => return Err(LookupError::NameError),
        rcode => return Err(LookupError::ServerFailure(rcode)),
    }

    let aliases = follow_aliases(response, name);
    let canonical = aliases.last().map_or(name, |alias| alias.target.as_str());

    if let Some((record, address)) = response.answer_address(canonical) {
        return Ok(Step::Answer {
            owner: record.domain().to_string(),
            address,
            ttl: record.ttl(),
            aliases,
        });
    }

    let glued = response
        .name_servers()
        .find_map(|ns| response.glue_address(ns).map(|address| (ns, address)));
    if let Some((name_server, address)) = glued {
        return Ok(Step::Referral {
            name_server: name_server.to_string(),
            address,
        });
    }

    if !aliases.is_empty() {
        return Ok(Step::Restart { aliases });
    }

    if let Some(name_server) = response.name_servers().next() {
        return Ok(Step::ResolveNameServer(name_server.to_string()));
    }

    Err(LookupError::NoData)
}

// CNAME hops for `name` within the answer section, stopping at a repeat.
fn follow_aliases(response: &ResponseMessage, name: &str) -> Vec<Alias> {
    let mut aliases: Vec<Alias> = Vec::new();
    let mut current = name.to_string();

    while let Some((record, target)) = response.answer_alias(&current) {
        let seen = target.eq_ignore_ascii_case(name)
            || aliases.iter().any(|a| a.target.eq_ignore_ascii_case(target));
        if seen {
            break;
        }

        aliases.push(Alias {
            target: target.to_string(),
            ttl: record.ttl(),
        });
        current = target.to_string();
    }

    aliases
}
