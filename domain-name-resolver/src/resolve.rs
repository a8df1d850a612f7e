use crate::decision::{decide, Alias, Step};
use crate::error::LookupError;
use crate::ids::IdSource;
use crate::session::{ChainScope, Limits, ResolutionSession};
use crate::transport::{Received, Transport};
use dns::ResponseMessage;
use domain_name_query_types::{DomainNameInfo, LookupReport, NameQuery};
use std::fmt;
use std::io::Write;
use std::net::{Ipv4Addr, SocketAddr};

/// A lookup in progress: the name being asked for, the server to ask next,
/// and the alias chain collected for it so far.
#[derive(Debug)]
struct PendingLookup {
    query: NameQuery,
    server: Ipv4Addr,
    scope: ChainScope,
}

impl PendingLookup {
    fn new(name: &str, server: Ipv4Addr) -> Self {
        let name = without_root(name);
        Self {
            query: NameQuery::a_record(name),
            server,
            scope: ChainScope::new(name),
        }
    }

    // CNAME hops only extend the chain when the name they start from is in it.
    fn follow(&mut self, aliases: &[Alias]) {
        if !self.scope.contains(&self.query.name) {
            return;
        }

        for alias in aliases {
            self.scope.insert(&alias.target);
            self.scope.fold_ttl(alias.ttl);
        }
    }
}

// Decoded names never carry the root label, so neither may the query.
fn without_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Iterative resolver: walks referrals from a root server down to an
/// address, following aliases and looking up unglued name servers itself.
pub struct Resolver<T, I> {
    transport: T,
    ids: I,
    limits: Limits,
    trace: Option<Box<dyn Write + Send>>,
}

impl<T, I> Resolver<T, I>
where
    T: Transport,
    I: IdSource,
{
    pub fn new(transport: T, ids: I) -> Self {
        Self {
            transport,
            ids,
            limits: Limits::default(),
            trace: None,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Writes every query attempt and every decoded response to `out`.
    pub fn with_trace<W>(mut self, out: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.trace = Some(Box::new(out));
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Looks up `fqdn` and renders the outcome as the result line.
    pub async fn report(&mut self, root: Ipv4Addr, fqdn: &str) -> LookupReport {
        match self.lookup(root, fqdn).await {
            Ok(info) => LookupReport::Resolved(info),
            Err(e) => {
                tracing::debug!("lookup of {} failed: {}", fqdn, e);
                LookupReport::failed(fqdn, e.failure_code())
            }
        }
    }

    /// Resolves `fqdn` starting at `root`.
    ///
    /// The reported name is always `fqdn` and the reported TTL is the
    /// smallest one along its alias chain. Unglued name servers are looked up
    /// from `root` as nested lookups that share the query budget but keep
    /// their own alias chain.
    pub async fn lookup(
        &mut self,
        root: Ipv4Addr,
        fqdn: &str,
    ) -> Result<DomainNameInfo, LookupError> {
        let mut session = ResolutionSession::new(fqdn, self.limits);
        let mut current = PendingLookup::new(fqdn, root);
        let mut suspended: Vec<PendingLookup> = Vec::new();

        loop {
            let response = self
                .query(&mut session, current.server, &current.query)
                .await?;

            match decide(&response, &current.query.name)? {
                Step::Answer {
                    owner,
                    address,
                    ttl,
                    aliases,
                } => {
                    current.follow(&aliases);
                    if current.scope.contains(&owner) {
                        current.scope.fold_ttl(ttl);
                    }

                    match suspended.pop() {
                        Some(mut parent) => {
                            tracing::debug!(
                                "name server {} is at {}, resuming {}",
                                current.query.name,
                                address,
                                parent.query.name
                            );
                            parent.server = address;
                            current = parent;
                        }
                        None => {
                            tracing::debug!(
                                "{} resolved after {} queries",
                                session.original_fqdn(),
                                session.queries_sent()
                            );
                            return Ok(DomainNameInfo::new(
                                session.original_fqdn(),
                                current.scope.min_ttl(),
                                address,
                            ));
                        }
                    }
                }
                Step::Referral {
                    name_server,
                    address,
                } => {
                    tracing::debug!("referred to {} ({})", name_server, address);
                    current.server = address;
                }
                Step::Restart { aliases } => {
                    current.follow(&aliases);
                    if let Some(alias) = aliases.last() {
                        tracing::debug!(
                            "{} is an alias of {}, restarting at {}",
                            current.query.name,
                            alias.target,
                            root
                        );
                        current.query = NameQuery::a_record(without_root(&alias.target));
                    }
                    current.server = root;
                }
                Step::ResolveNameServer(name_server) => {
                    tracing::debug!("looking up address of name server {}", name_server);
                    let nested = PendingLookup::new(&name_server, root);
                    suspended.push(std::mem::replace(&mut current, nested));
                }
            }
        }
    }

    // Sends `query` to `server` until a response arrives, retrying on timeout.
    async fn query(
        &mut self,
        session: &mut ResolutionSession,
        server: Ipv4Addr,
        query: &NameQuery,
    ) -> Result<ResponseMessage, LookupError> {
        let server_addr = SocketAddr::new(server.into(), self.limits.server_port);

        loop {
            session.begin_query()?;

            let id = self.ids.next_id();
            let request = dns::encode_request(&query.name, id)?;
            self.trace(format_args!("\n\nQuery ID     {} {} --> {}\n", id, query.name, server));
            tracing::debug!("query {} for {} to {}", id, query, server_addr);

            match self.transport.exchange(server_addr, &request).await? {
                Received::TimedOut => {
                    tracing::debug!("query {} to {} timed out", id, server_addr);
                    session.record_timeout()?;
                }
                Received::Datagram(bytes) => {
                    session.record_response();

                    let response = dns::decode_response(&bytes)?;
                    self.trace(format_args!("{}", response));
                    if response.id() != id {
                        tracing::warn!(
                            "response id {} does not match query id {}",
                            response.id(),
                            id
                        );
                    }

                    return Ok(response);
                }
            }
        }
    }

    fn trace(&mut self, args: fmt::Arguments<'_>) {
        let Some(out) = self.trace.as_mut() else {
            return;
        };
        if let Err(e) = out.write_fmt(args).and_then(|()| out.flush()) {
            tracing::warn!("could not write trace output: {}", e);
        }
    }
}
