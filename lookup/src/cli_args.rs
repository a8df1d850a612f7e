use argh::FromArgs;
use std::net::Ipv4Addr;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: lookup rootDNS name [-t]
   where
       rootDNS - the IP address (in dotted form) of the root
                 DNS server you are to start your search at
       name    - fully qualified domain name to lookup
       -t      - trace the queries made and responses received";

#[derive(Debug, FromArgs)]
#[argh(description = "iteratively resolve a name to an IPv4 address, starting at a root server")]
pub struct CliArgs {
    #[argh(positional, description = "IPv4 address of the root name server")]
    pub root_server: String,

    #[argh(positional, description = "fully qualified domain name to look up")]
    pub fqdn: String,

    #[argh(switch, short = 't', description = "trace every query and response")]
    pub trace: bool,

    #[argh(
        option,
        description = "config file path, default: './lookup_config.toml'",
        default = "configuration::default_config_path()"
    )]
    pub config: PathBuf,
}

impl CliArgs {
    /// Parses `args` (without the program name). `None` means the usage text
    /// should be shown instead of doing a lookup.
    pub fn parse(command: &str, args: &[&str]) -> Option<Self> {
        CliArgs::from_args(&[command], args).ok()
    }

    pub fn root_address(&self) -> Option<Ipv4Addr> {
        self.root_server.parse().ok()
    }
}
