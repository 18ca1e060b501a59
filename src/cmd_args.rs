use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Document-store host
    /// Optional. Host name or address of the service. A leading `http://`
    /// is accepted and normalized away.
    #[clap(long, default_value = "127.0.0.1", help = "document-store host")]
    host: String,

    /// Document-store port
    #[clap(long, default_value = "9200", help = "document-store port")]
    port: String,

    /// Verbose mode
    /// Optional. Print verbose messages.
    #[clap(short = 'v', long, help = "Print verbose message")]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    host: String,
    port: String,
    verbose: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        let args = ClapArgs::parse();
        Self {
            host: args.host,
            port: args.port,
            verbose: args.verbose,
        }
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = ClapArgs::parse_from(itr);
        Self {
            host: args.host,
            port: args.port,
            verbose: args.verbose,
        }
    }

    pub fn host(&self) -> &String {
        &self.host
    }

    pub fn port(&self) -> &String {
        &self.port
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
