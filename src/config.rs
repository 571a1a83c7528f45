use std::path::PathBuf;
use clap::Parser;
use reqwest::Url;
use crate::viacep::DEFAULT_BASE_URL;

/// Look up Brazilian addresses by CEP or by `UF,Cidade,Rua`
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Base URL of the ViaCEP web service
    #[arg(long, env = "CEP_LOOKUP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Also write every successful result set to this CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// CEP (`01310-100`) or address (`SP,Itapevi,Rua Joaquina Gomes Barbosa`).
    /// Starts an interactive prompt when omitted.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub query: Vec<String>,
}

impl Config {
    /// the one-shot query, words joined back with spaces
    pub fn one_shot_query(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| self.query.join(" "))
    }
}
