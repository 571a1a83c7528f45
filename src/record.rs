use std::path::Path;
use serde::Serialize;
use crate::viacep::model::Endereco;

/// Row written to the CSV export
#[derive(Debug, Serialize)]
pub struct Record<'a> {
    cep: &'a str,
    logradouro: &'a str,
    complemento: &'a str,
    bairro: &'a str,
    localidade: &'a str,
    uf: &'a str,
}

impl<'a> From<&'a Endereco> for Record<'a> {
    fn from(endereco: &'a Endereco) -> Self {
        Self {
            cep: &endereco.cep,
            logradouro: &endereco.logradouro,
            complemento: endereco.complement().unwrap_or_default(),
            bairro: &endereco.bairro,
            localidade: &endereco.localidade,
            uf: &endereco.uf,
        }
    }
}

/// write the result set to a CSV file, replacing whatever was there
pub fn save_records(results: &[Endereco], save_path: impl AsRef<Path>) -> color_eyre::Result<()> {
    if let Some(parent) = save_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut wtr = csv::Writer::from_path(save_path)?;
    for endereco in results {
        wtr.serialize(Record::from(endereco))?;
    }
    wtr.flush()?;
    Ok(())
}
