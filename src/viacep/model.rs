use serde::Deserialize;

/// One address matched by ViaCEP.
///
/// Field names follow the service payload. Extra fields such as `ibge` or `ddd`
/// are ignored, and missing ones decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endereco {
    pub cep: String,
    pub logradouro: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
}

impl Endereco {
    /// complement text, `None` when the service sent nothing or an empty string
    pub fn complement(&self) -> Option<&str> {
        self.complemento.as_deref().filter(|c| !c.is_empty())
    }
}
