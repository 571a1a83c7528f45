use std::fmt::Write;
use crate::viacep::model::Endereco;

const RULE: &str = "----------------------------------------";

/// Display text for a result set, one block per address in the given order
pub fn render(results: &[Endereco]) -> String {
    let mut out = String::new();
    for endereco in results {
        // writing into a String cannot fail
        let _ = writeln!(out, "CEP: {}", endereco.cep);
        let _ = writeln!(out, "{}", endereco.logradouro);
        let _ = writeln!(out, "Complemento: {}", endereco.complement().unwrap_or("N/A"));
        let _ = writeln!(out, "{}", endereco.bairro);
        let _ = writeln!(out, "{} - {}", endereco.localidade, endereco.uf);
        let _ = writeln!(out, "{RULE}");
    }
    out
}
