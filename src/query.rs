use std::fmt;
use std::sync::LazyLock;
use regex::Regex;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

static CEP_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{8}$").unwrap());

/// Reasons a raw input is rejected before any request is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Preencha algum CEP ou endereço!")]
    Empty,
    #[error("Formato inválido. Use: UF,Cidade,Rua (Ex: SP,Itapevi,Rua Joaquina Gomes Barbosa número 20)")]
    MalformedAddress,
}

/// A Brazilian postal code, always 8 ASCII digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCode(String);

impl PostalCode {
    /// parse a postal code, tolerating a single hyphen separator
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.replacen('-', "", 1);
        CEP_REG.is_match(&digits).then_some(Self(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `UF,Cidade,Rua` query, already normalized for the lookup service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressQuery {
    pub region: String,
    pub city: String,
    pub street: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    PostalCode(PostalCode),
    Address(AddressQuery),
}

impl QueryTarget {
    /// path segments relative to the service base URL
    pub fn path_segments(&self) -> Vec<String> {
        match self {
            QueryTarget::PostalCode(cep) => vec![cep.digits().to_string(), "json".to_string()],
            QueryTarget::Address(address) => vec![
                address.region.clone(),
                address.city.clone(),
                address.street.clone(),
                "json".to_string(),
            ],
        }
    }

    pub fn path(&self) -> String {
        self.path_segments().join("/")
    }
}

/// Decide whether `raw` is a postal code or an address query.
///
/// The hyphen is stripped at most once, so `0131-0-100` is not a postal code; it
/// falls through to address parsing and is rejected there for having no commas.
pub fn classify(raw: &str) -> Result<QueryTarget, InvalidInput> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidInput::Empty);
    }

    if let Some(cep) = PostalCode::parse(trimmed) {
        return Ok(QueryTarget::PostalCode(cep));
    }

    let parts = trimmed.split(',').collect::<Vec<_>>();
    if parts.len() < 3 {
        return Err(InvalidInput::MalformedAddress);
    }

    Ok(QueryTarget::Address(AddressQuery {
        region: parts[0].trim().to_uppercase(),
        city: strip_diacritics(parts[1].trim()),
        street: strip_diacritics(parts[2..].join(" ").trim()),
    }))
}

/// Remove combining accents after canonical decomposition, i.e. "São" -> "Sao".
/// Whitespace and every other character are kept as they are.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("01310100", "01310100")]
    #[case::hyphenated("01310-100", "01310100")]
    #[case::padded("  06653-020 ", "06653020")]
    #[case::leading_hyphen("-01310100", "01310100")]
    #[case::trailing_hyphen("01310100-", "01310100")]
    #[case::odd_position("0131010-0", "01310100")]
    fn classifies_postal_codes(#[case] raw: &str, #[case] digits: &str) {
        match classify(raw) {
            Ok(QueryTarget::PostalCode(cep)) => assert_eq!(cep.digits(), digits),
            other => panic!("expected postal code for {raw:?}, got {other:?}"),
        }
    }

    #[rstest]
    #[case::seven_digits("0131010")]
    #[case::nine_digits("013101001")]
    #[case::two_hyphens("0131-0-100")]
    #[case::letters("0131O100")]
    #[case::dot_separator("01310.100")]
    #[case::inner_space("01310 100")]
    #[case::two_segments("SP,Itapevi")]
    #[case::no_commas("Avenida Paulista")]
    fn rejects_malformed_input(#[case] raw: &str) {
        assert_eq!(classify(raw), Err(InvalidInput::MalformedAddress));
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::tabs("\t\n")]
    fn rejects_empty_input(#[case] raw: &str) {
        assert_eq!(classify(raw), Err(InvalidInput::Empty));
    }

    #[test]
    fn builds_address_query_with_normalized_segments() {
        let target = classify("sp, São Paulo ,Avenida Paulista").unwrap();
        assert_eq!(
            target,
            QueryTarget::Address(AddressQuery {
                region: "SP".to_string(),
                city: "Sao Paulo".to_string(),
                street: "Avenida Paulista".to_string(),
            })
        );
    }

    #[test]
    fn joins_extra_segments_into_street() {
        let target = classify("SP,Itapevi,Rua Joaquina Gomes Barbosa,número 20").unwrap();
        let QueryTarget::Address(address) = target else {
            panic!("expected an address query");
        };
        assert_eq!(address.street, "Rua Joaquina Gomes Barbosa numero 20");
    }

    #[test]
    fn builds_request_paths() {
        assert_eq!(classify("01310-100").unwrap().path(), "01310100/json");
        assert_eq!(
            classify("SP,São Paulo,Avenida Paulista").unwrap().path(),
            "SP/Sao Paulo/Avenida Paulista/json"
        );
    }

    #[test]
    fn strips_accents_and_keeps_whitespace() {
        assert_eq!(strip_diacritics("São"), "Sao");
        assert_eq!(strip_diacritics("Conceição  do   Araguaia"), "Conceicao  do   Araguaia");
        assert_eq!(strip_diacritics("Jaraguá do Sul, nº 7"), "Jaragua do Sul, nº 7");
        assert_eq!(strip_diacritics("ÁÉÍÓÚ àèìòù âêô ãõ ç ü"), "AEIOU aeiou aeo ao c u");
    }

    #[test]
    fn strip_is_idempotent() {
        for text in ["São Paulo", "Pôrto Alegre", "plain text", "", "Ñandú  \t ç"] {
            let once = strip_diacritics(text);
            assert_eq!(strip_diacritics(&once), once);
        }
    }

    #[test]
    fn strip_preserves_length_for_single_codepoint_accents() {
        let text = "Goiânia Maceió";
        let stripped = strip_diacritics(text);
        assert_eq!(stripped.chars().count(), text.chars().count());
        let spaces = |s: &str| {
            s.chars()
                .enumerate()
                .filter(|(_, c)| c.is_whitespace())
                .map(|(i, _)| i)
                .collect::<Vec<_>>()
        };
        assert_eq!(spaces(&stripped), spaces(text));
        assert_eq!(stripped, "Goiania Maceio");
    }
}
