//! Resumen de cabeceras de un cluster.
//!
//! La primera cabecera es la del representante (query); el resto son los
//! miembros (targets). El resumen es una sola línea terminada en `\n`.

use indexmap::IndexMap;

/// Convierte las cabeceras ordenadas de un registro en su resumen.
pub trait HeaderSummarizer: Sync {
    fn summarize(&self, headers: &[&str], prefix: &str) -> String;
}

/// Cabeceras estilo UniProt: `db|ACCESSION|ENTRY descripción OS=... OX=...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniprotHeaderSummarizer;

#[derive(Debug, PartialEq, Eq)]
struct ParsedHeader<'a> {
    id: &'a str,
    description: &'a str,
}

fn parse_header(header: &str) -> ParsedHeader<'_> {
    let header = header.trim().trim_start_matches('>');
    let (token, rest) = header.split_once(char::is_whitespace).unwrap_or((header, ""));
    let mut parts = token.split('|');
    let id = match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(acc), Some(_)) if !acc.is_empty() => acc,
        _ => token,
    };
    // la descripción termina donde empiezan los campos clave=valor
    let description = match rest.find(" OS=") {
        Some(end) => &rest[..end],
        None if rest.starts_with("OS=") => "",
        None => rest,
    };
    ParsedHeader { id, description: description.trim() }
}

fn is_uncharacterized(description: &str) -> bool {
    let lower = description.to_ascii_lowercase();
    lower.contains("uncharacterized") || lower.contains("hypothetical") || lower.contains("unknown")
}

impl HeaderSummarizer for UniprotHeaderSummarizer {
    fn summarize(&self, headers: &[&str], prefix: &str) -> String {
        let parsed: Vec<ParsedHeader<'_>> = headers.iter().map(|h| parse_header(h)).collect();
        let representative = parsed.first().map(|p| p.id).unwrap_or_default();

        // conteo conservando el orden de primera aparición
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for p in parsed.iter().filter(|p| !p.description.is_empty()) {
            *counts.entry(p.description).or_insert(0) += 1;
        }
        let mut descriptions: Vec<(&str, usize)> = counts.into_iter().collect();
        descriptions.sort_by_key(|(d, n)| (is_uncharacterized(d), std::cmp::Reverse(*n)));
        let joined = descriptions.iter().map(|(d, _)| *d).collect::<Vec<_>>().join("|");

        format!("{prefix}Representative={representative} n={} Descriptions=[{joined}]\n", headers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uniprot_accession_and_description() {
        let p = parse_header(">sp|P69905|HBA_HUMAN Hemoglobin subunit alpha OS=Homo sapiens OX=9606\n");
        assert_eq!(p, ParsedHeader { id: "P69905", description: "Hemoglobin subunit alpha" });
    }

    #[test]
    fn plain_header_uses_first_token() {
        let p = parse_header("contig_12 len=300");
        assert_eq!(p.id, "contig_12");
        assert_eq!(p.description, "len=300");
        assert_eq!(parse_header("HeaderA").description, "");
    }

    #[test]
    fn descriptions_by_frequency_uncharacterized_last() {
        let headers = ["tr|A1|X_1 Uncharacterized protein OS=a",
                       "tr|A2|X_2 Kinase OS=b",
                       "tr|A3|X_3 Uncharacterized protein OS=c",
                       "tr|A4|X_4 Transporter OS=d",
                       "tr|A5|X_5 Transporter OS=e"];
        let out = UniprotHeaderSummarizer.summarize(&headers, "-");
        assert_eq!(out, "-Representative=A1 n=5 Descriptions=[Transporter|Kinase|Uncharacterized protein]\n");
    }

    #[test]
    fn empty_record_still_summarizes() {
        assert_eq!(UniprotHeaderSummarizer.summarize(&[], ""), "Representative= n=0 Descriptions=[]\n");
    }
}
