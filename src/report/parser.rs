// src/report/parser.rs

use std::collections::BTreeMap;

use crate::report::HopRecord;

/// Everything the parser extracts from one completed transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTranscript {
    /// Hop number → record; on duplicate hop numbers the later line
    /// replaces the earlier one entirely.
    pub hops: BTreeMap<u32, HopRecord>,
    /// 1-based transcript line number → raw text, for lines that match
    /// neither hop shape.
    pub unparseable_lines: BTreeMap<usize, String>,
    /// Lines recognized as belonging to some hop, well-formed or raw.
    pub total_hops: u32,
    /// Well-formed hops only.
    pub meaningful_hops: u32,
}

/// Parse the full transcript into a hop table.
///
/// A healthy line looks like:
///
/// ```text
/// 1  10.0.1.1 (10.0.1.1)  0.675 ms  0.576 ms  0.533 ms
/// ```
///
/// and an empty hop like:
///
/// ```text
/// 2 * * *
/// ```
///
/// Per 1-indexed line:
/// - empty lines are skipped entirely and counted nowhere;
/// - exactly 9 whitespace tokens with an integer first token is a
///   well-formed hop (`[number, domain, (ip), rtt1, ms, rtt2, ms, rtt3, ms]`);
/// - any other token count with an integer first token is kept raw;
/// - everything else lands in `unparseable_lines`.
///
/// The 9-token threshold is the utility's default layout, matched on
/// token count only; any deviation downgrades to the raw or unparseable
/// path rather than failing the parse. RTT tokens are kept verbatim
/// (they may be the literal `*`); resolving those is left to whoever
/// analyses the output.
pub fn parse_transcript(transcript: &[String]) -> ParsedTranscript {
    let mut parsed = ParsedTranscript::default();

    for (index, original_line) in transcript.iter().enumerate() {
        let line_number = index + 1;
        if original_line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = original_line.split_whitespace().collect();
        let number = tokens.first().and_then(|t| t.parse::<u32>().ok());

        match number {
            Some(number) if tokens.len() == 9 => {
                parsed.total_hops += 1;
                parsed.meaningful_hops += 1;
                parsed.hops.insert(
                    number,
                    HopRecord::WellFormed {
                        domain_name: tokens[1].to_string(),
                        ip: strip_parens(tokens[2]).to_string(),
                        rtt1: tokens[3].to_string(),
                        rtt2: tokens[5].to_string(),
                        rtt3: tokens[7].to_string(),
                    },
                );
            }
            Some(number) => {
                parsed.total_hops += 1;
                parsed.hops.insert(
                    number,
                    HopRecord::Raw {
                        raw: original_line.clone(),
                    },
                );
            }
            None => {
                parsed
                    .unparseable_lines
                    .insert(line_number, original_line.clone());
            }
        }
    }

    parsed
}

/// Remove the parentheses the utility puts around the hop's IP address.
fn strip_parens(token: &str) -> &str {
    let token = token.strip_prefix('(').unwrap_or(token);
    token.strip_suffix(')').unwrap_or(token)
}
